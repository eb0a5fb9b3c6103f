#![forbid(unsafe_code)]
//! Platform-agnostic haptic effects.
//!
//! Effects are sequences of predefined or curve-based primitives. A [`Vibrator`] plays them one
//! at a time on a background task, rendering each primitive for the richest vibration API the
//! device reports through its [`NativeVibrator`].

mod dispatch;
mod effect;
mod foundation;
mod render;
mod sequence;

pub use dispatch::slot::LatestSlot;
pub use dispatch::vibrator::{DispatchStats, Vibrator, VibratorConfig};
pub use effect::curves::{DEFAULT_CURVE_VALUE, HapticCurves, Keyframe, sample};
pub use effect::dsl::{CurvesBuilder, EffectBuilder, PrimitiveBuilder};
pub use effect::model::HapticEffect;
pub use effect::primitive::{
    BasicPrimitive, DEFAULT_CUSTOM_DURATION, DelayType, Primitive, PrimitiveType,
};
pub use foundation::core::Millis;
pub use foundation::error::{HapticError, HapticResult};
pub use render::backend::{
    AmplitudeBackend, BackendCore, CompositionBackend, DurationBackend, EnvelopeBackend,
    OnOffBackend, PerformFuture, UnsupportedBackend, VibratorBackend, active_time,
    create_backend, play,
};
pub use render::capability::{
    AMPLITUDE_MIN_API, COMPOSITION_MIN_API, Capabilities, ENVELOPE_MIN_API, PlatformProbe,
    RenderTier, select_tier,
};
pub use render::native::{Completion, NativeVibrator, PlaybackFuture, SilentVibrator};
pub use render::ops::{
    AmplitudeSegment, AmplitudeWaveform, ComposedPrimitive, Envelope, EnvelopePoint,
    OnOffSegment, OnOffWaveform, RenderOp,
};
pub use render::waveform::{
    OnOffOpts, WaveformOpts, render_amplitude, render_envelope, render_on_off,
};
pub use sequence::resolver::{TimedStep, Timeline, resolve_delays};
