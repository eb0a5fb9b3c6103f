use std::{future::Future, pin::Pin, sync::Arc};

use crate::{
    effect::primitive::{BasicPrimitive, PrimitiveType},
    foundation::core::Millis,
    foundation::error::HapticResult,
    render::capability::{Capabilities, RenderTier, select_tier},
    render::native::{Completion, NativeVibrator},
    render::ops::{ComposedPrimitive, RenderOp},
    render::waveform::{WaveformOpts, render_amplitude, render_envelope, render_on_off},
};

/// Boxed future returned by [`VibratorBackend::perform`].
pub type PerformFuture<'a> = Pin<Box<dyn Future<Output = HapticResult<()>> + Send + 'a>>;

/// State every backend adapter carries: the native API, the capabilities probed at construction
/// and the waveform options.
#[derive(Clone)]
pub struct BackendCore {
    pub native: Arc<dyn NativeVibrator>,
    pub caps: Capabilities,
    pub opts: WaveformOpts,
}

impl std::fmt::Debug for BackendCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCore")
            .field("caps", &self.caps)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

/// One rendering strategy, selected once per vibrator.
pub trait VibratorBackend: Send + Sync {
    fn core(&self) -> &BackendCore;

    /// Tier this backend renders for, `None` when nothing can be played.
    fn tier(&self) -> Option<RenderTier>;

    /// Decide what the native layer is asked to do for `basic`.
    fn render(&self, basic: &BasicPrimitive) -> RenderOp;

    fn capabilities(&self) -> Capabilities {
        self.core().caps
    }

    fn is_vibration_supported(&self) -> bool {
        true
    }

    /// Render and play `basic`, resolving once its playback has run its course.
    fn perform<'a>(&'a self, basic: &'a BasicPrimitive) -> PerformFuture<'a> {
        Box::pin(async move {
            let op = self.render(basic);
            play(self.core().native.as_ref(), &op).await
        })
    }

    fn cancel(&self) {
        self.core().native.cancel();
    }
}

/// Hand `op` to the native layer and wait out its playback.
///
/// When the native call cannot observe completion the op's estimated duration is slept instead.
pub async fn play(native: &dyn NativeVibrator, op: &RenderOp) -> HapticResult<()> {
    let completion = match op {
        RenderOp::Pause(d) => {
            tokio::time::sleep(d.as_duration()).await;
            return Ok(());
        }
        RenderOp::Compose(p) => native.compose(p).await?,
        RenderOp::Envelope(e) => native.play_envelope(e).await?,
        RenderOp::Amplitude(w) => native.play_amplitude(w).await?,
        RenderOp::OnOff(w) => native.play_on_off(w).await?,
        RenderOp::Vibrate(d) => native.vibrate_for(*d).await?,
    };
    match completion {
        Completion::Finished => {}
        Completion::Reported(d) => tokio::time::sleep(d.as_duration()).await,
        Completion::Unknown => tokio::time::sleep(op.duration().as_duration()).await,
    }
    Ok(())
}

fn compose(kind: PrimitiveType, scale: f32) -> RenderOp {
    RenderOp::Compose(ComposedPrimitive { kind, scale })
}

/// Native primitive composition. Custom curves go through envelopes when the device has them,
/// otherwise through the fallback primitive.
#[derive(Debug)]
pub struct CompositionBackend {
    core: BackendCore,
}

impl CompositionBackend {
    pub fn new(core: BackendCore) -> Self {
        Self { core }
    }
}

impl VibratorBackend for CompositionBackend {
    fn core(&self) -> &BackendCore {
        &self.core
    }

    fn tier(&self) -> Option<RenderTier> {
        Some(RenderTier::Composition)
    }

    fn render(&self, basic: &BasicPrimitive) -> RenderOp {
        match basic {
            BasicPrimitive::Predefined { kind, scale } => compose(*kind, *scale),
            BasicPrimitive::Custom {
                duration,
                curves,
                scale,
                ..
            } if self.core.caps.envelope => {
                RenderOp::Envelope(render_envelope(curves, *duration, *scale))
            }
            BasicPrimitive::Custom {
                duration,
                scale,
                fallback,
                ..
            } => match fallback {
                Some(kind) => compose(*kind, *scale),
                None => RenderOp::Pause(*duration),
            },
        }
    }
}

/// Parametric envelopes; predefined primitives play their signature curve.
#[derive(Debug)]
pub struct EnvelopeBackend {
    core: BackendCore,
}

impl EnvelopeBackend {
    pub fn new(core: BackendCore) -> Self {
        Self { core }
    }
}

impl VibratorBackend for EnvelopeBackend {
    fn core(&self) -> &BackendCore {
        &self.core
    }

    fn tier(&self) -> Option<RenderTier> {
        Some(RenderTier::Envelope)
    }

    fn render(&self, basic: &BasicPrimitive) -> RenderOp {
        let env = match basic {
            BasicPrimitive::Predefined { kind, scale } => {
                render_envelope(&kind.signature(), kind.nominal_duration(), *scale)
            }
            BasicPrimitive::Custom {
                duration,
                curves,
                scale,
                ..
            } => render_envelope(curves, *duration, *scale),
        };
        RenderOp::Envelope(env)
    }
}

/// Amplitude-controlled waveforms sampled every `opts.step`.
#[derive(Debug)]
pub struct AmplitudeBackend {
    core: BackendCore,
}

impl AmplitudeBackend {
    pub fn new(core: BackendCore) -> Self {
        Self { core }
    }
}

impl VibratorBackend for AmplitudeBackend {
    fn core(&self) -> &BackendCore {
        &self.core
    }

    fn tier(&self) -> Option<RenderTier> {
        Some(RenderTier::Amplitude)
    }

    fn render(&self, basic: &BasicPrimitive) -> RenderOp {
        let opts = &self.core.opts;
        let wave = match basic {
            BasicPrimitive::Predefined { kind, scale } => {
                render_amplitude(&kind.signature(), kind.nominal_duration(), *scale, opts)
            }
            BasicPrimitive::Custom {
                duration,
                curves,
                scale,
                ..
            } => render_amplitude(curves, *duration, *scale, opts),
        };
        RenderOp::Amplitude(wave)
    }
}

/// Motor switched fully on or off; intensity is thresholded.
#[derive(Debug)]
pub struct OnOffBackend {
    core: BackendCore,
}

impl OnOffBackend {
    pub fn new(core: BackendCore) -> Self {
        Self { core }
    }
}

impl VibratorBackend for OnOffBackend {
    fn core(&self) -> &BackendCore {
        &self.core
    }

    fn tier(&self) -> Option<RenderTier> {
        Some(RenderTier::OnOff)
    }

    fn render(&self, basic: &BasicPrimitive) -> RenderOp {
        let opts = &self.core.opts;
        let wave = match basic {
            BasicPrimitive::Predefined { kind, scale } => {
                render_on_off(&kind.signature(), kind.nominal_duration(), *scale, opts)
            }
            BasicPrimitive::Custom {
                duration,
                curves,
                scale,
                ..
            } => render_on_off(curves, *duration, *scale, opts),
        };
        RenderOp::OnOff(wave)
    }
}

/// A single timed buzz per primitive.
#[derive(Debug)]
pub struct DurationBackend {
    core: BackendCore,
}

impl DurationBackend {
    pub fn new(core: BackendCore) -> Self {
        Self { core }
    }
}

impl VibratorBackend for DurationBackend {
    fn core(&self) -> &BackendCore {
        &self.core
    }

    fn tier(&self) -> Option<RenderTier> {
        Some(RenderTier::DurationOnly)
    }

    fn render(&self, basic: &BasicPrimitive) -> RenderOp {
        match basic {
            BasicPrimitive::Predefined { kind, .. } => RenderOp::Vibrate(kind.nominal_duration()),
            BasicPrimitive::Custom {
                duration, fallback, ..
            } => match fallback {
                Some(kind) => RenderOp::Vibrate(kind.nominal_duration()),
                None => RenderOp::Pause(*duration),
            },
        }
    }
}

/// Device without a vibrator. Every call is a silent no-op.
#[derive(Debug)]
pub struct UnsupportedBackend {
    core: BackendCore,
}

impl UnsupportedBackend {
    pub fn new(core: BackendCore) -> Self {
        Self { core }
    }
}

impl VibratorBackend for UnsupportedBackend {
    fn core(&self) -> &BackendCore {
        &self.core
    }

    fn tier(&self) -> Option<RenderTier> {
        None
    }

    fn render(&self, basic: &BasicPrimitive) -> RenderOp {
        RenderOp::Pause(basic.intrinsic_duration())
    }

    fn is_vibration_supported(&self) -> bool {
        false
    }

    fn perform<'a>(&'a self, _basic: &'a BasicPrimitive) -> PerformFuture<'a> {
        Box::pin(std::future::ready(Ok(())))
    }

    fn cancel(&self) {}
}

/// Pick the richest tier `caps` allows and build its backend.
#[tracing::instrument(skip(native))]
pub fn create_backend(
    caps: Capabilities,
    native: Arc<dyn NativeVibrator>,
    opts: WaveformOpts,
) -> Box<dyn VibratorBackend> {
    let core = BackendCore { native, caps, opts };
    let tier = select_tier(&caps);
    tracing::debug!(?tier, "selected render tier");
    match tier {
        Some(RenderTier::Composition) => Box::new(CompositionBackend::new(core)),
        Some(RenderTier::Envelope) => Box::new(EnvelopeBackend::new(core)),
        Some(RenderTier::Amplitude) => Box::new(AmplitudeBackend::new(core)),
        Some(RenderTier::OnOff) => Box::new(OnOffBackend::new(core)),
        Some(RenderTier::DurationOnly) => Box::new(DurationBackend::new(core)),
        None => Box::new(UnsupportedBackend::new(core)),
    }
}

/// Total time `op` would keep the motor busy; zero for pauses.
pub fn active_time(op: &RenderOp) -> Millis {
    match op {
        RenderOp::Pause(_) => Millis::ZERO,
        RenderOp::OnOff(w) => w.on_time(),
        other => other.duration(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
