use std::{future::Future, pin::Pin};

use crate::{
    foundation::core::Millis,
    foundation::error::{HapticError, HapticResult},
    render::capability::PlatformProbe,
    render::ops::{AmplitudeWaveform, ComposedPrimitive, Envelope, OnOffWaveform},
};

/// Boxed playback future returned by [`NativeVibrator`] calls.
pub type PlaybackFuture<'a> = Pin<Box<dyn Future<Output = HapticResult<Completion>> + Send + 'a>>;

/// What the native layer knows about a playback once its call returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Playback already ran its course.
    Finished,
    /// Playback was started and will run for the reported time.
    Reported(Millis),
    /// Playback was started; its length is not observable.
    Unknown,
}

fn unavailable(what: &str) -> PlaybackFuture<'static> {
    let err = HapticError::backend(format!("{what} is not available on this device"));
    Box::pin(std::future::ready(Err(err)))
}

/// Host platform vibration API, one call per capability tier.
///
/// Implementations only override the calls their platform offers; the rest fail with a
/// [`HapticError::Backend`].
pub trait NativeVibrator: Send + Sync {
    /// Coarse API level and hardware capability probe. Queried once per vibrator.
    fn probe(&self) -> PlatformProbe;

    fn compose<'a>(&'a self, primitive: &'a ComposedPrimitive) -> PlaybackFuture<'a> {
        let _ = primitive;
        unavailable("primitive composition")
    }

    fn play_envelope<'a>(&'a self, envelope: &'a Envelope) -> PlaybackFuture<'a> {
        let _ = envelope;
        unavailable("envelope playback")
    }

    fn play_amplitude<'a>(&'a self, waveform: &'a AmplitudeWaveform) -> PlaybackFuture<'a> {
        let _ = waveform;
        unavailable("amplitude waveform playback")
    }

    fn play_on_off<'a>(&'a self, waveform: &'a OnOffWaveform) -> PlaybackFuture<'a> {
        let _ = waveform;
        unavailable("on/off waveform playback")
    }

    fn vibrate_for(&self, duration: Millis) -> PlaybackFuture<'_> {
        let _ = duration;
        unavailable("timed vibration")
    }

    /// Stop whatever is playing right now.
    fn cancel(&self);
}

/// A [`NativeVibrator`] that reports a fixed probe and accepts every call without playing.
///
/// Used for dry runs where only the rendering decisions matter.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentVibrator {
    probe: PlatformProbe,
}

impl SilentVibrator {
    pub fn new(probe: PlatformProbe) -> Self {
        Self { probe }
    }

    fn accept(&self) -> PlaybackFuture<'static> {
        Box::pin(std::future::ready(Ok(Completion::Finished)))
    }
}

impl NativeVibrator for SilentVibrator {
    fn probe(&self) -> PlatformProbe {
        self.probe
    }

    fn compose<'a>(&'a self, _primitive: &'a ComposedPrimitive) -> PlaybackFuture<'a> {
        self.accept()
    }

    fn play_envelope<'a>(&'a self, _envelope: &'a Envelope) -> PlaybackFuture<'a> {
        self.accept()
    }

    fn play_amplitude<'a>(&'a self, _waveform: &'a AmplitudeWaveform) -> PlaybackFuture<'a> {
        self.accept()
    }

    fn play_on_off<'a>(&'a self, _waveform: &'a OnOffWaveform) -> PlaybackFuture<'a> {
        self.accept()
    }

    fn vibrate_for(&self, _duration: Millis) -> PlaybackFuture<'_> {
        self.accept()
    }

    fn cancel(&self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/render/native.rs"]
mod tests;
