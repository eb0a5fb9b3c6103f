use std::{
    fs::File,
    io::BufReader,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::Context;
use tokio::task::JoinHandle;

use crate::{
    dispatch::slot::LatestSlot,
    effect::{dsl::EffectBuilder, model::HapticEffect, primitive::BasicPrimitive},
    foundation::error::{HapticError, HapticResult},
    render::backend::{VibratorBackend, create_backend},
    render::capability::{Capabilities, RenderTier},
    render::native::NativeVibrator,
    render::waveform::WaveformOpts,
    sequence::resolver::Timeline,
};

/// Construction-time settings of a [`Vibrator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VibratorConfig {
    pub waveform: WaveformOpts,
}

impl VibratorConfig {
    pub fn validate(&self) -> HapticResult<()> {
        self.waveform.validate()
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> HapticResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| HapticError::serde(format!("parse vibrator config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> HapticResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HapticError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Counters describing what a [`Vibrator`] did with submitted effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DispatchStats {
    pub effects_submitted: u64,
    /// Replaced in the pending slot before the worker picked them up.
    pub effects_superseded: u64,
    pub effects_played: u64,
    pub primitives_performed: u64,
    /// Primitives whose backend call failed and were waited out instead.
    pub primitives_degraded: u64,
}

#[derive(Debug, Default)]
struct Counters {
    submitted: AtomicU64,
    superseded: AtomicU64,
    played: AtomicU64,
    performed: AtomicU64,
    degraded: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            effects_submitted: self.submitted.load(Ordering::Relaxed),
            effects_superseded: self.superseded.load(Ordering::Relaxed),
            effects_played: self.played.load(Ordering::Relaxed),
            primitives_performed: self.performed.load(Ordering::Relaxed),
            primitives_degraded: self.degraded.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    pending: LatestSlot<HapticEffect>,
    counters: Counters,
}

/// Plays haptic effects one at a time on a background task.
///
/// [`Vibrator::vibrate`] never waits: the effect lands in a single pending slot that the worker
/// drains. When effects arrive faster than they play, only the most recent pending one survives.
/// Dropping the vibrator stops the worker.
pub struct Vibrator {
    backend: Arc<dyn VibratorBackend>,
    shared: Arc<Shared>,
    worker: JoinHandle<()>,
}

impl std::fmt::Debug for Vibrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vibrator")
            .field("tier", &self.backend.tier())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Vibrator {
    /// Probe `native` once, pick its backend and start the worker on the current tokio runtime.
    pub fn new(native: Arc<dyn NativeVibrator>, config: VibratorConfig) -> HapticResult<Self> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current()
            .context("a Vibrator must be created inside a tokio runtime")?;

        let probe = native.probe();
        let caps = Capabilities::from_probe(&probe);
        let backend: Arc<dyn VibratorBackend> =
            Arc::from(create_backend(caps, native, config.waveform));
        tracing::debug!(?probe, tier = ?backend.tier(), "vibrator ready");

        let shared = Arc::new(Shared::default());
        let worker = runtime.spawn(run_worker(backend.clone(), shared.clone()));
        Ok(Self {
            backend,
            shared,
            worker,
        })
    }

    /// Submit `effect` for playback, replacing any effect still waiting to start.
    pub fn vibrate(&self, effect: HapticEffect) {
        if !self.backend.is_vibration_supported() {
            tracing::trace!("vibration unsupported, dropping effect");
            return;
        }
        Counters::bump(&self.shared.counters.submitted);
        if self.shared.pending.put(effect).is_some() {
            Counters::bump(&self.shared.counters.superseded);
            tracing::trace!("superseded pending effect");
        }
    }

    /// Build an effect with `block` and submit it. Builder errors are returned; playback is not
    /// observed.
    pub fn vibrate_with<F>(&self, block: F) -> HapticResult<()>
    where
        F: FnOnce(EffectBuilder) -> HapticResult<EffectBuilder>,
    {
        let effect = block(EffectBuilder::new())?.build();
        self.vibrate(effect);
        Ok(())
    }

    /// Stop the native playback in flight. Effects submitted afterwards still play.
    pub fn cancel(&self) {
        tracing::debug!("cancel requested");
        self.backend.cancel();
    }

    pub fn is_vibration_supported(&self) -> bool {
        self.backend.is_vibration_supported()
    }

    pub fn tier(&self) -> Option<RenderTier> {
        self.backend.tier()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.backend.capabilities()
    }

    pub fn stats(&self) -> DispatchStats {
        self.shared.counters.snapshot()
    }
}

impl Drop for Vibrator {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run_worker(backend: Arc<dyn VibratorBackend>, shared: Arc<Shared>) {
    loop {
        let effect = shared.pending.take().await;
        play_effect(&backend, &effect, &shared.counters).await;
    }
}

struct AbortOnDrop(tokio::task::AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Perform one primitive on its own task so a panicking native adapter only fails that
/// primitive.
async fn perform_isolated(
    backend: &Arc<dyn VibratorBackend>,
    basic: &BasicPrimitive,
) -> HapticResult<()> {
    let mut task = tokio::spawn({
        let backend = Arc::clone(backend);
        let basic = basic.clone();
        async move { backend.perform(&basic).await }
    });
    // Aborting the worker must not leave the playback task running.
    let _abort = AbortOnDrop(task.abort_handle());
    match (&mut task).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => Err(HapticError::backend("native playback panicked")),
        Err(err) => Err(HapticError::backend(format!("playback task failed: {err}"))),
    }
}

async fn play_effect(
    backend: &Arc<dyn VibratorBackend>,
    effect: &HapticEffect,
    counters: &Counters,
) {
    let timeline = Timeline::resolve(effect);
    tracing::debug!(
        steps = timeline.steps.len(),
        nominal = %timeline.nominal_duration,
        "playing effect"
    );

    for (index, step) in timeline.steps.iter().enumerate() {
        if !step.wait.is_zero() {
            tokio::time::sleep(step.wait.as_duration()).await;
        }
        let basic = &step.primitive.basic;
        match perform_isolated(backend, basic).await {
            Ok(()) => Counters::bump(&counters.performed),
            Err(err) => {
                let nominal = basic.intrinsic_duration();
                tracing::warn!(index, %err, %nominal, "primitive playback failed, waiting it out");
                Counters::bump(&counters.degraded);
                tokio::time::sleep(nominal.as_duration()).await;
            }
        }
    }
    Counters::bump(&counters.played);
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/vibrator.rs"]
mod tests;
