use crate::{
    effect::curves::HapticCurves,
    foundation::core::{Millis, check_unit},
    foundation::error::{HapticError, HapticResult},
    render::ops::{
        AmplitudeSegment, AmplitudeWaveform, Envelope, EnvelopePoint, OnOffSegment, OnOffWaveform,
    },
};

/// Options for degrading curves into on/off waveforms.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OnOffOpts {
    /// Scaled intensity at or above which the motor is switched on.
    pub threshold: f32,
    /// Off time appended after every rendered primitive so back-to-back pulses stay distinct.
    pub gap: Millis,
}

impl Default for OnOffOpts {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            gap: Millis(10),
        }
    }
}

/// Options shared by the sampled renderers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaveformOpts {
    /// Sampling period for amplitude and on/off rendering.
    pub step: Millis,
    pub on_off: OnOffOpts,
}

impl Default for WaveformOpts {
    fn default() -> Self {
        Self {
            step: Millis(10),
            on_off: OnOffOpts::default(),
        }
    }
}

impl WaveformOpts {
    pub fn validate(&self) -> HapticResult<()> {
        if self.step.is_zero() {
            return Err(HapticError::validation("waveform step must be > 0 ms"));
        }
        check_unit(self.on_off.threshold, "on/off threshold")?;
        Ok(())
    }
}

/// Scaled intensity, clamped to `[0, 1]`.
fn scaled(value: f32, scale: f32) -> f32 {
    (value * scale).clamp(0.0, 1.0)
}

fn quantize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// `(start, len)` windows of at most `step` covering `[0, duration)`.
fn windows(duration: Millis, step: Millis) -> impl Iterator<Item = (Millis, Millis)> {
    let step = step.0.max(1);
    (0..duration.0)
        .step_by(usize::try_from(step).unwrap_or(usize::MAX))
        .map(move |t| (Millis(t), Millis(step.min(duration.0 - t))))
}

/// Envelope control points at every keyframe time of either curve within `[0, duration]`, plus
/// both ends.
pub fn render_envelope(curves: &HapticCurves, duration: Millis, scale: f32) -> Envelope {
    let mut times = curves.key_times(duration);
    if times.first() != Some(&Millis::ZERO) {
        times.insert(0, Millis::ZERO);
    }
    if times.last() != Some(&duration) {
        times.push(duration);
    }

    let points = times
        .into_iter()
        .map(|at| EnvelopePoint {
            at,
            intensity: scaled(curves.intensity_at(at), scale),
            sharpness: curves.sharpness_at(at).clamp(0.0, 1.0),
        })
        .collect();
    Envelope { points }
}

/// Intensity sampled at the start of every `opts.step` window and quantized to `0..=255`.
pub fn render_amplitude(
    curves: &HapticCurves,
    duration: Millis,
    scale: f32,
    opts: &WaveformOpts,
) -> AmplitudeWaveform {
    let mut segments: Vec<AmplitudeSegment> = Vec::new();
    for (t, len) in windows(duration, opts.step) {
        let amplitude = quantize(scaled(curves.intensity_at(t), scale));
        if let Some(last) = segments.last_mut().filter(|s| s.amplitude == amplitude) {
            last.duration = last.duration + len;
        } else {
            segments.push(AmplitudeSegment {
                duration: len,
                amplitude,
            });
        }
    }
    AmplitudeWaveform { segments }
}

/// Thresholded intensity run-length encoded into on/off segments, followed by the off gap.
pub fn render_on_off(
    curves: &HapticCurves,
    duration: Millis,
    scale: f32,
    opts: &WaveformOpts,
) -> OnOffWaveform {
    let mut segments: Vec<OnOffSegment> = Vec::new();
    let mut push = |on: bool, len: Millis| {
        if let Some(last) = segments.last_mut().filter(|s| s.on == on) {
            last.duration = last.duration + len;
        } else {
            segments.push(OnOffSegment { duration: len, on });
        }
    };

    for (t, len) in windows(duration, opts.step) {
        let on = scaled(curves.intensity_at(t), scale) >= opts.on_off.threshold;
        push(on, len);
    }
    if !opts.on_off.gap.is_zero() {
        push(false, opts.on_off.gap);
    }
    OnOffWaveform { segments }
}

#[cfg(test)]
#[path = "../../tests/unit/render/waveform.rs"]
mod tests;
