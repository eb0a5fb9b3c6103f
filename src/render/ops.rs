use crate::{effect::primitive::PrimitiveType, foundation::core::Millis};

/// A predefined primitive for native composition engines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComposedPrimitive {
    pub kind: PrimitiveType,
    pub scale: f32,
}

/// One control point of a parametric envelope.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnvelopePoint {
    /// Offset from the start of the envelope.
    pub at: Millis,
    /// Scaled and clamped to `[0, 1]`.
    pub intensity: f32,
    pub sharpness: f32,
}

/// Control points in strictly increasing `at` order, starting at zero.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Envelope {
    pub points: Vec<EnvelopePoint>,
}

impl Envelope {
    pub fn duration(&self) -> Millis {
        self.points.last().map_or(Millis::ZERO, |p| p.at)
    }
}

/// A constant-amplitude run of an amplitude waveform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AmplitudeSegment {
    pub duration: Millis,
    pub amplitude: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AmplitudeWaveform {
    pub segments: Vec<AmplitudeSegment>, // adjacent amplitudes differ
}

impl AmplitudeWaveform {
    pub fn duration(&self) -> Millis {
        self.segments.iter().map(|s| s.duration).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OnOffSegment {
    pub duration: Millis,
    pub on: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OnOffWaveform {
    pub segments: Vec<OnOffSegment>, // adjacent states differ
}

impl OnOffWaveform {
    pub fn duration(&self) -> Millis {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Alternating off/on timings, always starting with an off segment (possibly zero).
    pub fn timings(&self) -> Vec<Millis> {
        let mut out = Vec::with_capacity(self.segments.len() + 1);
        if self.segments.first().is_some_and(|s| s.on) {
            out.push(Millis::ZERO);
        }
        out.extend(self.segments.iter().map(|s| s.duration));
        out
    }

    pub fn on_time(&self) -> Millis {
        self.segments
            .iter()
            .filter(|s| s.on)
            .map(|s| s.duration)
            .sum()
    }
}

/// What a backend hands to the native layer for one primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RenderOp {
    Compose(ComposedPrimitive),
    Envelope(Envelope),
    Amplitude(AmplitudeWaveform),
    OnOff(OnOffWaveform),
    Vibrate(Millis),
    /// Nothing is played; the worker only waits.
    Pause(Millis),
}

impl RenderOp {
    /// Estimated playback time, used when the native side reports no completion.
    pub fn duration(&self) -> Millis {
        match self {
            Self::Compose(p) => p.kind.nominal_duration(),
            Self::Envelope(e) => e.duration(),
            Self::Amplitude(w) => w.duration(),
            Self::OnOff(w) => w.duration(),
            Self::Vibrate(d) | Self::Pause(d) => *d,
        }
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Self::Pause(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ops.rs"]
mod tests;
