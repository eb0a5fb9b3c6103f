/// Lowest host API level with native primitive composition.
pub const COMPOSITION_MIN_API: u32 = 30;
/// Lowest host API level with parametric envelopes.
pub const ENVELOPE_MIN_API: u32 = 36;
/// Lowest host API level with amplitude-controlled waveforms.
pub const AMPLITUDE_MIN_API: u32 = 26;

/// Raw facts reported by the host platform, taken once per vibrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlatformProbe {
    pub api_level: u32,
    pub has_vibrator: bool,
    pub supports_composition: bool,
    pub supports_envelopes: bool,
    pub supports_amplitude_control: bool,
}

/// Rendering paths usable on the running device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    pub composition: bool,
    pub envelope: bool,
    pub amplitude: bool,
    pub on_off: bool,
    pub duration_only: bool,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            composition: true,
            envelope: true,
            amplitude: true,
            on_off: true,
            duration_only: true,
        }
    }

    /// Combine the hardware probe with the API level gates.
    pub fn from_probe(probe: &PlatformProbe) -> Self {
        if !probe.has_vibrator {
            return Self::none();
        }
        Self {
            composition: probe.supports_composition && probe.api_level >= COMPOSITION_MIN_API,
            envelope: probe.supports_envelopes && probe.api_level >= ENVELOPE_MIN_API,
            amplitude: probe.supports_amplitude_control && probe.api_level >= AMPLITUDE_MIN_API,
            on_off: true,
            duration_only: true,
        }
    }

    pub fn supports(&self, tier: RenderTier) -> bool {
        match tier {
            RenderTier::Composition => self.composition,
            RenderTier::Envelope => self.envelope,
            RenderTier::Amplitude => self.amplitude,
            RenderTier::OnOff => self.on_off,
            RenderTier::DurationOnly => self.duration_only,
        }
    }

    pub fn is_empty(&self) -> bool {
        select_tier(self).is_none()
    }
}

/// Native rendering strategies, richest first.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RenderTier {
    Composition,
    Envelope,
    Amplitude,
    OnOff,
    DurationOnly,
}

impl RenderTier {
    /// Preference order used by [`select_tier`].
    pub const PREFERENCE: [Self; 5] = [
        Self::Composition,
        Self::Envelope,
        Self::Amplitude,
        Self::OnOff,
        Self::DurationOnly,
    ];

    /// Whether this tier renders custom curves on its own.
    pub fn renders_curves(self) -> bool {
        matches!(self, Self::Envelope | Self::Amplitude | Self::OnOff)
    }
}

/// Richest supported tier, or `None` when the device cannot vibrate.
pub fn select_tier(caps: &Capabilities) -> Option<RenderTier> {
    RenderTier::PREFERENCE
        .into_iter()
        .find(|tier| caps.supports(*tier))
}

#[cfg(test)]
#[path = "../../tests/unit/render/capability.rs"]
mod tests;
