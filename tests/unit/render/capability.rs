use super::*;

fn probe(api_level: u32) -> PlatformProbe {
    PlatformProbe {
        api_level,
        has_vibrator: true,
        supports_composition: true,
        supports_envelopes: true,
        supports_amplitude_control: true,
    }
}

#[test]
fn no_vibrator_means_no_capabilities() {
    let caps = Capabilities::from_probe(&PlatformProbe {
        has_vibrator: false,
        ..probe(40)
    });
    assert_eq!(caps, Capabilities::none());
    assert_eq!(select_tier(&caps), None);
    assert!(caps.is_empty());
}

#[test]
fn api_level_gates_each_tier() {
    assert_eq!(
        select_tier(&Capabilities::from_probe(&probe(36))),
        Some(RenderTier::Composition)
    );
    assert_eq!(
        select_tier(&Capabilities::from_probe(&probe(29))),
        Some(RenderTier::Amplitude)
    );
    assert_eq!(
        select_tier(&Capabilities::from_probe(&probe(21))),
        Some(RenderTier::OnOff)
    );

    let caps = Capabilities::from_probe(&probe(33));
    assert!(caps.composition);
    assert!(!caps.envelope);
}

#[test]
fn hardware_flags_gate_each_tier() {
    let caps = Capabilities::from_probe(&PlatformProbe {
        supports_composition: false,
        ..probe(36)
    });
    assert_eq!(select_tier(&caps), Some(RenderTier::Envelope));

    let caps = Capabilities::from_probe(&PlatformProbe {
        supports_composition: false,
        supports_envelopes: false,
        supports_amplitude_control: false,
        ..probe(36)
    });
    assert_eq!(select_tier(&caps), Some(RenderTier::OnOff));
}

#[test]
fn selection_follows_strict_preference_order() {
    let mut caps = Capabilities::all();
    let mut seen = Vec::new();
    while let Some(tier) = select_tier(&caps) {
        seen.push(tier);
        match tier {
            RenderTier::Composition => caps.composition = false,
            RenderTier::Envelope => caps.envelope = false,
            RenderTier::Amplitude => caps.amplitude = false,
            RenderTier::OnOff => caps.on_off = false,
            RenderTier::DurationOnly => caps.duration_only = false,
        }
    }
    assert_eq!(seen, RenderTier::PREFERENCE.to_vec());
}

#[test]
fn only_middle_tiers_render_curves() {
    assert!(!RenderTier::Composition.renders_curves());
    assert!(RenderTier::Envelope.renders_curves());
    assert!(RenderTier::Amplitude.renders_curves());
    assert!(RenderTier::OnOff.renders_curves());
    assert!(!RenderTier::DurationOnly.renders_curves());
}
