use super::*;
use crate::{
    effect::primitive::PrimitiveType,
    foundation::core::Millis,
    render::capability::PlatformProbe,
    render::native::SilentVibrator,
};

fn silent(probe: PlatformProbe) -> Arc<dyn NativeVibrator> {
    Arc::new(SilentVibrator::new(probe))
}

fn full_probe() -> PlatformProbe {
    PlatformProbe {
        api_level: 36,
        has_vibrator: true,
        supports_composition: true,
        supports_envelopes: true,
        supports_amplitude_control: true,
    }
}

#[test]
fn config_defaults_and_partial_json() {
    let cfg = VibratorConfig::default();
    assert_eq!(cfg.waveform.step, Millis(10));
    assert_eq!(cfg.waveform.on_off.gap, Millis(10));

    let cfg = VibratorConfig::from_reader(r#"{"waveform":{"on_off":{"gap":25}}}"#.as_bytes())
        .unwrap();
    assert_eq!(cfg.waveform.on_off.gap, Millis(25));
    assert_eq!(cfg.waveform.on_off.threshold, 0.5);
    assert_eq!(cfg.waveform.step, Millis(10));
}

#[test]
fn config_rejects_bad_values() {
    let err = VibratorConfig::from_reader(r#"{"waveform":{"step":0}}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, HapticError::Validation(_)));

    let err = VibratorConfig::from_reader("not json".as_bytes()).unwrap_err();
    assert!(matches!(err, HapticError::Serde(_)));
}

#[test]
fn new_outside_runtime_fails() {
    let err = Vibrator::new(silent(full_probe()), VibratorConfig::default()).unwrap_err();
    assert!(matches!(err, HapticError::Other(_)));
}

#[tokio::test]
async fn reports_probed_tier_and_capabilities() {
    let v = Vibrator::new(silent(full_probe()), VibratorConfig::default()).unwrap();
    assert!(v.is_vibration_supported());
    assert_eq!(v.tier(), Some(RenderTier::Composition));
    assert_eq!(v.capabilities(), Capabilities::all());

    let old = PlatformProbe {
        api_level: 24,
        has_vibrator: true,
        supports_composition: true,
        supports_envelopes: true,
        supports_amplitude_control: true,
    };
    let v = Vibrator::new(silent(old), VibratorConfig::default()).unwrap();
    assert_eq!(v.tier(), Some(RenderTier::OnOff));
}

#[tokio::test]
async fn unsupported_device_ignores_effects() {
    let v = Vibrator::new(silent(PlatformProbe::default()), VibratorConfig::default()).unwrap();
    assert!(!v.is_vibration_supported());
    assert_eq!(v.tier(), None);
    v.vibrate(HapticEffect::builder().predefined(PrimitiveType::Click, 1.0).build());
    assert_eq!(v.stats(), DispatchStats::default());
}

#[tokio::test]
async fn builder_errors_surface_synchronously() {
    let v = Vibrator::new(silent(full_probe()), VibratorConfig::default()).unwrap();
    let err = v
        .vibrate_with(|b| {
            b.delayed(
                PrimitiveType::Click,
                1.0,
                -10,
                crate::effect::primitive::DelayType::Pause,
            )
        })
        .unwrap_err();
    assert!(matches!(err, HapticError::Validation(_)));
    assert_eq!(v.stats().effects_submitted, 0);

    v.vibrate_with(|b| Ok(b.predefined(PrimitiveType::Tick, 0.5)))
        .unwrap();
    assert_eq!(v.stats().effects_submitted, 1);
}
