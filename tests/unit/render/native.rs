use super::*;
use crate::effect::primitive::PrimitiveType;

struct ProbeOnly;

impl NativeVibrator for ProbeOnly {
    fn probe(&self) -> PlatformProbe {
        PlatformProbe {
            api_level: 21,
            has_vibrator: true,
            ..PlatformProbe::default()
        }
    }

    fn cancel(&self) {}
}

#[tokio::test]
async fn unimplemented_calls_fail_as_backend_errors() {
    let native = ProbeOnly;
    let composed = ComposedPrimitive {
        kind: PrimitiveType::Click,
        scale: 1.0,
    };

    let err = native.compose(&composed).await.unwrap_err();
    assert!(matches!(err, HapticError::Backend(_)));
    assert!(err.to_string().contains("primitive composition"));

    assert!(native.play_envelope(&Envelope::default()).await.is_err());
    assert!(
        native
            .play_amplitude(&AmplitudeWaveform::default())
            .await
            .is_err()
    );
    assert!(native.play_on_off(&OnOffWaveform::default()).await.is_err());
    assert!(native.vibrate_for(Millis(20)).await.is_err());
}

#[tokio::test]
async fn silent_vibrator_accepts_everything() {
    let probe = PlatformProbe {
        api_level: 36,
        has_vibrator: true,
        supports_composition: true,
        supports_envelopes: true,
        supports_amplitude_control: true,
    };
    let native = SilentVibrator::new(probe);
    assert_eq!(native.probe(), probe);
    assert_eq!(
        native.vibrate_for(Millis(5)).await.unwrap(),
        Completion::Finished
    );
    assert_eq!(
        native.play_envelope(&Envelope::default()).await.unwrap(),
        Completion::Finished
    );
    native.cancel();
}
