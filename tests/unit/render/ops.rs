use super::*;

fn seg(ms: u64, on: bool) -> OnOffSegment {
    OnOffSegment {
        duration: Millis(ms),
        on,
    }
}

#[test]
fn on_off_timings_start_with_off() {
    let w = OnOffWaveform {
        segments: vec![seg(30, true), seg(20, false)],
    };
    assert_eq!(w.timings(), vec![Millis(0), Millis(30), Millis(20)]);

    let w = OnOffWaveform {
        segments: vec![seg(10, false), seg(40, true), seg(10, false)],
    };
    assert_eq!(w.timings(), vec![Millis(10), Millis(40), Millis(10)]);
    assert_eq!(w.on_time(), Millis(40));
    assert_eq!(w.duration(), Millis(60));
}

#[test]
fn op_durations() {
    let compose = RenderOp::Compose(ComposedPrimitive {
        kind: PrimitiveType::Spin,
        scale: 1.0,
    });
    assert_eq!(compose.duration(), Millis(120));

    let env = RenderOp::Envelope(Envelope {
        points: vec![
            EnvelopePoint {
                at: Millis(0),
                intensity: 0.0,
                sharpness: 0.5,
            },
            EnvelopePoint {
                at: Millis(75),
                intensity: 1.0,
                sharpness: 0.5,
            },
        ],
    });
    assert_eq!(env.duration(), Millis(75));

    let amp = RenderOp::Amplitude(AmplitudeWaveform {
        segments: vec![
            AmplitudeSegment {
                duration: Millis(10),
                amplitude: 255,
            },
            AmplitudeSegment {
                duration: Millis(5),
                amplitude: 40,
            },
        ],
    });
    assert_eq!(amp.duration(), Millis(15));

    assert_eq!(RenderOp::Vibrate(Millis(33)).duration(), Millis(33));
    assert!(RenderOp::Pause(Millis(9)).is_pause());
    assert_eq!(RenderOp::Pause(Millis(9)).duration(), Millis(9));
    assert_eq!(Envelope::default().duration(), Millis::ZERO);
}
