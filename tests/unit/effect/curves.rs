use super::*;

fn kf(ms: u64, value: f32) -> Keyframe {
    Keyframe::new(Millis(ms), value)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn exact_time_returns_keyframe_value() {
    let keys = vec![kf(0, 0.1), kf(30, 0.9), kf(70, 0.4), kf(100, 0.0)];
    for k in &keys {
        assert_eq!(sample(&keys, k.time), Some(k.value));
    }
}

#[test]
fn midpoint_interpolates_linearly() {
    let keys = vec![kf(0, 0.2), kf(100, 0.8)];
    assert!(approx(sample(&keys, Millis(50)).unwrap(), 0.5));
    assert!(approx(sample(&keys, Millis(25)).unwrap(), 0.35));
}

#[test]
fn holds_last_value_past_the_end() {
    let keys = vec![kf(0, 0.2), kf(100, 0.8)];
    assert_eq!(sample(&keys, Millis(101)), Some(0.8));
    assert_eq!(sample(&keys, Millis(10_000)), Some(0.8));
}

#[test]
fn empty_curve_has_no_value() {
    assert_eq!(sample(&[], Millis(0)), None);
    let curves = HapticCurves {
        intensity: vec![],
        sharpness: vec![],
    };
    assert_eq!(curves.intensity_at(Millis(5)), DEFAULT_CURVE_VALUE);
    assert_eq!(curves.sharpness_at(Millis(5)), DEFAULT_CURVE_VALUE);
}

#[test]
fn before_first_key_interpolates_from_first_in_list_order() {
    // No keyframe lies before t=20, so `prev` falls back to the first keyframe in insertion
    // order (time 100), not the earliest one (time 50). The result extrapolates along the
    // 100 -> 50 segment.
    let keys = vec![kf(100, 0.5), kf(50, 0.2)];
    let v = sample(&keys, Millis(20)).unwrap();
    assert!(approx(v, 0.02), "got {v}");
}

#[test]
fn before_first_key_in_sorted_order_interpolates_from_it() {
    let keys = vec![kf(10, 0.4), kf(20, 0.6)];
    // prev falls back to (10, 0.4) and next is the same keyframe: zero span holds its value.
    let v = sample(&keys, Millis(5)).unwrap();
    assert_eq!(v, 0.4);
}

#[test]
fn out_of_order_keys_use_nearest_times_not_positions() {
    let keys = vec![kf(100, 1.0), kf(0, 0.0), kf(50, 0.5)];
    assert!(approx(sample(&keys, Millis(25)).unwrap(), 0.25));
    assert!(approx(sample(&keys, Millis(75)).unwrap(), 0.75));
}

#[test]
fn duplicate_times_resolve_to_first_inserted() {
    let keys = vec![kf(0, 0.0), kf(40, 0.3), kf(40, 0.9), kf(80, 0.0)];
    assert_eq!(sample(&keys, Millis(40)), Some(0.3));
    // prev for t=60 is the first keyframe at 40 (ties keep list order).
    assert!(approx(sample(&keys, Millis(60)).unwrap(), 0.15));
}

#[test]
fn key_times_are_sorted_unique_and_bounded() {
    let curves = HapticCurves {
        intensity: vec![kf(40, 1.0), kf(0, 0.0), kf(200, 0.5)],
        sharpness: vec![kf(40, 0.2), kf(10, 0.1)],
    };
    assert_eq!(
        curves.key_times(Millis(100)),
        vec![Millis(0), Millis(10), Millis(40)]
    );
}

#[test]
fn validate_rejects_out_of_range_values() {
    let curves = HapticCurves {
        intensity: vec![kf(0, 1.5)],
        sharpness: vec![kf(0, 0.5)],
    };
    assert!(curves.validate().is_err());
    assert!(HapticCurves::default().validate().is_ok());
}

#[test]
fn validate_rejects_empty_curves() {
    let no_intensity = HapticCurves {
        intensity: vec![],
        sharpness: vec![kf(0, 0.5)],
    };
    assert!(no_intensity.validate().is_err());

    let no_sharpness = HapticCurves {
        intensity: vec![kf(0, 0.5)],
        sharpness: vec![],
    };
    assert!(no_sharpness.validate().is_err());
}
