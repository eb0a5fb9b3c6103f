use super::*;

#[test]
fn from_signed_rejects_negative() {
    assert_eq!(Millis::from_signed(0, "delay").unwrap(), Millis::ZERO);
    assert_eq!(Millis::from_signed(25, "delay").unwrap(), Millis(25));
    let err = Millis::from_signed(-1, "delay").unwrap_err();
    assert!(err.to_string().contains("delay must be >= 0 ms"));
}

#[test]
fn duration_conversions_truncate_to_millis() {
    assert_eq!(Millis(120).as_duration(), Duration::from_millis(120));
    assert_eq!(Millis::from_duration(Duration::from_micros(1_999)), Millis(1));
}

#[test]
fn arithmetic_saturates() {
    assert_eq!(Millis(5).saturating_sub(Millis(9)), Millis::ZERO);
    assert_eq!(Millis(u64::MAX) + Millis(1), Millis(u64::MAX));
    let total: Millis = [Millis(10), Millis(20), Millis(30)].into_iter().sum();
    assert_eq!(total, Millis(60));
}

#[test]
fn check_unit_bounds_are_inclusive() {
    assert!(check_unit(0.0, "value").is_ok());
    assert!(check_unit(1.0, "value").is_ok());
    assert!(check_unit(1.01, "value").is_err());
    assert!(check_unit(-0.01, "value").is_err());
    assert!(check_unit(f32::NAN, "value").is_err());
}

#[test]
fn serializes_as_plain_number() {
    let s = serde_json::to_string(&Millis(42)).unwrap();
    assert_eq!(s, "42");
}
