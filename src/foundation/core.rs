use std::time::Duration;

use crate::foundation::error::{HapticError, HapticResult};

/// A non-negative span of time in whole milliseconds.
///
/// All delays, durations and keyframe times in the effect model use this type.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0);

    /// Checked conversion from signed caller input. Negative values are a validation error.
    pub fn from_signed(ms: i64, what: &str) -> HapticResult<Self> {
        if ms < 0 {
            return Err(HapticError::validation(format!(
                "{what} must be >= 0 ms, got {ms}"
            )));
        }
        Ok(Self(ms as u64))
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Truncates sub-millisecond precision; saturates at `u64::MAX` ms.
    pub fn from_duration(d: Duration) -> Self {
        Self(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for Millis {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl std::iter::Sum for Millis {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

impl From<Millis> for Duration {
    fn from(m: Millis) -> Self {
        m.as_duration()
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Checks a normalized control value (intensity, sharpness, threshold).
pub(crate) fn check_unit(value: f32, what: &str) -> HapticResult<f32> {
    if !(0.0..=1.0).contains(&value) {
        return Err(HapticError::validation(format!(
            "{what} must be within [0, 1], got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
