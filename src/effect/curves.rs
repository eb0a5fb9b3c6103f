use crate::{
    foundation::core::{Millis, check_unit},
    foundation::error::{HapticError, HapticResult},
};

/// Value a curve takes when it has no keyframes.
pub const DEFAULT_CURVE_VALUE: f32 = 1.0;

/// A control point on an intensity or sharpness curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub time: Millis,
    /// Normalized value in `[0, 1]`.
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: Millis, value: f32) -> Self {
        Self { time, value }
    }

    /// The keyframe builders inject into a curve that received none.
    pub fn default_start() -> Self {
        Self {
            time: Millis::ZERO,
            value: DEFAULT_CURVE_VALUE,
        }
    }
}

/// Intensity and sharpness curves of a custom primitive.
///
/// Keyframes keep insertion order. Times may repeat or go backwards; sampling handles both.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HapticCurves {
    pub intensity: Vec<Keyframe>, // insertion order
    pub sharpness: Vec<Keyframe>, // insertion order
}

impl Default for HapticCurves {
    fn default() -> Self {
        Self {
            intensity: vec![Keyframe::default_start()],
            sharpness: vec![Keyframe::default_start()],
        }
    }
}

impl HapticCurves {
    /// Both curves need at least one keyframe; values must lie in `[0, 1]`.
    pub fn validate(&self) -> HapticResult<()> {
        if self.intensity.is_empty() {
            return Err(HapticError::validation("intensity curve has no keyframes"));
        }
        if self.sharpness.is_empty() {
            return Err(HapticError::validation("sharpness curve has no keyframes"));
        }
        for k in &self.intensity {
            check_unit(k.value, "intensity keyframe value")?;
        }
        for k in &self.sharpness {
            check_unit(k.value, "sharpness keyframe value")?;
        }
        Ok(())
    }

    pub fn intensity_at(&self, t: Millis) -> f32 {
        sample(&self.intensity, t).unwrap_or(DEFAULT_CURVE_VALUE)
    }

    pub fn sharpness_at(&self, t: Millis) -> f32 {
        sample(&self.sharpness, t).unwrap_or(DEFAULT_CURVE_VALUE)
    }

    /// Sorted, deduplicated keyframe times of both curves that fall within `[0, end]`.
    pub fn key_times(&self, end: Millis) -> Vec<Millis> {
        let mut times: Vec<Millis> = self
            .intensity
            .iter()
            .chain(self.sharpness.iter())
            .map(|k| k.time)
            .filter(|t| *t <= end)
            .collect();
        times.sort_unstable();
        times.dedup();
        times
    }
}

/// Piecewise-linear value of `keys` at time `t`.
///
/// Lookup is a linear scan in insertion order:
/// - an exact-time keyframe wins (first one in list order);
/// - `prev` is the keyframe with the largest time below `t`, or the first keyframe in list order
///   when none is below `t`;
/// - `next` is the keyframe with the smallest time above `t`; without one the value of `prev` is
///   held.
///
/// Returns `None` only for an empty list.
pub fn sample(keys: &[Keyframe], t: Millis) -> Option<f32> {
    let first = keys.first()?;

    if let Some(exact) = keys.iter().find(|k| k.time == t) {
        return Some(exact.value);
    }

    let mut prev: Option<&Keyframe> = None;
    let mut next: Option<&Keyframe> = None;
    for k in keys {
        if k.time < t && prev.is_none_or(|p| k.time > p.time) {
            prev = Some(k);
        }
        if k.time > t && next.is_none_or(|n| k.time < n.time) {
            next = Some(k);
        }
    }

    let a = prev.unwrap_or(first);
    let Some(b) = next else {
        return Some(a.value);
    };

    let denom = b.time.as_f64() - a.time.as_f64();
    if denom == 0.0 {
        return Some(a.value);
    }
    let frac = (t.as_f64() - a.time.as_f64()) / denom;
    let a_v = f64::from(a.value);
    let b_v = f64::from(b.value);
    Some((a_v + (b_v - a_v) * frac) as f32)
}

#[cfg(test)]
#[path = "../../tests/unit/effect/curves.rs"]
mod tests;
