use crate::{
    effect::model::HapticEffect,
    effect::primitive::{DelayType, Primitive},
    foundation::core::Millis,
};

/// Wait-before-play delay for every primitive of a composition.
///
/// `delays[i]` is measured from the moment primitive `i - 1` finished playing (or from dispatch
/// start for the first primitive). A `RelativeStartOffset` delay subtracts the previous
/// primitive's configured delay, clamped at zero. It does not account for the previous
/// primitive's real playback length, so overlapping starts collapse to an immediate start.
pub fn resolve_delays(primitives: &[Primitive]) -> Vec<Millis> {
    let Some(first) = primitives.first() else {
        return Vec::new();
    };

    let mut delays = Vec::with_capacity(primitives.len());
    delays.push(first.delay);
    for pair in primitives.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let wait = match next.delay_type {
            DelayType::Pause => next.delay,
            DelayType::RelativeStartOffset => next.delay.saturating_sub(current.delay),
        };
        delays.push(wait);
    }
    delays
}

/// One primitive paired with its resolved wait.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimedStep {
    pub primitive: Primitive,
    pub wait: Millis,
}

/// Playback plan of one effect.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    pub steps: Vec<TimedStep>,
    /// Best-effort estimate: sum of every step's wait and intrinsic duration.
    pub nominal_duration: Millis,
}

impl Timeline {
    #[tracing::instrument(skip(effect), fields(primitives = effect.len()))]
    pub fn resolve(effect: &HapticEffect) -> Self {
        let delays = resolve_delays(effect.primitives());
        let steps: Vec<TimedStep> = effect
            .iter()
            .zip(delays)
            .map(|(p, wait)| TimedStep {
                primitive: p.clone(),
                wait,
            })
            .collect();
        let nominal_duration = steps
            .iter()
            .map(|s| s.wait + s.primitive.basic.intrinsic_duration())
            .sum();
        Self {
            steps,
            nominal_duration,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Nominal start offset of every step from dispatch start.
    pub fn start_offsets(&self) -> Vec<Millis> {
        let mut at = Millis::ZERO;
        self.steps
            .iter()
            .map(|s| {
                let start = at + s.wait;
                at = start + s.primitive.basic.intrinsic_duration();
                start
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/resolver.rs"]
mod tests;
