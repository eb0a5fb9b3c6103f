use crate::{
    effect::curves::{HapticCurves, Keyframe},
    foundation::core::Millis,
    foundation::error::{HapticError, HapticResult},
};

/// Default duration of a custom primitive when the caller does not set one.
pub const DEFAULT_CUSTOM_DURATION: Millis = Millis(50);

/// Predefined primitive shapes every backend knows how to render.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum PrimitiveType {
    Click,
    Thud,
    Spin,
    QuickRise,
    SlowRise,
    QuickFall,
    Tick,
    LowTick,
}

impl PrimitiveType {
    pub const ALL: [Self; 8] = [
        Self::Click,
        Self::Thud,
        Self::Spin,
        Self::QuickRise,
        Self::SlowRise,
        Self::QuickFall,
        Self::Tick,
        Self::LowTick,
    ];

    /// Playback length assumed whenever the native side does not report one.
    pub fn nominal_duration(self) -> Millis {
        match self {
            Self::Click => Millis(50),
            Self::Thud => Millis(80),
            Self::Spin => Millis(120),
            Self::QuickRise => Millis(50),
            Self::SlowRise => Millis(200),
            Self::QuickFall => Millis(60),
            Self::Tick => Millis(10),
            Self::LowTick => Millis(20),
        }
    }

    /// Intensity/sharpness shape spanning [`Self::nominal_duration`].
    ///
    /// Tiers without native predefined primitives render this curve instead.
    pub fn signature(self) -> HapticCurves {
        fn kf(ms: u64, value: f32) -> Keyframe {
            Keyframe {
                time: Millis(ms),
                value,
            }
        }

        let (intensity, sharpness) = match self {
            Self::Click => (vec![kf(0, 1.0), kf(20, 0.6), kf(50, 0.0)], vec![kf(0, 0.9)]),
            Self::Thud => (vec![kf(0, 1.0), kf(80, 0.2)], vec![kf(0, 0.2)]),
            Self::Spin => (
                vec![kf(0, 0.3), kf(60, 0.8), kf(120, 0.3)],
                vec![kf(0, 0.5)],
            ),
            Self::QuickRise => (vec![kf(0, 0.0), kf(50, 1.0)], vec![kf(0, 0.6)]),
            Self::SlowRise => (vec![kf(0, 0.0), kf(200, 1.0)], vec![kf(0, 0.4)]),
            Self::QuickFall => (vec![kf(0, 1.0), kf(60, 0.0)], vec![kf(0, 0.6)]),
            Self::Tick => (vec![kf(0, 0.6)], vec![kf(0, 1.0)]),
            Self::LowTick => (vec![kf(0, 0.5)], vec![kf(0, 0.1)]),
        };
        HapticCurves {
            intensity,
            sharpness,
        }
    }
}

/// One vibration unit, either a predefined shape or a custom curve.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BasicPrimitive {
    Predefined {
        kind: PrimitiveType,
        /// Intensity multiplier, conceptually in `[0, 1]` but not clamped.
        scale: f32,
    },
    Custom {
        /// Total playback length, always > 0.
        duration: Millis,
        curves: HapticCurves,
        /// Intensity multiplier, conceptually in `[0, 1]` but not clamped.
        scale: f32,
        /// Predefined shape to render when the backend cannot render curves.
        fallback: Option<PrimitiveType>,
    },
}

impl BasicPrimitive {
    pub fn predefined(kind: PrimitiveType) -> Self {
        Self::Predefined { kind, scale: 1.0 }
    }

    pub fn scale(&self) -> f32 {
        match self {
            Self::Predefined { scale, .. } | Self::Custom { scale, .. } => *scale,
        }
    }

    /// Intrinsic duration: the type's nominal duration or the custom duration.
    pub fn intrinsic_duration(&self) -> Millis {
        match self {
            Self::Predefined { kind, .. } => kind.nominal_duration(),
            Self::Custom { duration, .. } => *duration,
        }
    }

    pub fn kind(&self) -> Option<PrimitiveType> {
        match self {
            Self::Predefined { kind, .. } => Some(*kind),
            Self::Custom { .. } => None,
        }
    }

    pub fn validate(&self) -> HapticResult<()> {
        match self {
            Self::Predefined { .. } => Ok(()),
            Self::Custom {
                duration, curves, ..
            } => {
                if duration.is_zero() {
                    return Err(HapticError::validation(
                        "custom primitive duration must be > 0 ms",
                    ));
                }
                curves.validate()
            }
        }
    }
}

/// How a primitive's delay relates to its predecessor.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum DelayType {
    /// Wait `delay` after the previous primitive finished.
    #[default]
    Pause,
    /// Start `delay` after the previous primitive started.
    RelativeStartOffset,
}

/// A [`BasicPrimitive`] placed in a composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Primitive {
    pub basic: BasicPrimitive,
    #[serde(default)]
    pub delay: Millis,
    #[serde(default)]
    pub delay_type: DelayType,
}

impl Primitive {
    /// A primitive with no delay.
    pub fn new(basic: BasicPrimitive) -> Self {
        Self {
            basic,
            delay: Millis::ZERO,
            delay_type: DelayType::Pause,
        }
    }

    pub fn predefined(kind: PrimitiveType, scale: f32) -> Self {
        Self::new(BasicPrimitive::Predefined { kind, scale })
    }

    pub fn validate(&self) -> HapticResult<()> {
        self.basic.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/primitive.rs"]
mod tests;
