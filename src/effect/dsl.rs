use crate::{
    effect::curves::{HapticCurves, Keyframe},
    effect::model::HapticEffect,
    effect::primitive::{
        BasicPrimitive, DEFAULT_CUSTOM_DURATION, DelayType, Primitive, PrimitiveType,
    },
    foundation::core::{Millis, check_unit},
    foundation::error::{HapticError, HapticResult},
};

/// Builds a [`HapticEffect`] one primitive at a time.
///
/// ```
/// use hapticore::{DelayType, HapticEffect, PrimitiveType};
///
/// let effect = HapticEffect::builder()
///     .predefined(PrimitiveType::Click, 1.0)
///     .delayed(PrimitiveType::Tick, 0.5, 40, DelayType::Pause)?
///     .build();
/// assert_eq!(effect.len(), 2);
/// # Ok::<(), hapticore::HapticError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EffectBuilder {
    primitives: Vec<Primitive>,
}

impl EffectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predefined primitive with no delay.
    pub fn predefined(mut self, kind: PrimitiveType, scale: f32) -> Self {
        self.primitives.push(Primitive::predefined(kind, scale));
        self
    }

    /// Append a predefined primitive after `delay_ms`.
    pub fn delayed(
        self,
        kind: PrimitiveType,
        scale: f32,
        delay_ms: i64,
        delay_type: DelayType,
    ) -> HapticResult<Self> {
        let p = PrimitiveBuilder::predefined(kind)
            .scale(scale)
            .delay_ms(delay_ms)?
            .delay_type(delay_type)
            .build()?;
        Ok(self.primitive(p))
    }

    /// Append a custom primitive built from curves.
    pub fn custom(self, builder: PrimitiveBuilder) -> HapticResult<Self> {
        let p = builder.build()?;
        Ok(self.primitive(p))
    }

    /// Append an already validated primitive.
    pub fn primitive(mut self, p: Primitive) -> Self {
        self.primitives.push(p);
        self
    }

    /// Append every primitive of `effect`.
    pub fn effect(mut self, effect: &HapticEffect) -> Self {
        self.primitives.extend(effect.iter().cloned());
        self
    }

    pub fn build(self) -> HapticEffect {
        HapticEffect::new(self.primitives)
    }
}

/// Builds one [`Primitive`].
#[derive(Clone, Debug)]
pub struct PrimitiveBuilder {
    basic: BasicPrimitive,
    delay: Millis,
    delay_type: DelayType,
}

impl PrimitiveBuilder {
    pub fn predefined(kind: PrimitiveType) -> Self {
        Self {
            basic: BasicPrimitive::predefined(kind),
            delay: Millis::ZERO,
            delay_type: DelayType::Pause,
        }
    }

    /// A custom primitive lasting [`DEFAULT_CUSTOM_DURATION`] unless changed with
    /// [`Self::duration_ms`].
    pub fn custom(curves: HapticCurves) -> Self {
        Self {
            basic: BasicPrimitive::Custom {
                duration: DEFAULT_CUSTOM_DURATION,
                curves,
                scale: 1.0,
                fallback: None,
            },
            delay: Millis::ZERO,
            delay_type: DelayType::Pause,
        }
    }

    pub fn scale(mut self, value: f32) -> Self {
        match &mut self.basic {
            BasicPrimitive::Predefined { scale, .. } | BasicPrimitive::Custom { scale, .. } => {
                *scale = value;
            }
        }
        self
    }

    /// Set the custom duration. Has no effect on predefined primitives.
    pub fn duration_ms(mut self, ms: i64) -> HapticResult<Self> {
        if ms <= 0 {
            return Err(HapticError::validation(format!(
                "custom primitive duration must be > 0 ms, got {ms}"
            )));
        }
        if let BasicPrimitive::Custom { duration, .. } = &mut self.basic {
            *duration = Millis(ms as u64);
        }
        Ok(self)
    }

    /// Set the fallback shape. Has no effect on predefined primitives.
    pub fn fallback(mut self, kind: PrimitiveType) -> Self {
        if let BasicPrimitive::Custom { fallback, .. } = &mut self.basic {
            *fallback = Some(kind);
        }
        self
    }

    pub fn delay_ms(mut self, ms: i64) -> HapticResult<Self> {
        self.delay = Millis::from_signed(ms, "delay")?;
        Ok(self)
    }

    pub fn delay_type(mut self, delay_type: DelayType) -> Self {
        self.delay_type = delay_type;
        self
    }

    pub fn build(self) -> HapticResult<Primitive> {
        let p = Primitive {
            basic: self.basic,
            delay: self.delay,
            delay_type: self.delay_type,
        };
        p.validate()?;
        Ok(p)
    }
}

/// Builds [`HapticCurves`], validating every keyframe as it is added.
///
/// Keyframes keep insertion order. A curve left empty receives a `(0ms, 1.0)` keyframe on
/// [`Self::build`].
#[derive(Clone, Debug, Default)]
pub struct CurvesBuilder {
    intensity: Vec<Keyframe>,
    sharpness: Vec<Keyframe>,
}

impl CurvesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intensity(mut self, time_ms: i64, value: f32) -> HapticResult<Self> {
        self.intensity.push(checked_keyframe(time_ms, value, "intensity")?);
        Ok(self)
    }

    pub fn sharpness(mut self, time_ms: i64, value: f32) -> HapticResult<Self> {
        self.sharpness.push(checked_keyframe(time_ms, value, "sharpness")?);
        Ok(self)
    }

    pub fn build(self) -> HapticCurves {
        fn or_default(keys: Vec<Keyframe>) -> Vec<Keyframe> {
            if keys.is_empty() {
                vec![Keyframe::default_start()]
            } else {
                keys
            }
        }

        HapticCurves {
            intensity: or_default(self.intensity),
            sharpness: or_default(self.sharpness),
        }
    }
}

fn checked_keyframe(time_ms: i64, value: f32, curve: &str) -> HapticResult<Keyframe> {
    let time = Millis::from_signed(time_ms, &format!("{curve} keyframe time"))?;
    let value = check_unit(value, &format!("{curve} keyframe value"))?;
    Ok(Keyframe { time, value })
}

#[cfg(test)]
#[path = "../../tests/unit/effect/dsl.rs"]
mod tests;
