use std::fs::File;
use std::io::BufReader;
use std::ops::{Add, Sub};
use std::path::Path;

use crate::{
    effect::dsl::EffectBuilder,
    effect::primitive::{Primitive, PrimitiveType},
    foundation::core::Millis,
    foundation::error::{HapticError, HapticResult},
};

/// An ordered composition of primitives.
///
/// Effects are values: the arithmetic operators return new effects and never mutate in place.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct HapticEffect {
    primitives: Vec<Primitive>,
}

impl HapticEffect {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> EffectBuilder {
        EffectBuilder::new()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }

    /// Sum of intrinsic durations, ignoring delays.
    pub fn intrinsic_duration(&self) -> Millis {
        self.primitives
            .iter()
            .map(|p| p.basic.intrinsic_duration())
            .sum()
    }

    /// Re-check builder invariants for effects that were not produced by a builder.
    pub fn validate(&self) -> HapticResult<()> {
        for (i, p) in self.primitives.iter().enumerate() {
            p.validate()
                .map_err(|e| HapticError::validation(format!("primitive {i}: {e}")))?;
        }
        Ok(())
    }

    /// Parse and validate an effect from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HapticResult<Self> {
        let effect: Self = serde_json::from_reader(r)
            .map_err(|e| HapticError::serde(format!("parse effect JSON: {e}")))?;
        effect.validate()?;
        Ok(effect)
    }

    pub fn from_json_str(s: &str) -> HapticResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse and validate an effect from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HapticResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HapticError::validation(format!("open effect JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Drops every predefined primitive of `kind`. Custom primitives are always kept.
    pub fn without_kind(&self, kind: PrimitiveType) -> Self {
        let primitives = self
            .primitives
            .iter()
            .filter(|p| p.basic.kind() != Some(kind))
            .cloned()
            .collect();
        Self { primitives }
    }
}

impl From<Vec<Primitive>> for HapticEffect {
    fn from(primitives: Vec<Primitive>) -> Self {
        Self::new(primitives)
    }
}

impl From<Primitive> for HapticEffect {
    fn from(p: Primitive) -> Self {
        Self::new(vec![p])
    }
}

impl<'a> IntoIterator for &'a HapticEffect {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

impl Add<Primitive> for HapticEffect {
    type Output = HapticEffect;

    fn add(mut self, rhs: Primitive) -> HapticEffect {
        self.primitives.push(rhs);
        self
    }
}

impl Add<HapticEffect> for HapticEffect {
    type Output = HapticEffect;

    fn add(mut self, rhs: HapticEffect) -> HapticEffect {
        self.primitives.extend(rhs.primitives);
        self
    }
}

/// Removes the first primitive equal to `rhs`.
impl Sub<&Primitive> for HapticEffect {
    type Output = HapticEffect;

    fn sub(mut self, rhs: &Primitive) -> HapticEffect {
        if let Some(pos) = self.primitives.iter().position(|p| p == rhs) {
            self.primitives.remove(pos);
        }
        self
    }
}

/// Removes every primitive that also appears in `rhs`.
impl Sub<&HapticEffect> for HapticEffect {
    type Output = HapticEffect;

    fn sub(mut self, rhs: &HapticEffect) -> HapticEffect {
        self.primitives.retain(|p| !rhs.primitives.contains(p));
        self
    }
}

impl Sub<PrimitiveType> for HapticEffect {
    type Output = HapticEffect;

    fn sub(self, rhs: PrimitiveType) -> HapticEffect {
        self.without_kind(rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/model.rs"]
mod tests;
