use super::ScoringError;
use crate::workflows::catalog::{QosVector, ATTRIBUTE_COUNT};
use serde::Serialize;

/// Equal weight applied to every attribute by default; nine of them sum to 0.9.
pub const DEFAULT_WEIGHT: f64 = 0.1;

/// Per-attribute weights applied to the (possibly normalized) QoS values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights(QosVector);

impl Default for Weights {
    fn default() -> Self {
        Self(QosVector::splat(DEFAULT_WEIGHT))
    }
}

impl Weights {
    pub const fn new(values: [f64; ATTRIBUTE_COUNT]) -> Self {
        Self(QosVector::new(values))
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, ScoringError> {
        let array: [f64; ATTRIBUTE_COUNT] =
            values.try_into().map_err(|_| ScoringError::VectorLength {
                label: "weights",
                found: values.len(),
            })?;
        Ok(Self::new(array))
    }

    pub fn values(&self) -> &[f64; ATTRIBUTE_COUNT] {
        self.0.values()
    }

    /// Dot product with `attributes`, in attribute order.
    pub fn apply(&self, attributes: &QosVector) -> f64 {
        self.values()
            .iter()
            .zip(attributes.values())
            .map(|(weight, value)| weight * value)
            .sum()
    }
}
