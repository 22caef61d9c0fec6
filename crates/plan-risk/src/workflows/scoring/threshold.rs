use super::ScoringError;
use crate::workflows::catalog::{Polarity, QosAttribute, QosVector, ATTRIBUTE_COUNT};

/// Caller-supplied reference points for threshold normalization.
///
/// Beneficial attributes are divided by their ideal threshold, non-beneficial ones are
/// scored as `1 - value / critical`. Results saturate into `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdProfile {
    ideal: QosVector,
    critical: QosVector,
}

impl ThresholdProfile {
    pub fn new(ideal: &[f64], critical: &[f64]) -> Result<Self, ScoringError> {
        Ok(Self {
            ideal: vector("ideal thresholds", ideal)?,
            critical: vector("critical thresholds", critical)?,
        })
    }

    pub fn ideal(&self) -> &QosVector {
        &self.ideal
    }

    pub fn critical(&self) -> &QosVector {
        &self.critical
    }

    pub fn normalize(&self, attribute: QosAttribute, value: f64) -> Result<f64, ScoringError> {
        let ratio = match attribute.polarity() {
            Polarity::NonBeneficial => {
                1.0 - value / nonzero(attribute, self.critical[attribute], "critical")?
            }
            Polarity::Beneficial => value / nonzero(attribute, self.ideal[attribute], "ideal")?,
        };

        Ok(ratio.clamp(0.0, 1.0))
    }
}

fn vector(label: &'static str, values: &[f64]) -> Result<QosVector, ScoringError> {
    let array: [f64; ATTRIBUTE_COUNT] =
        values.try_into().map_err(|_| ScoringError::VectorLength {
            label,
            found: values.len(),
        })?;
    Ok(QosVector::new(array))
}

fn nonzero(
    attribute: QosAttribute,
    threshold: f64,
    kind: &'static str,
) -> Result<f64, ScoringError> {
    if threshold == 0.0 {
        Err(ScoringError::ZeroThreshold { attribute, kind })
    } else {
        Ok(threshold)
    }
}
