use super::{HistoricalRange, ScoringError, ThresholdProfile};
use crate::workflows::catalog::{QosAttribute, QosVector, ATTRIBUTE_COUNT};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Method names accepted on the command line. Serialized under the same names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    #[serde(rename = "old")]
    RawWeighted,
    Historical,
    Threshold,
}

impl MethodKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RawWeighted => "old",
            Self::Historical => "historical",
            Self::Threshold => "threshold",
        }
    }

    /// Header of the score column in the risk report.
    pub const fn score_column(self) -> &'static str {
        match self {
            Self::RawWeighted => "RiskScore",
            Self::Historical => "H-RiskScore",
            Self::Threshold => "T-RiskScore",
        }
    }
}

impl FromStr for MethodKind {
    type Err = ScoringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "old" | "raw" => Ok(Self::RawWeighted),
            "historical" => Ok(Self::Historical),
            "threshold" => Ok(Self::Threshold),
            _ => Err(ScoringError::UnknownMethod(value.to_string())),
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully configured scoring method. Each variant carries only what it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringMethod {
    /// Weighted sum of raw values, min-max rescaled over the batch afterwards.
    RawWeighted,
    Historical(HistoricalRange),
    Threshold(ThresholdProfile),
}

impl ScoringMethod {
    pub fn kind(&self) -> MethodKind {
        match self {
            Self::RawWeighted => MethodKind::RawWeighted,
            Self::Historical(_) => MethodKind::Historical,
            Self::Threshold(_) => MethodKind::Threshold,
        }
    }

    pub(crate) fn rescales_batch(&self) -> bool {
        matches!(self, Self::RawWeighted)
    }

    /// Maps raw attribute values into the space the weights are applied to.
    pub(crate) fn normalize(&self, attributes: &QosVector) -> Result<QosVector, ScoringError> {
        match self {
            Self::RawWeighted => Ok(*attributes),
            Self::Historical(range) => {
                normalize_each(attributes, |attribute, value| range.normalize(attribute, value))
            }
            Self::Threshold(profile) => normalize_each(attributes, |attribute, value| {
                profile.normalize(attribute, value)
            }),
        }
    }
}

fn normalize_each<F>(attributes: &QosVector, mut normalize: F) -> Result<QosVector, ScoringError>
where
    F: FnMut(QosAttribute, f64) -> Result<f64, ScoringError>,
{
    let mut normalized = [0.0; ATTRIBUTE_COUNT];
    for (slot, (attribute, value)) in normalized.iter_mut().zip(attributes.iter()) {
        *slot = normalize(attribute, value)?;
    }
    Ok(QosVector::new(normalized))
}

/// Unvalidated method selection as it arrives from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRequest {
    pub kind: MethodKind,
    pub reference: Option<PathBuf>,
    pub ideal: Option<Vec<f64>>,
    pub critical: Option<Vec<f64>>,
}

impl MethodRequest {
    pub fn new(kind: MethodKind) -> Self {
        Self {
            kind,
            reference: None,
            ideal: None,
            critical: None,
        }
    }

    /// Checks every parameter the method needs before reading the historical
    /// reference dataset.
    pub fn resolve(self) -> Result<ScoringMethod, ScoringError> {
        let method = self.kind.label();
        let missing = |parameter: &'static str| ScoringError::MissingParameter { method, parameter };

        match self.kind {
            MethodKind::RawWeighted => Ok(ScoringMethod::RawWeighted),
            MethodKind::Historical => {
                let reference = self
                    .reference
                    .ok_or_else(|| missing("a historical reference dataset path"))?;
                Ok(ScoringMethod::Historical(HistoricalRange::from_path(
                    reference,
                )?))
            }
            MethodKind::Threshold => {
                let ideal = self.ideal.ok_or_else(|| missing("ideal thresholds"))?;
                let critical = self
                    .critical
                    .ok_or_else(|| missing("critical thresholds"))?;
                Ok(ScoringMethod::Threshold(ThresholdProfile::new(
                    &ideal, &critical,
                )?))
            }
        }
    }
}
