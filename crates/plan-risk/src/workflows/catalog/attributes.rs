use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Number of QoS attributes carried by every service record.
pub const ATTRIBUTE_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QosAttribute {
    ResponseTime,
    Availability,
    Throughput,
    Successability,
    Reliability,
    Compliance,
    BestPractices,
    Latency,
    Documentation,
}

impl QosAttribute {
    pub const fn ordered() -> [Self; ATTRIBUTE_COUNT] {
        [
            Self::ResponseTime,
            Self::Availability,
            Self::Throughput,
            Self::Successability,
            Self::Reliability,
            Self::Compliance,
            Self::BestPractices,
            Self::Latency,
            Self::Documentation,
        ]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ResponseTime => "Response Time",
            Self::Availability => "Availability",
            Self::Throughput => "Throughput",
            Self::Successability => "Successability",
            Self::Reliability => "Reliability",
            Self::Compliance => "Compliance",
            Self::BestPractices => "Best Practices",
            Self::Latency => "Latency",
            Self::Documentation => "Documentation",
        }
    }

    /// Polarity is keyed on position 1, 2 and 7 of the threshold tables, not on the label.
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Availability | Self::Throughput | Self::Latency => Polarity::NonBeneficial,
            _ => Polarity::Beneficial,
        }
    }
}

/// Whether a higher raw value is preferred for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Beneficial,
    NonBeneficial,
}

/// The nine QoS values of a service, in contract order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QosVector([f64; ATTRIBUTE_COUNT]);

impl QosVector {
    pub const fn new(values: [f64; ATTRIBUTE_COUNT]) -> Self {
        Self(values)
    }

    pub const fn splat(value: f64) -> Self {
        Self([value; ATTRIBUTE_COUNT])
    }

    pub fn values(&self) -> &[f64; ATTRIBUTE_COUNT] {
        &self.0
    }

    /// Pairs every value with the attribute it describes.
    pub fn iter(&self) -> impl Iterator<Item = (QosAttribute, f64)> + '_ {
        QosAttribute::ordered()
            .into_iter()
            .zip(self.0.iter().copied())
    }

    /// Parses the first nine tokens as numbers; surplus tokens are not inspected.
    pub fn parse_fields<'a, I>(fields: I) -> Result<Self, AttributeParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = [0.0; ATTRIBUTE_COUNT];
        let mut seen = 0;

        for (slot, raw) in values.iter_mut().zip(fields) {
            let token = raw.trim();
            *slot = token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| AttributeParseError::NotANumber {
                    index: seen,
                    token: token.to_string(),
                })?;
            seen += 1;
        }

        if seen < ATTRIBUTE_COUNT {
            return Err(AttributeParseError::TooFew { found: seen });
        }

        Ok(Self(values))
    }
}

impl Index<usize> for QosVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Index<QosAttribute> for QosVector {
    type Output = f64;

    fn index(&self, attribute: QosAttribute) -> &Self::Output {
        &self.0[attribute.index()]
    }
}

impl fmt::Display for QosVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, value) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeParseError {
    #[error("expected 9 attribute values, found {found}")]
    TooFew { found: usize },
    #[error("attribute {index} is not a number: '{token}'")]
    NotANumber { index: usize, token: String },
}
