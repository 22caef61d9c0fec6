//! Plan risk scoring: input parsing, per-method attribute normalization, per-plan
//! aggregation, batch rescaling and the CSV report.

mod engine;
mod historical;
mod input;
mod method;
pub mod normalizer;
mod report;
mod threshold;
mod weights;

pub use engine::{PlanScore, ScoringEngine};
pub use historical::HistoricalRange;
pub use input::{PlanInput, ServicePlan};
pub use method::{MethodKind, MethodRequest, ScoringMethod};
pub use report::{write_report, ReportLayout};
pub use threshold::ThresholdProfile;
pub use weights::Weights;

use crate::workflows::catalog::QosAttribute;

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("io failure while scoring: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid csv data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
    #[error("historical reference line {line}: {reason}")]
    MalformedReference { line: u64, reason: String },
    #[error("{label} must contain 9 values, found {found}")]
    VectorLength { label: &'static str, found: usize },
    #[error("plan {plan} references service {service}, which has no attribute declaration")]
    UnknownService { plan: String, service: String },
    #[error("unknown scoring method '{0}' (expected old, historical or threshold)")]
    UnknownMethod(String),
    #[error("scoring method '{method}' requires {parameter}")]
    MissingParameter {
        method: &'static str,
        parameter: &'static str,
    },
    #[error("historical reference dataset contains no rows")]
    EmptyReference,
    #[error(
        "attribute {} ({}) has a zero-width historical range at {value}",
        .attribute.index(),
        .attribute.label()
    )]
    DegenerateRange { attribute: QosAttribute, value: f64 },
    #[error(
        "attribute {} ({}) has a zero {kind} threshold",
        .attribute.index(),
        .attribute.label()
    )]
    ZeroThreshold {
        attribute: QosAttribute,
        kind: &'static str,
    },
    #[error("plan {0} has no services to score")]
    EmptyPlan(String),
}
