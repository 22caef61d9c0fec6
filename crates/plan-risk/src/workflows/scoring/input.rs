use super::ScoringError;
use crate::workflows::catalog::{QosVector, ATTRIBUTE_COUNT};
use serde::Serialize;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

const PATH_SEPARATOR: &str = "->";

/// A named service chain as declared in the scoring input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePlan {
    pub name: String,
    /// Path exactly as declared, e.g. `S3->S7->S2`.
    pub path: String,
    pub services: Vec<String>,
}

impl ServicePlan {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Result<Self, String> {
        let path = path.into();
        let services = path
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .map(|service| {
                if service.is_empty() {
                    Err(format!("plan path '{path}' contains an empty service id"))
                } else {
                    Ok(service.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.into(),
            path,
            services,
        })
    }
}

/// Plans plus the attribute map they are scored against.
///
/// Plans may be declared before or after the attributes they reference.
#[derive(Debug, Clone, Default)]
pub struct PlanInput {
    pub plans: Vec<ServicePlan>,
    pub attributes: HashMap<String, QosVector>,
}

impl PlanInput {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let input = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            plans = input.plans.len(),
            services = input.attributes.len(),
            "plan input loaded"
        );
        Ok(input)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScoringError> {
        let mut input = Self::default();

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line_number = index + 1;
            let malformed = |reason: String| ScoringError::MalformedLine {
                line: line_number,
                reason,
            };

            if line.starts_with('P') {
                input.plans.push(parse_plan(line).map_err(malformed)?);
            } else {
                let (service, attributes) = parse_attributes(line).map_err(malformed)?;
                input.declare(service, attributes);
            }
        }

        Ok(input)
    }

    fn declare(&mut self, service: String, attributes: QosVector) {
        if let Some(previous) = self.attributes.insert(service.clone(), attributes) {
            if previous != attributes {
                warn!(%service, "service attributes redeclared with different values; keeping the latest");
            }
        }
    }
}

fn parse_plan(line: &str) -> Result<ServicePlan, String> {
    let mut parts = line.split_whitespace();
    let (Some(name), Some(path), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected 'P<n> <path>', got '{line}'"));
    };

    ServicePlan::new(name, path)
}

fn parse_attributes(line: &str) -> Result<(String, QosVector), String> {
    let Some((service, values)) = line.split_once(char::is_whitespace) else {
        return Err(format!("expected '<service> <attributes>', got '{line}'"));
    };

    let fields: Vec<&str> = values.split(',').collect();
    if fields.len() != ATTRIBUTE_COUNT {
        return Err(format!(
            "service {service} declares {} attribute values, expected {ATTRIBUTE_COUNT}",
            fields.len()
        ));
    }

    let attributes = QosVector::parse_fields(fields)
        .map_err(|err| format!("service {service}: {err}"))?;
    Ok((service.to_string(), attributes))
}
