use super::normalizer;
use super::{PlanInput, ScoringError, ScoringMethod, ServicePlan, Weights};
use crate::workflows::catalog::QosVector;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Score of one plan under one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanScore {
    pub plan: String,
    pub path: String,
    pub risk_score: f64,
    /// Only set for methods that rescale over the whole batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_score: Option<f64>,
}

/// Stateless scorer: a plan's risk depends only on its path, the attribute map and the
/// configured method.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    method: ScoringMethod,
    weights: Weights,
    service_repeat: bool,
}

impl ScoringEngine {
    pub fn new(method: ScoringMethod, weights: Weights, service_repeat: bool) -> Self {
        Self {
            method,
            weights,
            service_repeat,
        }
    }

    pub fn method(&self) -> &ScoringMethod {
        &self.method
    }

    pub fn service_risk(&self, attributes: &QosVector) -> Result<f64, ScoringError> {
        let normalized = self.method.normalize(attributes)?;
        Ok(self.weights.apply(&normalized))
    }

    /// Mean service risk along the plan's path.
    ///
    /// Without `service_repeat`, only the first occurrence of each service counts.
    pub fn plan_risk(
        &self,
        plan: &ServicePlan,
        attributes: &HashMap<String, QosVector>,
    ) -> Result<f64, ScoringError> {
        let mut counted: HashSet<&str> = HashSet::new();
        let mut total = 0.0;
        let mut count = 0usize;

        for service in &plan.services {
            if !counted.insert(service.as_str()) && !self.service_repeat {
                continue;
            }

            let service_attributes =
                attributes
                    .get(service)
                    .ok_or_else(|| ScoringError::UnknownService {
                        plan: plan.name.clone(),
                        service: service.clone(),
                    })?;
            total += self.service_risk(service_attributes)?;
            count += 1;
        }

        if count == 0 {
            return Err(ScoringError::EmptyPlan(plan.name.clone()));
        }

        Ok(total / count as f64)
    }

    /// Scores every plan; any unscoreable plan fails the whole batch.
    pub fn score(&self, input: &PlanInput) -> Result<Vec<PlanScore>, ScoringError> {
        let mut scores = input
            .plans
            .iter()
            .map(|plan| -> Result<PlanScore, ScoringError> {
                let risk_score = self.plan_risk(plan, &input.attributes)?;
                debug!(plan = %plan.name, path = %plan.path, risk_score, "plan scored");
                Ok(PlanScore {
                    plan: plan.name.clone(),
                    path: plan.path.clone(),
                    risk_score,
                    normalized_score: None,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.method.rescales_batch() {
            let raw: Vec<f64> = scores.iter().map(|score| score.risk_score).collect();
            for (score, normalized) in scores.iter_mut().zip(normalizer::min_max(&raw)) {
                score.normalized_score = Some(normalized);
            }
        }

        info!(
            method = %self.method.kind(),
            plans = scores.len(),
            service_repeat = self.service_repeat,
            "plan batch scored"
        );
        Ok(scores)
    }
}
