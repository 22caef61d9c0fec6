//! Random service-plan generation over a loaded catalog.

mod registry;
mod writer;

pub use registry::ServiceIdRegistry;
pub use writer::write_plan_file;

use crate::workflows::catalog::ServiceCatalog;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("cannot generate plans from an empty catalog")]
    EmptyCatalog,
    #[error("maximum plan size must be at least 1 and below usize::MAX, got {0}")]
    InvalidPlanSize(usize),
    #[error(
        "plan {plan} needs {requested} distinct services but the catalog only offers {available}"
    )]
    SamplingStall {
        plan: String,
        requested: usize,
        available: usize,
    },
    #[error("service id {0} was never assigned")]
    UnregisteredId(u32),
    #[error("failed to write plan file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parameters for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub num_plans: usize,
    /// Upper bound on the size above the floor of two services.
    pub max_plan_size: usize,
    pub service_repeat: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPlan {
    pub name: String,
    pub service_ids: Vec<u32>,
}

impl GeneratedPlan {
    /// Renders the chain as `S1->S3->S2`.
    pub fn path(&self) -> String {
        self.service_ids
            .iter()
            .map(|id| format!("S{id}"))
            .collect::<Vec<_>>()
            .join("->")
    }
}

pub struct PlanGenerator<'a> {
    catalog: &'a ServiceCatalog,
}

impl<'a> PlanGenerator<'a> {
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        Self { catalog }
    }

    /// Samples `num_plans` chains of size `[2, max_plan_size + 1]`.
    ///
    /// Ids come from `registry`, which is shared across all plans of the run; with
    /// `service_repeat` off a name is never placed twice in the same plan.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        registry: &mut ServiceIdRegistry,
        rng: &mut R,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedPlan>, GenerationError> {
        if self.catalog.is_empty() {
            return Err(GenerationError::EmptyCatalog);
        }
        let largest_plan = match request.max_plan_size.checked_add(1) {
            Some(largest) if request.max_plan_size > 0 => largest,
            _ => return Err(GenerationError::InvalidPlanSize(request.max_plan_size)),
        };

        let records = self.catalog.records();
        let available = self.catalog.distinct_names();
        let mut plans = Vec::new();

        for position in 0..request.num_plans {
            let name = format!("P{}", position + 1);
            let plan_size = rng.gen_range(2..=largest_plan);

            if !request.service_repeat && plan_size > available {
                return Err(GenerationError::SamplingStall {
                    plan: name,
                    requested: plan_size,
                    available,
                });
            }

            let mut used_names: HashSet<&str> = HashSet::new();
            let mut service_ids = Vec::new();

            while service_ids.len() < plan_size {
                let record = &records[rng.gen_range(0..records.len())];
                if !request.service_repeat && used_names.contains(record.name.as_str()) {
                    continue;
                }

                service_ids.push(registry.assign(record));
                used_names.insert(record.name.as_str());
            }

            let plan = GeneratedPlan { name, service_ids };
            debug!(plan = %plan.name, path = %plan.path(), "plan generated");
            plans.push(plan);
        }

        info!(
            plans = plans.len(),
            distinct_services = registry.len(),
            service_repeat = request.service_repeat,
            "service plans generated"
        );
        Ok(plans)
    }
}
