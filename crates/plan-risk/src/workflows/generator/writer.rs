use super::registry::ServiceIdRegistry;
use super::{GeneratedPlan, GenerationError};
use std::collections::HashSet;
use std::io::Write;

/// Writes plans in the combined plan/attribute format read back by the scorer.
///
/// With `service_repeat` every occurrence is followed by its attribute line right after
/// the plan; otherwise each distinct id is described once after all plans.
pub fn write_plan_file<W: Write>(
    mut writer: W,
    plans: &[GeneratedPlan],
    registry: &ServiceIdRegistry,
    service_repeat: bool,
) -> Result<(), GenerationError> {
    for plan in plans {
        writeln!(writer, "{} {}", plan.name, plan.path())?;

        if service_repeat {
            for &id in &plan.service_ids {
                write_service_line(&mut writer, registry, id)?;
            }
        }
    }

    if !service_repeat {
        let mut described = HashSet::new();
        for id in plans.iter().flat_map(|plan| plan.service_ids.iter().copied()) {
            if described.insert(id) {
                write_service_line(&mut writer, registry, id)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn write_service_line<W: Write>(
    writer: &mut W,
    registry: &ServiceIdRegistry,
    id: u32,
) -> Result<(), GenerationError> {
    let attributes = registry
        .attributes(id)
        .ok_or(GenerationError::UnregisteredId(id))?;
    writeln!(writer, "S{id} {attributes}")?;
    Ok(())
}
