//! File-to-file entry points combining catalog loading, generation and scoring.

use crate::error::AppError;
use crate::workflows::catalog::ServiceCatalog;
use crate::workflows::generator::{
    write_plan_file, GeneratedPlan, GenerationError, GenerationRequest, PlanGenerator,
    ServiceIdRegistry,
};
use crate::workflows::scoring::{
    write_report, MethodKind, MethodRequest, PlanInput, PlanScore, ReportLayout, ScoringEngine,
    ScoringError, ScoringMethod, Weights,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Seeded generator when a seed is configured, entropy otherwise.
pub fn plan_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Samples plans from the catalog at `catalog_path` and writes the plan file.
pub fn generate_plan_file<R: Rng + ?Sized>(
    catalog_path: &Path,
    plan_path: &Path,
    request: &GenerationRequest,
    rng: &mut R,
) -> Result<Vec<GeneratedPlan>, AppError> {
    let catalog = ServiceCatalog::from_path(catalog_path)?;
    let mut registry = ServiceIdRegistry::new();
    let plans = PlanGenerator::new(&catalog).generate(&mut registry, rng, request)?;

    save_plans(plan_path, &plans, &registry, request.service_repeat)?;
    Ok(plans)
}

/// Method-selection entry point: resolves the method, scores every plan in
/// `input_path` and writes the single-score report to `output_path`.
///
/// The output file is only created once the whole batch has scored.
pub fn score_plan_file(
    input_path: &Path,
    output_path: &Path,
    service_repeat: bool,
    request: MethodRequest,
    weights: Weights,
) -> Result<Vec<PlanScore>, ScoringError> {
    let method = request.resolve()?;
    let kind = method.kind();
    let input = PlanInput::from_path(input_path)?;
    let scores = ScoringEngine::new(method, weights, service_repeat).score(&input)?;

    save_report(output_path, &scores, kind, ReportLayout::ScoreOnly)?;
    Ok(scores)
}

/// Result of [`run_end_to_end`].
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub plans: Vec<GeneratedPlan>,
    pub scores: Vec<PlanScore>,
}

/// Generates plans, writes the plan file, reads it back and scores it with the raw
/// weighted method, writing both raw and normalized scores.
pub fn run_end_to_end<R: Rng + ?Sized>(
    catalog_path: &Path,
    plan_path: &Path,
    risk_path: &Path,
    request: &GenerationRequest,
    weights: Weights,
    rng: &mut R,
) -> Result<PipelineOutcome, AppError> {
    let plans = generate_plan_file(catalog_path, plan_path, request, rng)?;

    let input = PlanInput::from_path(plan_path)?;
    let scores = ScoringEngine::new(ScoringMethod::RawWeighted, weights, request.service_repeat)
        .score(&input)?;
    save_report(
        risk_path,
        &scores,
        MethodKind::RawWeighted,
        ReportLayout::WithNormalized,
    )?;

    Ok(PipelineOutcome { plans, scores })
}

fn save_plans(
    path: &Path,
    plans: &[GeneratedPlan],
    registry: &ServiceIdRegistry,
    service_repeat: bool,
) -> Result<(), GenerationError> {
    let file = File::create(path)?;
    write_plan_file(BufWriter::new(file), plans, registry, service_repeat)?;
    info!(path = %path.display(), plans = plans.len(), "plan file written");
    Ok(())
}

fn save_report(
    path: &Path,
    scores: &[PlanScore],
    method: MethodKind,
    layout: ReportLayout,
) -> Result<(), ScoringError> {
    let file = File::create(path)?;
    write_report(BufWriter::new(file), scores, method, layout)?;
    info!(path = %path.display(), plans = scores.len(), %method, "risk report written");
    Ok(())
}
