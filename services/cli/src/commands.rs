use crate::cli::{GenerateArgs, GeneratorArgs, RunArgs, ScoreArgs};
use crate::render::{render_plans, render_scores, ScoreFormat};
use plan_risk::config::{AppConfig, GeneratorConfig};
use plan_risk::error::AppError;
use plan_risk::workflows::generator::GenerationRequest;
use plan_risk::workflows::pipeline::{generate_plan_file, plan_rng, run_end_to_end, score_plan_file};
use plan_risk::workflows::scoring::{MethodKind, MethodRequest, ReportLayout};
use std::io::{self, Write};

pub(crate) fn run_generate(args: GenerateArgs, config: &AppConfig) -> Result<(), AppError> {
    let GenerateArgs {
        catalog,
        output,
        generator,
    } = args;

    let settings = merge_generator(generator, config.generator);
    let plans = generate_plan_file(
        &catalog,
        &output,
        &settings.request(),
        &mut plan_rng(settings.seed),
    )?;

    let mut stdout = io::stdout().lock();
    render_plans(&mut stdout, &plans)?;
    stdout.flush()?;
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        output,
        method,
        reference,
        ideal,
        critical,
        repeat,
        weights,
        json,
    } = args;

    let kind: MethodKind = method.parse()?;
    let request = MethodRequest {
        kind,
        reference,
        ideal: ideal.map(|list| list.0),
        critical: critical.map(|list| list.0),
    };
    let weights = weights.unwrap_or(config.scoring.weights);
    let service_repeat = resolve_repeat(repeat, config.generator.service_repeat);
    let scores = score_plan_file(&input, &output, service_repeat, request, weights)?;

    let mut stdout = io::stdout().lock();
    render_scores(
        &mut stdout,
        &scores,
        kind,
        ScoreFormat::from_flag(json, ReportLayout::ScoreOnly),
    )?;
    stdout.flush()?;
    Ok(())
}

pub(crate) fn run_pipeline(args: RunArgs, config: &AppConfig) -> Result<(), AppError> {
    let RunArgs {
        catalog,
        plans_output,
        risk_output,
        generator,
        weights,
        json,
    } = args;

    let settings = merge_generator(generator, config.generator);
    let request: GenerationRequest = settings.request();
    let outcome = run_end_to_end(
        &catalog,
        &plans_output,
        &risk_output,
        &request,
        weights.unwrap_or(config.scoring.weights),
        &mut plan_rng(settings.seed),
    )?;

    let mut stdout = io::stdout().lock();
    render_scores(
        &mut stdout,
        &outcome.scores,
        MethodKind::RawWeighted,
        ScoreFormat::from_flag(json, ReportLayout::WithNormalized),
    )?;
    stdout.flush()?;
    Ok(())
}

fn resolve_repeat(flag: Option<bool>, configured: bool) -> bool {
    flag.unwrap_or(configured)
}

fn merge_generator(args: GeneratorArgs, defaults: GeneratorConfig) -> GeneratorConfig {
    GeneratorConfig {
        num_plans: args.plans.unwrap_or(defaults.num_plans),
        max_plan_size: args.max_size.unwrap_or(defaults.max_plan_size),
        service_repeat: resolve_repeat(args.repeat, defaults.service_repeat),
        seed: args.seed.or(defaults.seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configured_generator_defaults() {
        let defaults = GeneratorConfig {
            num_plans: 5,
            max_plan_size: 4,
            service_repeat: false,
            seed: Some(1),
        };
        let args = GeneratorArgs {
            plans: Some(9),
            max_size: None,
            repeat: Some(true),
            seed: None,
        };

        let merged = merge_generator(args, defaults);
        assert_eq!(
            merged,
            GeneratorConfig {
                num_plans: 9,
                max_plan_size: 4,
                service_repeat: true,
                seed: Some(1),
            }
        );
    }

    #[test]
    fn explicit_false_turns_off_configured_repeat() {
        let defaults = GeneratorConfig {
            num_plans: 5,
            max_plan_size: 4,
            service_repeat: true,
            seed: None,
        };
        let args = GeneratorArgs {
            repeat: Some(false),
            ..GeneratorArgs::default()
        };

        assert!(!merge_generator(args, defaults).service_repeat);
        assert!(merge_generator(GeneratorArgs::default(), defaults).service_repeat);

        assert!(!resolve_repeat(Some(false), true));
        assert!(resolve_repeat(None, true));
        assert!(!resolve_repeat(None, false));
    }
}
