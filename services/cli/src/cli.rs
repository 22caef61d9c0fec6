use crate::commands::{run_generate, run_pipeline, run_score};
use clap::{Args, Parser, Subcommand};
use plan_risk::config::{parse_weights, AppConfig};
use plan_risk::error::AppError;
use plan_risk::telemetry;
use plan_risk::workflows::catalog::ATTRIBUTE_COUNT;
use plan_risk::workflows::scoring::Weights;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "plan-risk",
    about = "Generate QoS service plans and score their risk",
    version
)]
pub(crate) struct Cli {
    /// Override APP_LOG_LEVEL for this run
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample service plans from a QoS catalog and write the plan file
    Generate(GenerateArgs),
    /// Score an existing plan file with one of the scoring methods
    Score(ScoreArgs),
    /// Generate plans, then score them with normalized raw weighted risk
    Run(RunArgs),
}

/// Generation settings; unset values fall back to PLAN_* configuration.
#[derive(Args, Debug, Default)]
pub(crate) struct GeneratorArgs {
    /// Number of plans to generate
    #[arg(long)]
    pub(crate) plans: Option<usize>,
    /// Plans hold between 2 and max-size + 1 services
    #[arg(long)]
    pub(crate) max_size: Option<usize>,
    /// Allow the same service to appear more than once in a plan (`--repeat false`
    /// overrides PLAN_SERVICE_REPEAT)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub(crate) repeat: Option<bool>,
    /// Seed for reproducible sampling
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// QoS catalog (nine attributes and a service name per line)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Destination plan file
    #[arg(long, default_value = "service_plans.csv")]
    pub(crate) output: PathBuf,
    #[command(flatten)]
    pub(crate) generator: GeneratorArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Plan file with plan and attribute declarations
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination risk CSV
    #[arg(long, default_value = "service_plan_risks.csv")]
    pub(crate) output: PathBuf,
    /// Scoring method: old, historical or threshold
    #[arg(long, default_value = "old")]
    pub(crate) method: String,
    /// Reference dataset for the historical method
    #[arg(long)]
    pub(crate) reference: Option<PathBuf>,
    /// Nine comma-separated ideal thresholds for the threshold method
    #[arg(long, value_parser = parse_attribute_list)]
    pub(crate) ideal: Option<AttributeList>,
    /// Nine comma-separated critical thresholds for the threshold method
    #[arg(long, value_parser = parse_attribute_list)]
    pub(crate) critical: Option<AttributeList>,
    /// Count repeated services in a plan every time they occur (falls back to
    /// PLAN_SERVICE_REPEAT)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub(crate) repeat: Option<bool>,
    /// Nine comma-separated attribute weights (overrides RISK_WEIGHTS)
    #[arg(long, value_parser = parse_weights)]
    pub(crate) weights: Option<Weights>,
    /// Print scores as JSON instead of CSV rows
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    #[arg(long, default_value = "service_plans.csv")]
    pub(crate) plans_output: PathBuf,
    #[arg(long, default_value = "service_plan_risks.csv")]
    pub(crate) risk_output: PathBuf,
    #[command(flatten)]
    pub(crate) generator: GeneratorArgs,
    #[arg(long, value_parser = parse_weights)]
    pub(crate) weights: Option<Weights>,
    #[arg(long)]
    pub(crate) json: bool,
}

/// Comma-separated list of one number per QoS attribute.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AttributeList(pub(crate) Vec<f64>);

fn parse_attribute_list(raw: &str) -> Result<AttributeList, String> {
    let values = raw
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", token.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != ATTRIBUTE_COUNT {
        return Err(format!(
            "expected {ATTRIBUTE_COUNT} comma-separated values, got {}",
            values.len()
        ));
    }
    Ok(AttributeList(values))
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(level) = cli.log_level {
        config.telemetry.log_level = level;
    }
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "plan risk tooling started");

    match cli.command {
        Command::Generate(args) => run_generate(args, &config),
        Command::Score(args) => run_score(args, &config),
        Command::Run(args) => run_pipeline(args, &config),
    }
}
