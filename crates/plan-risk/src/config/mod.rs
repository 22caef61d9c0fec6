use crate::workflows::generator::GenerationRequest;
use crate::workflows::scoring::Weights;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Log level used when `APP_LOG_LEVEL` is unset: stage summaries in development,
    /// warnings only elsewhere.
    pub const fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "info",
            Self::Test | Self::Production => "warn",
        }
    }
}

/// Top-level configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub generator: GeneratorConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());

        let generator = GeneratorConfig {
            num_plans: parse_var("PLAN_COUNT", 5)?,
            max_plan_size: parse_var("PLAN_MAX_SIZE", 4)?,
            service_repeat: parse_flag("PLAN_SERVICE_REPEAT", false)?,
            seed: parse_optional_var("PLAN_SEED")?,
        };

        let weights = match env::var("RISK_WEIGHTS") {
            Ok(raw) => parse_weights(&raw)?,
            Err(_) => Weights::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            generator,
            scoring: ScoringConfig { weights },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults for plan generation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub num_plans: usize,
    pub max_plan_size: usize,
    pub service_repeat: bool,
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            num_plans: self.num_plans,
            max_plan_size: self.max_plan_size,
            service_repeat: self.service_repeat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub weights: Weights,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { var: &'static str, value: String },
    InvalidFlag { var: &'static str, value: String },
    InvalidWeights { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} must be a non-negative integer, got '{value}'")
            }
            ConfigError::InvalidFlag { var, value } => {
                write!(f, "{var} must be true or false, got '{value}'")
            }
            ConfigError::InvalidWeights { value } => {
                write!(f, "RISK_WEIGHTS must list 9 comma-separated numbers, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    Ok(parse_optional_var(var)?.unwrap_or(default))
}

fn parse_optional_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::InvalidNumber { var, value }),
        },
        Err(_) => Ok(None),
    }
}

fn parse_flag(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(var) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}

/// Parses a comma-separated list of nine weights.
pub fn parse_weights(raw: &str) -> Result<Weights, ConfigError> {
    let invalid = || ConfigError::InvalidWeights {
        value: raw.to_string(),
    };

    let values = raw
        .split(',')
        .map(|token| token.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    Weights::from_slice(&values).map_err(|_| invalid())
}
