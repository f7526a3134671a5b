use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_JOBS_PATH: &str = "data/jobs.json";
pub const DEFAULT_LOG_PATH: &str = "applications.csv";
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Distinguishes runtime behavior for different stages of the agent.
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
}

/// Top-level configuration for the agent, resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub agent: AgentConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let jobs_path = env::var("JOB_AGENT_JOBS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_JOBS_PATH));
        let log_path = env::var("JOB_AGENT_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_PATH));
        let threshold = match env::var("JOB_AGENT_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_THRESHOLD,
        };

        let log_level = env::var("JOB_AGENT_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            agent: AgentConfig {
                jobs_path,
                log_path,
                threshold,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where listings come from, where applications go, and how strict matching is.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub jobs_path: PathBuf,
    pub log_path: PathBuf,
    pub threshold: f64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Parses a keyword threshold. Values above 1.0 match nothing and values at or
/// below 0.0 match everything; only unparseable input and NaN are rejected.
pub fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(ConfigError::InvalidThreshold {
            value: trimmed.to_string(),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidThreshold { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold { value } => write!(
                f,
                "threshold '{value}' must be a number"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
