//! Run configuration management
//!
//! Handles loading walk parameters from TOML files, environment variables,
//! and CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use walk_engine::walk::{DrawOrder, WalkParameters};
use walk_engine::DomainError;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Walk configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Probability of a +1 step
    pub p: f64,
    /// Timesteps per trajectory
    pub steps: usize,
    /// Number of trajectories
    pub trajectories: usize,
    /// Seed for the random stream
    pub seed: u64,
    /// Mapping of trajectories onto the random stream
    #[serde(deserialize_with = "deserialize_draw_order")]
    pub draw_order: DrawOrder,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_draw_order<'de, D>(deserializer: D) -> Result<DrawOrder, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DrawOrder::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            p: 0.5,
            steps: 100,
            trajectories: 1_000,
            seed: 42,
            draw_order: DrawOrder::RowMajor,
            log_level: LogLevel::Info,
        }
    }
}

impl WalkConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `WALK_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup
    fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("WALK_BIAS") {
            self.p = parse_value("WALK_BIAS", &value)?;
        }
        if let Some(value) = lookup("WALK_STEPS") {
            self.steps = parse_value("WALK_STEPS", &value)?;
        }
        if let Some(value) = lookup("WALK_TRAJECTORIES") {
            self.trajectories = parse_value("WALK_TRAJECTORIES", &value)?;
        }
        if let Some(value) = lookup("WALK_SEED") {
            self.seed = parse_value("WALK_SEED", &value)?;
        }
        if let Some(value) = lookup("WALK_DRAW_ORDER") {
            self.draw_order = DrawOrder::from_str(&value).map_err(|_| ConfigError::InvalidValue {
                name: "WALK_DRAW_ORDER",
                value,
            })?;
        }
        if let Some(value) = lookup("WALK_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(p) = cli.p {
            self.p = p;
        }
        if let Some(steps) = cli.steps {
            self.steps = steps;
        }
        if let Some(trajectories) = cli.trajectories {
            self.trajectories = trajectories;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(order) = &cli.draw_order {
            self.draw_order = DrawOrder::from_str(order).map_err(|_| ConfigError::InvalidValue {
                name: "draw-order",
                value: order.clone(),
            })?;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }

    /// Validated engine parameters
    pub fn parameters(&self) -> Result<WalkParameters, DomainError> {
        WalkParameters::builder()
            .p(self.p)
            .steps(self.steps)
            .trajectories(self.trajectories)
            .seed(self.seed)
            .draw_order(self.draw_order)
            .build()
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Bias override
    pub p: Option<f64>,
    /// Step count override
    pub steps: Option<usize>,
    /// Trajectory count override
    pub trajectories: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Draw order override
    pub draw_order: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<WalkConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        WalkConfig::from_file(config_path)?
    } else {
        WalkConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;
    Ok(config)
}
