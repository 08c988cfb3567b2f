//! CLI error type.

use thiserror::Error;
use walk_engine::{DomainError, WalkError};

use crate::config::ConfigError;

/// Errors surfaced by the `walk` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Engine failure (invalid parameters or inconsistent engines).
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV output failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Walk(err.into())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
