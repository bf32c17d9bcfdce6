use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, store, and storage layers.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Recurring item not found: {0}")]
    ItemNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, PlannerError>;

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::StorageError(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] PlannerError),
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Invalid input: {0}")]
    Input(String),
}
