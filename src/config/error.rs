//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),

    #[error("Decimal places must be between 0 and {max}, got {actual}")]
    InvalidDecimalPlaces { max: u32, actual: u32 },

    #[error("Report file name must end with .xlsx: {0}")]
    InvalidFileName(String),

    #[error("Dimension name must not be empty")]
    EmptyDimensionName,

    #[error("Dimension '{0}' is defined more than once")]
    DuplicateDimension(String),

    #[error("Dimension '{0}' has no columns")]
    EmptyDimensionColumns(String),
}
