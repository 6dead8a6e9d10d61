//! Error types for the domain layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    EmptyField,
    InvalidFormat,

    // Input shape errors
    MissingColumn,
    DimensionCoverageMismatch,
    HeaderRowsDiscarded,
    HeaderRowsAmbiguous,

    // Computation errors
    InsufficientItems,
    InsufficientData,
    ZeroVariance,
    UndefinedCorrelation,
    ComputationFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::MissingColumn => "MISSING_COLUMN",
            ErrorCode::DimensionCoverageMismatch => "DIMENSION_COVERAGE_MISMATCH",
            ErrorCode::HeaderRowsDiscarded => "HEADER_ROWS_DISCARDED",
            ErrorCode::HeaderRowsAmbiguous => "HEADER_ROWS_AMBIGUOUS",
            ErrorCode::InsufficientItems => "INSUFFICIENT_ITEMS",
            ErrorCode::InsufficientData => "INSUFFICIENT_DATA",
            ErrorCode::ZeroVariance => "ZERO_VARIANCE",
            ErrorCode::UndefinedCorrelation => "UNDEFINED_CORRELATION",
            ErrorCode::ComputationFailed => "COMPUTATION_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates an error for an item or column that is not part of the data.
    pub fn missing_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::new(
            ErrorCode::MissingColumn,
            format!("Column '{}' is not present in the response data", column),
        )
        .with_detail("column", column)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}
