//! Tagged success/error results returned by every calculator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Why a calculator produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl CalculationFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Fewer than two items were supplied.
    pub fn insufficient_items(n_items: usize) -> Self {
        Self::new(
            ErrorCode::InsufficientItems,
            format!("Insufficient items for analysis: {} supplied, at least 2 required", n_items),
        )
    }

    /// Fewer than two complete participant rows survived cleaning.
    pub fn insufficient_data(n_participants: usize) -> Self {
        Self::new(
            ErrorCode::InsufficientData,
            format!(
                "Insufficient complete responses: {} participant(s), at least 2 required",
                n_participants
            ),
        )
    }
}

impl From<DomainError> for CalculationFailure {
    fn from(err: DomainError) -> Self {
        Self::new(err.code, err.message)
    }
}

impl fmt::Display for CalculationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Result of one calculator invocation.
///
/// Calculators never return `Err` past their boundary; failures are values
/// so the report can annotate a section instead of aborting the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome<T> {
    Success(T),
    #[serde(rename = "error")]
    Failed(CalculationFailure),
}

impl<T> AnalysisOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            AnalysisOutcome::Success(value) => Some(value),
            AnalysisOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&CalculationFailure> {
        match self {
            AnalysisOutcome::Success(_) => None,
            AnalysisOutcome::Failed(failure) => Some(failure),
        }
    }
}

impl<T> From<Result<T, CalculationFailure>> for AnalysisOutcome<T> {
    fn from(result: Result<T, CalculationFailure>) -> Self {
        match result {
            Ok(value) => AnalysisOutcome::Success(value),
            Err(failure) => AnalysisOutcome::Failed(failure),
        }
    }
}
