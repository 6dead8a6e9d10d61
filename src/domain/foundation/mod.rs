//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, labels, and error types
//! that form the vocabulary of the survey reliability domain.

mod diagnostic;
mod errors;
mod ids;
mod label;
mod timestamp;

pub use diagnostic::{Diagnostic, Severity};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AnalysisRunId;
pub use label::BilingualLabel;
pub use timestamp::Timestamp;
