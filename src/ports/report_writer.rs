//! Report Writer Port - Persisting an assembled report.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::report::Report;

/// Where a report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub path: PathBuf,
    /// Final sheet names, after any renaming the format requires.
    pub sheet_names: Vec<String>,
}

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum ReportWriteError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
}

impl From<std::io::Error> for ReportWriteError {
    fn from(err: std::io::Error) -> Self {
        ReportWriteError::Io(err.to_string())
    }
}

/// Port for writing reports.
///
/// # Contract
///
/// Implementations must:
/// - Write one sheet per section, in report order
/// - Never leave a partially written file at `destination`
/// - Create missing parent directories
pub trait ReportWriter: Send + Sync {
    /// Writes `report` to `destination`, replacing any existing file.
    fn write(&self, report: &Report, destination: &Path) -> Result<WrittenReport, ReportWriteError>;

    /// True if a finished report is present at `path`.
    fn exists(&self, path: &Path) -> bool;
}
