//! Spreadsheet Reader Port - Loading a worksheet as a raw table.
//!
//! The analysis never sees a file format. Adapters turn a workbook on disk
//! (or an in-memory fixture) into a `RawTable`.

use std::path::Path;
use thiserror::Error;

use crate::domain::survey::RawTable;

/// Which worksheet to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    /// The first worksheet in workbook order.
    #[default]
    First,
    Named(String),
}

impl SheetSelector {
    /// `Named` for `Some`, `First` for `None`.
    pub fn from_option(name: Option<&str>) -> Self {
        match name {
            Some(name) => SheetSelector::Named(name.to_string()),
            None => SheetSelector::First,
        }
    }
}

impl std::fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetSelector::First => write!(f, "<first sheet>"),
            SheetSelector::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Errors raised while reading a spreadsheet.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Spreadsheet not found: {0}")]
    NotFound(String),

    #[error("Cannot open spreadsheet: {0}")]
    Unreadable(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook contains no worksheets")]
    NoSheets,
}

/// Port for loading survey responses.
///
/// # Contract
///
/// Implementations must:
/// - Treat the first row of the sheet as the column-header row
/// - Keep 0-based column positions aligned with the sheet (column A is 0)
/// - Map cells to `CellValue` without interpreting response labels
pub trait SpreadsheetReader: Send + Sync {
    /// Reads one worksheet.
    ///
    /// # Errors
    ///
    /// Returns `SpreadsheetError` if the file or sheet cannot be read.
    fn read(&self, path: &Path, sheet: &SheetSelector) -> Result<RawTable, SpreadsheetError>;
}
