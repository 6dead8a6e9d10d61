//! In-Memory Spreadsheet Reader
//!
//! Serves pre-built tables keyed by path and sheet name.
//! Useful for testing and development.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::survey::RawTable;
use crate::ports::{SheetSelector, SpreadsheetError, SpreadsheetReader};

/// In-memory workbooks: each path maps to an ordered list of sheets.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpreadsheetReader {
    workbooks: HashMap<PathBuf, Vec<(String, RawTable)>>,
}

impl InMemorySpreadsheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sheet to the workbook at `path`.
    pub fn with_sheet(
        mut self,
        path: impl Into<PathBuf>,
        sheet_name: impl Into<String>,
        table: RawTable,
    ) -> Self {
        self.workbooks
            .entry(path.into())
            .or_default()
            .push((sheet_name.into(), table));
        self
    }
}

impl SpreadsheetReader for InMemorySpreadsheetReader {
    fn read(&self, path: &Path, sheet: &SheetSelector) -> Result<RawTable, SpreadsheetError> {
        let sheets = self
            .workbooks
            .get(path)
            .ok_or_else(|| SpreadsheetError::NotFound(path.display().to_string()))?;

        let found = match sheet {
            SheetSelector::First => sheets.first().ok_or(SpreadsheetError::NoSheets)?,
            SheetSelector::Named(name) => sheets
                .iter()
                .find(|(sheet_name, _)| sheet_name == name)
                .ok_or_else(|| SpreadsheetError::SheetNotFound(name.clone()))?,
        };
        Ok(found.1.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &str) -> RawTable {
        RawTable::new(vec![header.to_string()], Vec::new())
    }

    #[test]
    fn first_selector_returns_first_sheet() {
        let reader = InMemorySpreadsheetReader::new()
            .with_sheet("survey.xlsx", "One", table("A"))
            .with_sheet("survey.xlsx", "Two", table("B"));

        let loaded = reader.read(Path::new("survey.xlsx"), &SheetSelector::First).unwrap();
        assert_eq!(loaded.headers, vec!["A"]);
    }

    #[test]
    fn named_selector_finds_sheet() {
        let reader = InMemorySpreadsheetReader::new()
            .with_sheet("survey.xlsx", "One", table("A"))
            .with_sheet("survey.xlsx", "Two", table("B"));

        let loaded = reader
            .read(Path::new("survey.xlsx"), &SheetSelector::Named("Two".into()))
            .unwrap();
        assert_eq!(loaded.headers, vec!["B"]);
    }

    #[test]
    fn unknown_path_and_sheet_are_errors() {
        let reader = InMemorySpreadsheetReader::new().with_sheet("survey.xlsx", "One", table("A"));

        assert!(matches!(
            reader.read(Path::new("other.xlsx"), &SheetSelector::First),
            Err(SpreadsheetError::NotFound(_))
        ));
        assert!(matches!(
            reader.read(Path::new("survey.xlsx"), &SheetSelector::Named("Nope".into())),
            Err(SpreadsheetError::SheetNotFound(_))
        ));
    }
}
