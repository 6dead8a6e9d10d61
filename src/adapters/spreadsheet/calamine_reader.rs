//! Calamine Spreadsheet Reader - xlsx/xls/ods loading via `calamine`.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use crate::domain::survey::{CellValue, RawTable};
use crate::ports::{SheetSelector, SpreadsheetError, SpreadsheetReader};

/// Reads worksheets from any workbook format `calamine` detects.
///
/// # Layout
///
/// The first row of the sheet's used range is the header row. When the
/// used range does not start in column A, every row is left-padded with
/// empty cells so column indices stay spreadsheet-absolute.
#[derive(Debug, Clone, Default)]
pub struct CalamineSpreadsheetReader;

impl CalamineSpreadsheetReader {
    pub fn new() -> Self {
        Self
    }

    fn to_cell(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
        }
    }

    fn header_text(data: &Data) -> String {
        match data {
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        }
    }

    /// Converts a used range into a table with absolute column positions.
    fn to_table(range: &Range<Data>) -> RawTable {
        let offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
        let width = offset + range.width();

        let mut rows = range.rows();
        let mut headers = vec![String::new(); width];
        if let Some(first) = rows.next() {
            for (i, cell) in first.iter().enumerate() {
                headers[offset + i] = Self::header_text(cell);
            }
        }

        let body = rows
            .map(|row| {
                let mut cells = vec![CellValue::Empty; offset];
                cells.extend(row.iter().map(Self::to_cell));
                cells
            })
            .collect();

        RawTable::new(headers, body)
    }
}

impl SpreadsheetReader for CalamineSpreadsheetReader {
    fn read(&self, path: &Path, sheet: &SheetSelector) -> Result<RawTable, SpreadsheetError> {
        if !path.exists() {
            return Err(SpreadsheetError::NotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| SpreadsheetError::Unreadable(format!("{}: {}", path.display(), e)))?;

        let sheet_names = workbook.sheet_names();
        let name = match sheet {
            SheetSelector::First => sheet_names.first().cloned().ok_or(SpreadsheetError::NoSheets)?,
            SheetSelector::Named(name) => sheet_names
                .iter()
                .find(|s| *s == name)
                .cloned()
                .ok_or_else(|| SpreadsheetError::SheetNotFound(name.clone()))?,
        };

        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| SpreadsheetError::Unreadable(format!("sheet '{}': {}", name, e)))?;

        let table = Self::to_table(&range);
        tracing::debug!(
            path = %path.display(),
            sheet = %name,
            columns = table.column_count(),
            rows = table.row_count(),
            "Worksheet loaded"
        );
        Ok(table)
    }
}
