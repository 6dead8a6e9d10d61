//! Data Preparation - Header-row detection and categorical score mapping.
//!
//! Turns a loosely structured sheet into a numeric `ResponseMatrix`:
//! leading title/header rows are skipped, the three Arabic response labels
//! become ordinal scores, and anything else becomes a missing value.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{CellValue, RawTable, ResolvedColumn, ResponseMatrix};
use crate::domain::foundation::{Diagnostic, ErrorCode};

/// "Fully acquired" - the high point of the response scale.
pub const LABEL_FULLY_ACQUIRED: &str = "مكتسبة بشكل كامل";
/// "Acquired to a moderate degree" - the middle point.
pub const LABEL_PARTIALLY_ACQUIRED: &str = "مكتسبة بدرجة متوسطة";
/// "Not acquired" - the low point.
pub const LABEL_NOT_ACQUIRED: &str = "غير مكتسبة";

static SCALE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        (LABEL_FULLY_ACQUIRED, 3.0),
        (LABEL_PARTIALLY_ACQUIRED, 2.0),
        (LABEL_NOT_ACQUIRED, 1.0),
    ])
});

/// The fixed three-point categorical response scale.
pub struct ResponseScale;

impl ResponseScale {
    /// The recognised labels, highest score first.
    pub const LABELS: [&'static str; 3] = [
        LABEL_FULLY_ACQUIRED,
        LABEL_PARTIALLY_ACQUIRED,
        LABEL_NOT_ACQUIRED,
    ];

    /// Ordinal score for a label (compared after trimming).
    pub fn score_of(label: &str) -> Option<f64> {
        SCALE.get(label.trim()).copied()
    }

    /// Numeric value of a cell.
    ///
    /// Numbers pass through, the three labels map to 3/2/1, and every other
    /// value (unknown text, booleans, blanks) is missing.
    pub fn to_score(cell: &CellValue) -> Option<f64> {
        match cell {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(text) => Self::score_of(text),
            CellValue::Empty | CellValue::Bool(_) => None,
        }
    }
}

/// Decides which leading rows are headers or junk rather than responses.
///
/// A row is a header row when, for every designated column, the cell is
/// blank or its trimmed text is one of the placeholder strings. Some source
/// sheets repeat the response labels as column-header placeholders, so the
/// default placeholders are the three scale labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRowPolicy {
    placeholders: Vec<String>,
}

impl HeaderRowPolicy {
    pub fn new(placeholders: Vec<String>) -> Self {
        Self {
            placeholders: placeholders
                .into_iter()
                .map(|p| p.trim().to_string())
                .collect(),
        }
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// True if `row` looks like a header or junk row over `columns`.
    pub fn is_header_row(&self, table: &RawTable, row: usize, columns: &[usize]) -> bool {
        columns.iter().all(|&column| {
            let cell = table.cell(row, column);
            cell.is_blank()
                || cell
                    .as_trimmed_text()
                    .is_some_and(|text| self.placeholders.iter().any(|p| p == text))
        })
    }

    /// Index of the first genuine data row, or `None` if every row looks
    /// like a header.
    pub fn first_data_row(&self, table: &RawTable, columns: &[usize]) -> Option<usize> {
        (0..table.row_count()).find(|&row| !self.is_header_row(table, row, columns))
    }
}

impl Default for HeaderRowPolicy {
    fn default() -> Self {
        Self::new(ResponseScale::LABELS.iter().map(|s| s.to_string()).collect())
    }
}

/// Output of data preparation.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub matrix: ResponseMatrix,
    /// Body rows in the loaded sheet.
    pub loaded_rows: usize,
    /// Leading rows dropped as headers/junk.
    pub discarded_rows: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts a raw sheet into a numeric response matrix.
#[derive(Debug, Clone, Default)]
pub struct DataPreparer {
    header_policy: HeaderRowPolicy,
}

impl DataPreparer {
    pub fn new(header_policy: HeaderRowPolicy) -> Self {
        Self { header_policy }
    }

    /// Cleans `table` over the given columns, detecting header rows on
    /// all of them.
    pub fn prepare(&self, table: &RawTable, columns: &[ResolvedColumn]) -> PreparedData {
        let indices: Vec<usize> = columns.iter().map(|c| c.index).collect();
        self.prepare_scoped(table, columns, &indices)
    }

    /// Cleans `table` over `columns`, detecting header rows on
    /// `header_columns` only.
    ///
    /// Only the listed columns are converted; other columns are metadata and
    /// are ignored. If every row looks like a header, no rows are discarded.
    /// Rows with missing values stay in the matrix; calculators drop them.
    pub fn prepare_scoped(
        &self,
        table: &RawTable,
        columns: &[ResolvedColumn],
        header_columns: &[usize],
    ) -> PreparedData {
        let mut diagnostics = Vec::new();

        let first_row = match self.header_policy.first_data_row(table, header_columns) {
            Some(row) => row,
            None => {
                if !table.is_empty() {
                    diagnostics.push(Diagnostic::warning(
                        ErrorCode::HeaderRowsAmbiguous,
                        "No row looked like response data; keeping all rows",
                    ));
                }
                0
            }
        };
        if first_row > 0 {
            diagnostics.push(Diagnostic::info(
                ErrorCode::HeaderRowsDiscarded,
                format!("Skipped {} leading header row(s)", first_row),
            ));
        }

        let body = first_row..table.row_count();
        let participants: Vec<usize> = (0..body.len()).collect();
        let mut values = vec![Vec::with_capacity(columns.len()); body.len()];
        let mut unrecognised = vec![0usize; columns.len()];

        for (out_row, row) in body.enumerate() {
            for (c, column) in columns.iter().enumerate() {
                let cell = table.cell(row, column.index);
                let score = ResponseScale::to_score(cell);
                if score.is_none() && !cell.is_blank() {
                    unrecognised[c] += 1;
                }
                values[out_row].push(score);
            }
        }

        for (c, column) in columns.iter().enumerate() {
            if unrecognised[c] > 0 {
                diagnostics.push(Diagnostic::info(
                    ErrorCode::InvalidFormat,
                    format!(
                        "{}: {} unrecognised response(s) treated as missing",
                        column.name, unrecognised[c]
                    ),
                ));
            }
            if !values.is_empty() && values.iter().all(|r| r[c].is_none()) {
                diagnostics.push(Diagnostic::warning(
                    ErrorCode::InsufficientData,
                    format!("{}: no numeric responses after cleaning", column.name),
                ));
            }
        }

        let names = columns.iter().map(|c| c.name.clone()).collect();
        let matrix = ResponseMatrix::assemble(names, participants, values);

        PreparedData {
            matrix,
            loaded_rows: table.row_count(),
            discarded_rows: first_row,
            diagnostics,
        }
    }
}
