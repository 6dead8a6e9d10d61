//! Report model - Sheets, tables and cells, independent of any file format.

use serde::Serialize;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportCell {
    Text(String),
    Number(f64),
    Integer(i64),
    Empty,
}

impl ReportCell {
    pub fn text(value: impl Into<String>) -> Self {
        ReportCell::Text(value.into())
    }

    /// Number cell, or `Empty` for `None`.
    pub fn optional_number(value: Option<f64>) -> Self {
        value.map_or(ReportCell::Empty, ReportCell::Number)
    }

    /// Rendered width in characters, used for column sizing.
    pub fn display_width(&self) -> usize {
        match self {
            ReportCell::Text(s) => s.chars().count(),
            ReportCell::Number(n) => n.to_string().len(),
            ReportCell::Integer(i) => i.to_string().len(),
            ReportCell::Empty => 0,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ReportCell::Number(n) => Some(*n),
            ReportCell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ReportCell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<usize> for ReportCell {
    fn from(value: usize) -> Self {
        ReportCell::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for ReportCell {
    fn from(value: &str) -> Self {
        ReportCell::Text(value.to_string())
    }
}

impl From<String> for ReportCell {
    fn from(value: String) -> Self {
        ReportCell::Text(value)
    }
}

/// A header row plus data rows, optionally preceded by a title line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub title: Option<String>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}

impl ReportTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            title: None,
            header,
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<ReportCell>) {
        self.rows.push(row);
    }

    /// Rows occupied on a sheet: title, header and data.
    pub fn height(&self) -> usize {
        usize::from(self.title.is_some()) + 1 + self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

/// One worksheet's worth of content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub sheet_name: String,
    pub tables: Vec<ReportTable>,
    /// Free-text annotations written below the tables.
    pub notes: Vec<String>,
}

impl ReportSection {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            tables: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: ReportTable) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// An ordered set of sections, one sheet each.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn section(&self, sheet_name: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.sheet_name == sheet_name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.sheet_name.as_str()).collect()
    }
}
