//! Xlsx Report Writer - Implementation of ReportWriter using `rust_xlsxwriter`.
//!
//! One worksheet per report section. Tables are stacked top to bottom with
//! a blank row between them; notes follow the last table.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::report::{Report, ReportCell, ReportSection};
use crate::ports::{ReportWriteError, ReportWriter, WrittenReport};

/// Excel's limit on worksheet name length, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const HEADER_FILL: u32 = 0xCCE5FF;
const MAX_COLUMN_WIDTH: usize = 40;

/// Makes `name` a legal worksheet name that is not already in `used`.
///
/// Forbidden characters become `_`, surrounding apostrophes are dropped,
/// names are cut to 31 characters and clashes (case-insensitive, as
/// Excel compares them) get a ` (n)` suffix.
pub fn sanitize_sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').trim();
    let base = if cleaned.is_empty() { "Sheet" } else { cleaned };

    let mut candidate = truncate_chars(base, MAX_SHEET_NAME_LEN);
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({})", n);
        let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
        candidate = format!("{}{}", truncate_chars(base, keep).trim_end(), suffix);
        n += 1;
    }

    used.insert(candidate.to_lowercase());
    candidate
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn workbook_error(err: XlsxError) -> ReportWriteError {
    ReportWriteError::Workbook(err.to_string())
}

fn row_index(row: usize) -> Result<u32, ReportWriteError> {
    u32::try_from(row).map_err(|_| ReportWriteError::Workbook(format!("row {} out of range", row)))
}

fn column_index(column: usize) -> Result<u16, ReportWriteError> {
    u16::try_from(column)
        .map_err(|_| ReportWriteError::Workbook(format!("column {} out of range", column)))
}

/// Writes reports as `.xlsx` workbooks.
///
/// # Atomic Writes
///
/// The workbook is saved to `{destination}.tmp` and renamed into place,
/// so `destination` never holds a partially written file.
#[derive(Debug, Clone)]
pub struct XlsxReportWriter {
    header_format: Format,
    title_format: Format,
    note_format: Format,
}

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self {
            header_format: Format::new()
                .set_bold()
                .set_font_size(12)
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            title_format: Format::new().set_bold(),
            note_format: Format::new().set_italic(),
        }
    }

    fn temp_path(destination: &Path) -> PathBuf {
        let mut name = destination.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_section(
        &self,
        worksheet: &mut Worksheet,
        section: &ReportSection,
    ) -> Result<(), ReportWriteError> {
        let mut widths: Vec<usize> = Vec::new();
        let mut track = |column: usize, width: usize| {
            if widths.len() <= column {
                widths.resize(column + 1, 0);
            }
            widths[column] = widths[column].max(width);
        };

        let mut row = 0usize;
        for (index, table) in section.tables.iter().enumerate() {
            if index > 0 {
                row += 1;
            }
            if let Some(title) = &table.title {
                worksheet
                    .write_string_with_format(row_index(row)?, 0, title.as_str(), &self.title_format)
                    .map_err(workbook_error)?;
                row += 1;
            }

            for (column, name) in table.header.iter().enumerate() {
                worksheet
                    .write_string_with_format(
                        row_index(row)?,
                        column_index(column)?,
                        name.as_str(),
                        &self.header_format,
                    )
                    .map_err(workbook_error)?;
                track(column, name.chars().count());
            }
            row += 1;

            for cells in &table.rows {
                for (column, cell) in cells.iter().enumerate() {
                    let (r, c) = (row_index(row)?, column_index(column)?);
                    match cell {
                        ReportCell::Text(text) => {
                            worksheet.write_string(r, c, text.as_str()).map_err(workbook_error)?;
                        }
                        ReportCell::Number(value) => {
                            worksheet.write_number(r, c, *value).map_err(workbook_error)?;
                        }
                        ReportCell::Integer(value) => {
                            worksheet.write_number(r, c, *value as f64).map_err(workbook_error)?;
                        }
                        ReportCell::Empty => {}
                    }
                    track(column, cell.display_width());
                }
                row += 1;
            }
        }

        if !section.notes.is_empty() {
            row += 1;
            for note in &section.notes {
                worksheet
                    .write_string_with_format(row_index(row)?, 0, note.as_str(), &self.note_format)
                    .map_err(workbook_error)?;
                row += 1;
            }
        }

        for (column, width) in widths.iter().enumerate() {
            let fitted = (width + 2).min(MAX_COLUMN_WIDTH);
            worksheet
                .set_column_width(column_index(column)?, fitted as f64)
                .map_err(workbook_error)?;
        }
        Ok(())
    }
}

impl Default for XlsxReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportWriter for XlsxReportWriter {
    fn write(&self, report: &Report, destination: &Path) -> Result<WrittenReport, ReportWriteError> {
        if destination.file_name().is_none() {
            return Err(ReportWriteError::InvalidDestination(
                destination.display().to_string(),
            ));
        }
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut workbook = Workbook::new();
        let mut used = HashSet::new();
        let mut sheet_names = Vec::with_capacity(report.sections.len());

        for section in &report.sections {
            let name = sanitize_sheet_name(&section.sheet_name, &mut used);
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name.as_str()).map_err(workbook_error)?;
            self.write_section(worksheet, section)?;
            sheet_names.push(name);
        }

        let temp = Self::temp_path(destination);
        if let Err(err) = workbook.save(&temp) {
            let _ = fs::remove_file(&temp);
            return Err(workbook_error(err));
        }
        fs::rename(&temp, destination).map_err(|e| {
            let _ = fs::remove_file(&temp);
            ReportWriteError::Io(format!(
                "Failed to move report into place at {}: {}",
                destination.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %destination.display(),
            sheets = sheet_names.len(),
            "Workbook written"
        );

        Ok(WrittenReport {
            path: destination.to_path_buf(),
            sheet_names,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ReportTable;

    #[test]
    fn sanitize_replaces_forbidden_characters() {
        let mut used = HashSet::new();
        assert_eq!(sanitize_sheet_name("A/B: [x]?", &mut used), "A_B_ _x__");
    }

    #[test]
    fn sanitize_truncates_to_excel_limit() {
        let mut used = HashSet::new();
        let name = sanitize_sheet_name(&"x".repeat(40), &mut used);
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn sanitize_makes_names_unique_ignoring_case() {
        let mut used = HashSet::new();
        let first = sanitize_sheet_name("Dimension A", &mut used);
        let second = sanitize_sheet_name("dimension a", &mut used);
        let third = sanitize_sheet_name("Dimension A", &mut used);

        assert_eq!(first, "Dimension A");
        assert_eq!(second, "dimension a (2)");
        assert_eq!(third, "Dimension A (3)");
    }

    #[test]
    fn sanitize_keeps_suffix_within_limit() {
        let mut used = HashSet::new();
        let long = "y".repeat(35);
        sanitize_sheet_name(&long, &mut used);
        let second = sanitize_sheet_name(&long, &mut used);

        assert!(second.ends_with(" (2)"));
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn blank_name_gets_placeholder() {
        let mut used = HashSet::new();
        assert_eq!(sanitize_sheet_name(" '' ", &mut used), "Sheet");
    }

    #[test]
    fn writes_workbook_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("nested").join("report.xlsx");

        let mut table = ReportTable::new(vec!["Metric".into(), "Value".into()]);
        table.push_row(vec![ReportCell::text("Alpha"), ReportCell::Number(0.81)]);
        let report = Report {
            sections: vec![
                ReportSection::new("Summary").with_table(table).with_note("note"),
                ReportSection::new("Summary"),
            ],
        };

        let written = XlsxReportWriter::new().write(&report, &destination).unwrap();

        assert!(destination.exists());
        assert!(!XlsxReportWriter::temp_path(&destination).exists());
        assert_eq!(written.sheet_names, vec!["Summary", "Summary (2)"]);
    }
}
