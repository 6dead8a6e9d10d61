//! AnalyzeSurveyHandler - Load a survey sheet, run every calculator, write the report.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::analysis::{AlphaResult, AlphaStatus, AnalysisOutcome, AnalysisResults};
use crate::domain::foundation::{
    AnalysisRunId, Diagnostic, ErrorCode, Timestamp, ValidationError,
};
use crate::domain::report::ReportAssembler;
use crate::domain::survey::{
    ColumnResolver, ColumnSpec, DataPreparer, Dimension, DimensionMap, HeaderRowPolicy, ItemSet,
    ResolvedColumn,
};
use crate::ports::{
    DiagnosticSink, ReportWriteError, ReportWriter, SheetSelector, SpreadsheetError,
    SpreadsheetReader,
};

/// A dimension as the caller describes it: a name and sheet columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionColumns {
    pub name: String,
    pub columns: ColumnSpec,
}

impl DimensionColumns {
    pub fn new(name: impl Into<String>, columns: ColumnSpec) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// Command to analyse one survey worksheet.
#[derive(Debug, Clone)]
pub struct AnalyzeSurveyCommand {
    pub input_path: PathBuf,
    pub sheet: SheetSelector,
    /// 0-based sheet columns holding the instrument's items.
    pub item_columns: ColumnSpec,
    pub dimensions: Vec<DimensionColumns>,
    /// Replaces the default header-row placeholders when set.
    pub header_placeholders: Option<Vec<String>>,
    pub output_path: PathBuf,
    pub decimal_places: u32,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeSurveyResult {
    pub run_id: AnalysisRunId,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub sheet_names: Vec<String>,
    /// Body rows read from the sheet.
    pub loaded_rows: usize,
    /// Leading rows skipped as headers.
    pub discarded_rows: usize,
    /// Rows with every item observed.
    pub complete_cases: usize,
    pub items: Vec<String>,
    pub dimensions: DimensionMap,
    pub diagnostics: Vec<Diagnostic>,
    pub results: AnalysisResults,
}

/// Errors that stop a run.
///
/// Calculator failures are not among them; they are reported in the
/// workbook and in `AnalyzeSurveyResult::results`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    #[error("No item columns could be resolved against the sheet")]
    NoItems,

    #[error("Invalid survey layout: {0}")]
    InvalidLayout(#[from] ValidationError),

    #[error("Failed to write report: {0}")]
    ReportWrite(#[from] ReportWriteError),

    #[error("Report was not created at {0}")]
    OutputMissing(PathBuf),
}

/// Handler for survey analysis runs.
pub struct AnalyzeSurveyHandler {
    reader: Arc<dyn SpreadsheetReader>,
    writer: Arc<dyn ReportWriter>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl AnalyzeSurveyHandler {
    pub fn new(
        reader: Arc<dyn SpreadsheetReader>,
        writer: Arc<dyn ReportWriter>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            reader,
            writer,
            diagnostics,
        }
    }

    pub fn handle(&self, cmd: AnalyzeSurveyCommand) -> Result<AnalyzeSurveyResult, AnalysisError> {
        let run_id = AnalysisRunId::new();
        let started_at = Timestamp::now();
        let mut diagnostics = Vec::new();

        tracing::info!(
            run_id = %run_id,
            input = %cmd.input_path.display(),
            sheet = %cmd.sheet,
            "Starting survey analysis"
        );

        // 1. Load the sheet and name the selected columns
        let table = self.reader.read(&cmd.input_path, &cmd.sheet)?;
        let resolver = ColumnResolver::new(&table.headers);

        let (item_columns, found) = resolver.resolve(&cmd.item_columns, "items");
        self.record(&mut diagnostics, found);
        if item_columns.is_empty() {
            return Err(AnalysisError::NoItems);
        }
        let items = ItemSet::new(item_columns.iter().map(|c| c.name.clone()).collect::<Vec<_>>())?;
        // Header rows are judged on item columns only
        let header_columns: Vec<usize> = item_columns.iter().map(|c| c.index).collect();

        let mut columns = item_columns;
        let mut dimensions = Vec::with_capacity(cmd.dimensions.len());
        for dimension in &cmd.dimensions {
            let context = format!("dimension '{}'", dimension.name);
            let (resolved, found) = resolver.resolve(&dimension.columns, &context);
            self.record(&mut diagnostics, found);

            let names: Vec<String> = resolved.iter().map(|c| c.name.clone()).collect();
            dimensions.push(Dimension::new(dimension.name.clone(), ItemSet::new(names)?));
            merge_columns(&mut columns, resolved);
        }
        let dimensions = DimensionMap::new(dimensions)?;
        if let Some(coverage) = dimensions.coverage_diagnostic(&items) {
            self.record(&mut diagnostics, vec![coverage]);
        }

        // 2. Clean: skip header rows, score the response labels
        let preparer = DataPreparer::new(
            cmd.header_placeholders
                .clone()
                .map(HeaderRowPolicy::new)
                .unwrap_or_default(),
        );
        let prepared = preparer.prepare_scoped(&table, &columns, &header_columns);
        self.record(&mut diagnostics, prepared.diagnostics);
        let matrix = prepared.matrix;

        let complete_cases = matrix
            .complete_cases(items.items())
            .map(|cases| cases.participant_count())
            .unwrap_or(0);

        // 3. Compute
        let results = AnalysisResults::compute(&matrix, &items, &dimensions);
        self.record(&mut diagnostics, outcome_diagnostics(&results));

        // 4. Assemble and write
        let report = ReportAssembler::new(cmd.decimal_places).assemble(&results);
        let written = self.writer.write(&report, &cmd.output_path)?;
        if !self.writer.exists(&written.path) {
            return Err(AnalysisError::OutputMissing(written.path));
        }

        let finished_at = Timestamp::now();
        tracing::info!(
            run_id = %run_id,
            output = %written.path.display(),
            participants = complete_cases,
            items = items.len(),
            failures = results.failure_count(),
            elapsed_ms = finished_at.duration_since(&started_at).num_milliseconds(),
            "Survey analysis complete"
        );

        Ok(AnalyzeSurveyResult {
            run_id,
            started_at,
            finished_at,
            input_path: cmd.input_path,
            output_path: written.path,
            sheet_names: written.sheet_names,
            loaded_rows: prepared.loaded_rows,
            discarded_rows: prepared.discarded_rows,
            complete_cases,
            items: items.items().to_vec(),
            dimensions,
            diagnostics,
            results,
        })
    }

    fn record(&self, collected: &mut Vec<Diagnostic>, found: Vec<Diagnostic>) {
        self.diagnostics.record_all(&found);
        collected.extend(found);
    }
}

/// Adds columns not already present, keeping first-seen order.
fn merge_columns(columns: &mut Vec<ResolvedColumn>, more: Vec<ResolvedColumn>) {
    for column in more {
        if !columns.iter().any(|c| c.index == column.index) {
            columns.push(column);
        }
    }
}

/// Warnings for failed or degenerate outcomes.
fn outcome_diagnostics(results: &AnalysisResults) -> Vec<Diagnostic> {
    let mut found = Vec::new();

    let mut alpha = |scope: &str, outcome: &AnalysisOutcome<AlphaResult>| match outcome {
        AnalysisOutcome::Success(result) if result.status == AlphaStatus::ZeroVariance => {
            found.push(Diagnostic::warning(
                ErrorCode::ZeroVariance,
                format!("{}: total score variance is zero; alpha reported as 0", scope),
            ));
        }
        AnalysisOutcome::Success(_) => {}
        AnalysisOutcome::Failed(failure) => {
            found.push(Diagnostic::warning(
                failure.code,
                format!("{}: {}", scope, failure.message),
            ));
        }
    };

    alpha("Cronbach's alpha", &results.total_alpha);
    for dimension in &results.dimension_alphas {
        alpha(
            format!("Cronbach's alpha for dimension '{}'", dimension.dimension).as_str(),
            &dimension.outcome,
        );
    }

    if let Some(failure) = results.split_half.failure() {
        found.push(Diagnostic::warning(
            failure.code,
            format!("Split-half: {}", failure.message),
        ));
    }
    if let Some(failure) = results.construct_validity.failure() {
        found.push(Diagnostic::warning(
            failure.code,
            format!("Construct validity: {}", failure.message),
        ));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        CollectingDiagnosticSink, InMemoryReportWriter, InMemorySpreadsheetReader,
    };
    use crate::domain::report::{SHEET_SPLIT_HALF, SHEET_TOTAL_ALPHA};
    use crate::domain::survey::{CellValue, RawTable, LABEL_FULLY_ACQUIRED, LABEL_NOT_ACQUIRED};

    const INPUT: &str = "survey.xlsx";
    const OUTPUT: &str = "out/statistical_analysis.xlsx";

    fn survey_table() -> RawTable {
        let scores = [
            [3.0, 3.0, 2.0, 3.0],
            [2.0, 2.0, 2.0, 1.0],
            [1.0, 1.0, 2.0, 1.0],
            [3.0, 2.0, 3.0, 3.0],
            [2.0, 3.0, 1.0, 2.0],
        ];
        let mut rows = vec![vec![
            CellValue::Empty,
            CellValue::text(LABEL_FULLY_ACQUIRED),
            CellValue::text(LABEL_NOT_ACQUIRED),
            CellValue::Empty,
            CellValue::Empty,
        ]];
        for (i, row) in scores.iter().enumerate() {
            let mut cells = vec![CellValue::text(format!("P{}", i + 1))];
            cells.extend(row.iter().map(|v| CellValue::Number(*v)));
            rows.push(cells);
        }
        RawTable::new(
            ["Name", "Q1", "Q2", "Q3", "Q4"].iter().map(|s| s.to_string()).collect(),
            rows,
        )
    }

    fn command() -> AnalyzeSurveyCommand {
        AnalyzeSurveyCommand {
            input_path: PathBuf::from(INPUT),
            sheet: SheetSelector::First,
            item_columns: ColumnSpec::range(1, 4),
            dimensions: vec![
                DimensionColumns::new("A", ColumnSpec::range(1, 2)),
                DimensionColumns::new("B", ColumnSpec::range(3, 4)),
            ],
            header_placeholders: None,
            output_path: PathBuf::from(OUTPUT),
            decimal_places: 6,
        }
    }

    struct Fixture {
        handler: AnalyzeSurveyHandler,
        writer: Arc<InMemoryReportWriter>,
        sink: Arc<CollectingDiagnosticSink>,
    }

    fn fixture(table: RawTable) -> Fixture {
        let reader = Arc::new(InMemorySpreadsheetReader::new().with_sheet(INPUT, "Sheet1", table));
        let writer = Arc::new(InMemoryReportWriter::new());
        let sink = Arc::new(CollectingDiagnosticSink::new());
        Fixture {
            handler: AnalyzeSurveyHandler::new(reader, writer.clone(), sink.clone()),
            writer,
            sink,
        }
    }

    #[test]
    fn test_analyze_survey_writes_report() {
        let f = fixture(survey_table());

        let result = f.handler.handle(command()).unwrap();

        assert_eq!(result.output_path, PathBuf::from(OUTPUT));
        assert_eq!(f.writer.write_count(), 1);
        assert_eq!(result.sheet_names[0], SHEET_TOTAL_ALPHA);
        assert_eq!(result.items, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert!(result.results.total_alpha.is_success());
    }

    #[test]
    fn test_analyze_survey_reports_row_counts() {
        let f = fixture(survey_table());

        let result = f.handler.handle(command()).unwrap();

        assert_eq!(result.loaded_rows, 6);
        assert_eq!(result.discarded_rows, 1);
        assert_eq!(result.complete_cases, 5);
        assert!(f.sink.contains(ErrorCode::HeaderRowsDiscarded));
    }

    #[test]
    fn test_analyze_survey_detects_header_rows_on_item_columns_only() {
        let mut table = survey_table();
        table.headers.push("Extra".to_string());
        for (i, row) in table.rows.iter_mut().enumerate() {
            let extra = if i == 0 { 5.0 } else { 2.0 };
            row.push(CellValue::Number(extra));
        }
        let f = fixture(table);
        let mut cmd = command();
        cmd.dimensions[1] = DimensionColumns::new("B", ColumnSpec::from_indices([3, 4, 5]));

        let result = f.handler.handle(cmd).unwrap();

        assert_eq!(result.loaded_rows, 6);
        assert_eq!(result.discarded_rows, 1);
        assert_eq!(result.complete_cases, 5);
    }

    #[test]
    fn test_analyze_survey_skips_out_of_range_columns() {
        let f = fixture(survey_table());
        let mut cmd = command();
        cmd.item_columns = ColumnSpec::from_indices([1, 2, 3, 4, 12]);

        let result = f.handler.handle(cmd).unwrap();

        assert_eq!(result.items.len(), 4);
        assert!(f.sink.contains(ErrorCode::MissingColumn));
        assert_eq!(result.diagnostics, f.sink.diagnostics());
    }

    #[test]
    fn test_analyze_survey_fails_without_items() {
        let f = fixture(survey_table());
        let mut cmd = command();
        cmd.item_columns = ColumnSpec::from_indices([20, 21]);

        let result = f.handler.handle(cmd);

        assert!(matches!(result, Err(AnalysisError::NoItems)));
        assert_eq!(f.writer.write_count(), 0);
    }

    #[test]
    fn test_analyze_survey_fails_for_unknown_input() {
        let f = fixture(survey_table());
        let mut cmd = command();
        cmd.input_path = PathBuf::from("missing.xlsx");

        let result = f.handler.handle(cmd);

        assert!(matches!(
            result,
            Err(AnalysisError::Spreadsheet(SpreadsheetError::NotFound(_)))
        ));
    }

    #[test]
    fn test_analyze_survey_warns_on_partial_dimension_coverage() {
        let f = fixture(survey_table());
        let mut cmd = command();
        cmd.dimensions.pop();

        f.handler.handle(cmd).unwrap();

        assert!(f.sink.contains(ErrorCode::DimensionCoverageMismatch));
    }

    #[test]
    fn test_analyze_survey_keeps_going_when_a_calculator_fails() {
        let f = fixture(survey_table());
        let mut cmd = command();
        cmd.item_columns = ColumnSpec::from_indices([1]);
        cmd.dimensions = vec![DimensionColumns::new("A", ColumnSpec::from_indices([1]))];

        let result = f.handler.handle(cmd).unwrap();

        assert!(!result.results.total_alpha.is_success());
        assert!(!result.results.split_half.is_success());
        assert!(f.sink.contains(ErrorCode::InsufficientItems));

        let (_, report) = f.writer.last().unwrap();
        assert!(report.section(SHEET_SPLIT_HALF).is_some());
    }

    #[test]
    fn test_analyze_survey_rejects_duplicate_dimension_names() {
        let f = fixture(survey_table());
        let mut cmd = command();
        cmd.dimensions[1].name = "A".into();

        let result = f.handler.handle(cmd);

        assert!(matches!(result, Err(AnalysisError::InvalidLayout(_))));
    }
}
