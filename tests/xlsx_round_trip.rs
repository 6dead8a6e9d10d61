//! Integration tests for the file-backed adapters.
//!
//! A survey workbook is written with `rust_xlsxwriter`, analysed through
//! `CalamineSpreadsheetReader` and `XlsxReportWriter`, and the resulting
//! report is read back with `calamine`.

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use survey_reliability::adapters::{
    CalamineSpreadsheetReader, CollectingDiagnosticSink, XlsxReportWriter,
};
use survey_reliability::application::{
    AnalysisError, AnalyzeSurveyCommand, AnalyzeSurveyHandler, DimensionColumns,
};
use survey_reliability::domain::foundation::ErrorCode;
use survey_reliability::domain::report::{
    SHEET_CONSTRUCT_VALIDITY, SHEET_DELETION_IMPACT, SHEET_ITEM_VALIDITY, SHEET_SPLIT_HALF,
    SHEET_TOTAL_ALPHA,
};
use survey_reliability::domain::survey::{
    ColumnSpec, LABEL_FULLY_ACQUIRED, LABEL_NOT_ACQUIRED, LABEL_PARTIALLY_ACQUIRED,
};
use survey_reliability::ports::{SheetSelector, SpreadsheetError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const RESPONSES: [[u8; 6]; 10] = [
    [3, 3, 2, 3, 2, 3],
    [2, 2, 2, 2, 1, 2],
    [1, 1, 2, 1, 1, 1],
    [3, 2, 3, 3, 3, 2],
    [2, 3, 2, 2, 2, 3],
    [1, 2, 1, 1, 2, 1],
    [3, 3, 3, 2, 3, 3],
    [2, 1, 1, 2, 2, 1],
    [3, 3, 2, 3, 3, 2],
    [1, 1, 1, 2, 1, 1],
];

fn label(score: u8) -> &'static str {
    match score {
        3 => LABEL_FULLY_ACQUIRED,
        2 => LABEL_PARTIALLY_ACQUIRED,
        _ => LABEL_NOT_ACQUIRED,
    }
}

/// Writes the survey sheet: a name column, six items, one blank row under
/// the headers. Q6 is answered with response labels, the rest with scores.
fn write_survey(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Responses").unwrap();

    worksheet.write_string(0, 0, "Name").unwrap();
    for q in 0..6u16 {
        worksheet
            .write_string(0, q + 1, format!("Q{}", q + 1).as_str())
            .unwrap();
    }

    for (i, row) in RESPONSES.iter().enumerate() {
        let r = i as u32 + 2;
        worksheet
            .write_string(r, 0, format!("P{}", i + 1).as_str())
            .unwrap();
        for (q, score) in row.iter().enumerate() {
            let c = q as u16 + 1;
            if q == 5 {
                worksheet.write_string(r, c, label(*score)).unwrap();
            } else {
                worksheet.write_number(r, c, f64::from(*score)).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

fn command(input: PathBuf, output: PathBuf) -> AnalyzeSurveyCommand {
    AnalyzeSurveyCommand {
        input_path: input,
        sheet: SheetSelector::Named("Responses".to_string()),
        item_columns: "1-6".parse().unwrap(),
        dimensions: vec![
            DimensionColumns::new("A", ColumnSpec::range(1, 3)),
            DimensionColumns::new("B", ColumnSpec::range(4, 6)),
        ],
        header_placeholders: None,
        output_path: output,
        decimal_places: 6,
    }
}

fn handler(sink: Arc<CollectingDiagnosticSink>) -> AnalyzeSurveyHandler {
    AnalyzeSurveyHandler::new(
        Arc::new(CalamineSpreadsheetReader::new()),
        Arc::new(XlsxReportWriter::new()),
        sink,
    )
}

fn read_sheet(path: &Path, name: &str) -> Range<Data> {
    let mut workbook = open_workbook_auto(path).unwrap();
    workbook.worksheet_range(name).unwrap()
}

/// Value in column 1 of the first row whose column 0 starts with `metric`.
fn metric_value(range: &Range<Data>, metric: &str) -> Option<f64> {
    range.rows().find_map(|row| match (row.first(), row.get(1)) {
        (Some(Data::String(name)), Some(Data::Float(value))) if name.starts_with(metric) => {
            Some(*value)
        }
        _ => None,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn analyses_workbook_and_writes_every_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    let output = dir.path().join("output").join("statistical_analysis.xlsx");
    write_survey(&input);

    let sink = Arc::new(CollectingDiagnosticSink::new());
    let result = handler(sink.clone())
        .handle(command(input, output.clone()))
        .unwrap();

    assert_eq!(result.output_path, output);
    assert_eq!(result.loaded_rows, 11);
    assert_eq!(result.discarded_rows, 1);
    assert_eq!(result.complete_cases, 10);
    assert_eq!(result.items, vec!["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]);
    assert!(sink.contains(ErrorCode::HeaderRowsDiscarded));

    let workbook = open_workbook_auto(&output).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            SHEET_TOTAL_ALPHA.to_string(),
            "Dimension A".to_string(),
            "Dimension B".to_string(),
            SHEET_DELETION_IMPACT.to_string(),
            SHEET_SPLIT_HALF.to_string(),
            SHEET_CONSTRUCT_VALIDITY.to_string(),
            SHEET_ITEM_VALIDITY.to_string(),
        ]
    );
}

#[test]
fn report_cells_carry_rounded_coefficients() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    let output = dir.path().join("report.xlsx");
    write_survey(&input);

    handler(Arc::new(CollectingDiagnosticSink::new()))
        .handle(command(input, output.clone()))
        .unwrap();

    let total = read_sheet(&output, SHEET_TOTAL_ALPHA);
    let alpha = metric_value(&total, "Cronbach's Alpha").expect("alpha cell");
    assert!((alpha - 0.913538).abs() < 1e-9, "alpha was {}", alpha);

    let dimension_a = read_sheet(&output, "Dimension A");
    let alpha_a = metric_value(&dimension_a, "Cronbach's Alpha").expect("alpha cell");
    assert!((alpha_a - 0.846154).abs() < 1e-9, "alpha was {}", alpha_a);
}

#[test]
fn missing_input_fails_without_writing_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.xlsx");

    let err = handler(Arc::new(CollectingDiagnosticSink::new()))
        .handle(command(dir.path().join("absent.xlsx"), output.clone()))
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Spreadsheet(SpreadsheetError::NotFound(_))
    ));
    assert!(!output.exists());
}

#[test]
fn unknown_sheet_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    write_survey(&input);

    let mut cmd = command(input, dir.path().join("report.xlsx"));
    cmd.sheet = SheetSelector::Named("Sheet9".to_string());

    let err = handler(Arc::new(CollectingDiagnosticSink::new()))
        .handle(cmd)
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Spreadsheet(SpreadsheetError::SheetNotFound(name)) if name == "Sheet9"
    ));
}
