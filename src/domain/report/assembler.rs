//! Report Assembler - Lays analysis outcomes out as sheets of tables.
//!
//! Owns sheet order, bilingual headers and rounding. Fonts, fills and
//! widths belong to the writer.

use super::{Report, ReportCell, ReportSection, ReportTable};
use crate::domain::analysis::{
    AlphaResult, AlphaStatus, AnalysisOutcome, AnalysisResults, CalculationFailure,
    ConstructValidityResult, CorrelationStrength, SplitHalfResult,
};
use crate::domain::foundation::BilingualLabel;

pub const SHEET_TOTAL_ALPHA: &str = "Total Cronbach's Alpha";
pub const SHEET_DELETION_IMPACT: &str = "Question Deletion Impact";
pub const SHEET_SPLIT_HALF: &str = "Split Half";
pub const SHEET_CONSTRUCT_VALIDITY: &str = "Construct Validity";
pub const SHEET_ITEM_VALIDITY: &str = "Question Construct Validity";

/// Rounding applied to coefficients, variances and ranks.
pub const DEFAULT_DECIMAL_PLACES: u32 = 6;

const METRIC: BilingualLabel = BilingualLabel::new("Metric", "المقياس");
const VALUE: BilingualLabel = BilingualLabel::new("Value", "القيمة");
const INTERPRETATION: BilingualLabel = BilingualLabel::new("Interpretation", "التفسير");
const QUESTION: BilingualLabel = BilingualLabel::new("Question", "السؤال");
const PARTICIPANT: BilingualLabel = BilingualLabel::new("Participant", "المشارك");
const DIMENSION: BilingualLabel = BilingualLabel::new("Dimension", "البعد");
const UNDEFINED: BilingualLabel = BilingualLabel::new("Undefined", "غير محدد");

/// Name of the sheet holding one dimension's alpha.
pub fn dimension_sheet_name(dimension: &str) -> String {
    format!("Dimension {}", dimension)
}

fn header(labels: &[BilingualLabel]) -> Vec<String> {
    labels.iter().map(ToString::to_string).collect()
}

fn label_cell(label: BilingualLabel) -> ReportCell {
    ReportCell::Text(label.to_string())
}

fn strength_cell(strength: Option<CorrelationStrength>) -> ReportCell {
    label_cell(strength.map_or(UNDEFINED, |s| s.label()))
}

/// Builds a `Report` from `AnalysisResults`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportAssembler {
    decimal_places: u32,
}

impl ReportAssembler {
    pub fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Rounds half away from zero to the configured decimal places.
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimal_places as i32);
        (value * factor).round() / factor
    }

    fn number(&self, value: f64) -> ReportCell {
        ReportCell::Number(self.round(value))
    }

    fn optional_number(&self, value: Option<f64>) -> ReportCell {
        ReportCell::optional_number(value.map(|v| self.round(v)))
    }

    /// Sections in fixed order: total alpha, one per dimension, deletion
    /// impact, split half, construct validity, item construct validity.
    ///
    /// A failed outcome still gets its sheet, carrying the failure message.
    pub fn assemble(&self, results: &AnalysisResults) -> Report {
        let mut sections = Vec::with_capacity(5 + results.dimension_alphas.len());

        sections.push(self.alpha_section(SHEET_TOTAL_ALPHA, &results.total_alpha, false));
        for dimension in &results.dimension_alphas {
            sections.push(self.alpha_section(
                &dimension_sheet_name(&dimension.dimension),
                &dimension.outcome,
                true,
            ));
        }
        sections.push(self.deletion_section(&results.total_alpha));
        sections.push(self.split_half_section(&results.split_half));
        sections.push(self.construct_section(&results.construct_validity));
        sections.push(self.item_validity_section(&results.construct_validity));

        Report { sections }
    }

    fn alpha_section(
        &self,
        sheet_name: &str,
        outcome: &AnalysisOutcome<AlphaResult>,
        with_deletion: bool,
    ) -> ReportSection {
        let result = match outcome {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Failed(failure) => return failed_section(sheet_name, failure),
        };

        let mut metrics = ReportTable::new(header(&[METRIC, VALUE, INTERPRETATION]));
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Total Items", "العناصر الكلية")),
            result.n_items.into(),
            ReportCell::Empty,
        ]);
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Complete Responses", "الاستجابات المكتملة")),
            result.n_participants.into(),
            ReportCell::Empty,
        ]);
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Sum of Item Variances", "مجموع تباينات العناصر")),
            self.number(result.sum_item_variances),
            ReportCell::Empty,
        ]);
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Total Score Variance", "تباين الدرجة الكلية")),
            self.number(result.total_score_variance),
            ReportCell::Empty,
        ]);
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Cronbach's Alpha", "معامل ألفا كرونباخ")),
            self.number(result.alpha),
            label_cell(result.band.label()),
        ]);

        let mut variances = ReportTable::new(header(&[
            QUESTION,
            BilingualLabel::new("Variance", "التباين"),
        ]))
        .with_title(BilingualLabel::new("Item Variances", "تباينات العناصر").to_string());
        for item in &result.item_variances {
            variances.push_row(vec![item.item.as_str().into(), self.number(item.variance)]);
        }

        let mut section = ReportSection::new(sheet_name)
            .with_table(metrics)
            .with_table(variances);
        if with_deletion {
            section = section.with_table(
                self.deletion_table(result)
                    .with_title(BilingualLabel::new("Question Deletion Impact", "أثر حذف السؤال").to_string()),
            );
        }
        if result.status == AlphaStatus::ZeroVariance {
            section = section.with_note("Total score variance is zero; alpha is reported as 0.");
        }
        section
    }

    fn deletion_table(&self, result: &AlphaResult) -> ReportTable {
        let mut table = ReportTable::new(header(&[
            QUESTION,
            BilingualLabel::new("Alpha if Deleted", "معامل ألفا عند الحذف"),
            BilingualLabel::new("Alpha Change", "التغير في معامل ألفا"),
        ]));
        for impact in &result.deletion_impacts {
            table.push_row(vec![
                impact.item.as_str().into(),
                self.optional_number(impact.alpha_if_deleted),
                self.optional_number(impact.alpha_change),
            ]);
        }
        table
    }

    fn deletion_section(&self, outcome: &AnalysisOutcome<AlphaResult>) -> ReportSection {
        let result = match outcome {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Failed(failure) => {
                return failed_section(SHEET_DELETION_IMPACT, failure)
            }
        };

        let mut section = ReportSection::new(SHEET_DELETION_IMPACT).with_table(self.deletion_table(result));
        if result.deletion_impacts.iter().any(|d| d.alpha_if_deleted.is_none()) {
            section = section.with_note("Blank cells: alpha is undefined for the remaining items.");
        }
        section
    }

    fn split_half_section(&self, outcome: &AnalysisOutcome<SplitHalfResult>) -> ReportSection {
        let result = match outcome {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Failed(failure) => return failed_section(SHEET_SPLIT_HALF, failure),
        };

        let mut metrics = ReportTable::new(header(&[METRIC, VALUE, INTERPRETATION]));
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Odd Questions Count", "عدد الأسئلة الفردية")),
            result.odd_items.len().into(),
            ReportCell::Empty,
        ]);
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Even Questions Count", "عدد الأسئلة الزوجية")),
            result.even_items.len().into(),
            ReportCell::Empty,
        ]);
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Pearson Correlation", "معامل ارتباط بيرسون")),
            self.number(result.pearson_correlation),
            ReportCell::Empty,
        ]);
        metrics.push_row(vec![
            label_cell(BilingualLabel::new("Spearman-Brown Coefficient", "معامل سبيرمان-براون")),
            self.number(result.spearman_brown),
            label_cell(result.band.label()),
        ]);

        let mut halves = ReportTable::new(header(&[
            BilingualLabel::new("Odd Questions", "الأسئلة الفردية"),
            BilingualLabel::new("Even Questions", "الأسئلة الزوجية"),
        ]))
        .with_title(BilingualLabel::new("Question Halves", "نصفا الأسئلة").to_string());
        for (position, odd) in result.odd_items.iter().enumerate() {
            let even = result
                .even_items
                .get(position)
                .map_or(ReportCell::Empty, |e| e.as_str().into());
            halves.push_row(vec![odd.as_str().into(), even]);
        }

        let mut sums = ReportTable::new(header(&[
            PARTICIPANT,
            BilingualLabel::new("Odd Sum", "مجموع الأسئلة الفردية"),
            BilingualLabel::new("Even Sum", "مجموع الأسئلة الزوجية"),
        ]))
        .with_title(BilingualLabel::new("Participant Sums", "مجموع درجات المشاركين").to_string());
        for ((participant, odd), even) in result
            .participants
            .iter()
            .zip(&result.odd_sums)
            .zip(&result.even_sums)
        {
            sums.push_row(vec![(*participant).into(), self.number(*odd), self.number(*even)]);
        }

        ReportSection::new(SHEET_SPLIT_HALF)
            .with_table(metrics)
            .with_table(halves)
            .with_table(sums)
    }

    fn construct_section(&self, outcome: &AnalysisOutcome<ConstructValidityResult>) -> ReportSection {
        let result = match outcome {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Failed(failure) => {
                return failed_section(SHEET_CONSTRUCT_VALIDITY, failure)
            }
        };

        let mut correlations = ReportTable::new(header(&[
            DIMENSION,
            BilingualLabel::new("Correlation", "معامل الارتباط"),
            INTERPRETATION,
        ]));
        for dimension in &result.dimensions {
            correlations.push_row(vec![
                format!("Dimension {0} / البعد {0}", dimension.dimension).into(),
                self.optional_number(dimension.correlation),
                strength_cell(dimension.strength),
            ]);
        }

        let mut columns = header(&[
            PARTICIPANT,
            BilingualLabel::new("Total Score", "المجموع الكلي"),
            BilingualLabel::new("Total Rank", "الترتيب الكلي"),
        ]);
        for dimension in &result.dimensions {
            columns.push(format!("Dim {0} Score / درجة البعد {0}", dimension.dimension));
            columns.push(format!("Dim {0} Rank / ترتيب البعد {0}", dimension.dimension));
        }

        let mut scores = ReportTable::new(columns).with_title(
            BilingualLabel::new("Participant Scores and Ranks", "درجات وترتيب المشاركين").to_string(),
        );
        for (row, participant) in result.participants.iter().enumerate() {
            let mut cells = vec![
                (*participant).into(),
                self.number(result.total_scores[row]),
                self.number(result.total_ranks[row]),
            ];
            for dimension in &result.dimensions {
                cells.push(self.number(dimension.scores[row]));
                cells.push(self.number(dimension.ranks[row]));
            }
            scores.push_row(cells);
        }

        let mut section = ReportSection::new(SHEET_CONSTRUCT_VALIDITY)
            .with_table(correlations)
            .with_table(scores);
        if result.dimensions.iter().any(|d| d.correlation.is_none()) {
            section = section.with_note("Blank correlations: a score series has no variance.");
        }
        section
    }

    fn item_validity_section(
        &self,
        outcome: &AnalysisOutcome<ConstructValidityResult>,
    ) -> ReportSection {
        let result = match outcome {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Failed(failure) => return failed_section(SHEET_ITEM_VALIDITY, failure),
        };

        let mut table = ReportTable::new(header(&[
            DIMENSION,
            QUESTION,
            BilingualLabel::new("Corrected Correlation", "الارتباط المصحح"),
            INTERPRETATION,
        ]));
        for item in &result.items {
            table.push_row(vec![
                item.dimension.as_str().into(),
                item.item.as_str().into(),
                self.optional_number(item.correlation),
                strength_cell(item.strength),
            ]);
        }

        let mut section = ReportSection::new(SHEET_ITEM_VALIDITY).with_table(table);
        if result.items.iter().any(|i| i.correlation.is_none()) {
            section = section.with_note(
                "Blank correlations: the item or the rest of its dimension has no variance.",
            );
        }
        section
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMAL_PLACES)
    }
}

fn failed_section(sheet_name: &str, failure: &CalculationFailure) -> ReportSection {
    let mut table = ReportTable::new(header(&[
        BilingualLabel::new("Status", "الحالة"),
        BilingualLabel::new("Message", "الرسالة"),
    ]));
    table.push_row(vec![
        label_cell(BilingualLabel::new("Error", "خطأ")),
        failure.message.as_str().into(),
    ]);
    ReportSection::new(sheet_name)
        .with_table(table)
        .with_note(format!("Not computed: {}", failure.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::survey::{Dimension, DimensionMap, ItemSet, ResponseMatrix};

    fn items(names: &[&str]) -> ItemSet {
        ItemSet::new(names.to_vec()).unwrap()
    }

    fn results() -> AnalysisResults {
        let matrix = ResponseMatrix::from_complete_rows(
            vec!["Q1", "Q2", "Q3", "Q4"],
            vec![
                vec![3.0, 3.0, 2.0, 3.0],
                vec![2.0, 2.0, 2.0, 1.0],
                vec![1.0, 1.0, 2.0, 1.0],
                vec![3.0, 2.0, 3.0, 3.0],
                vec![2.0, 3.0, 1.0, 2.0],
            ],
        )
        .unwrap();
        let dimensions = DimensionMap::new(vec![
            Dimension::new("A", items(&["Q1", "Q2"])),
            Dimension::new("B", items(&["Q3", "Q4"])),
        ])
        .unwrap();
        AnalysisResults::compute(&matrix, &items(&["Q1", "Q2", "Q3", "Q4"]), &dimensions)
    }

    #[test]
    fn sections_follow_fixed_order() {
        let report = ReportAssembler::default().assemble(&results());

        assert_eq!(
            report.sheet_names(),
            vec![
                SHEET_TOTAL_ALPHA,
                "Dimension A",
                "Dimension B",
                SHEET_DELETION_IMPACT,
                SHEET_SPLIT_HALF,
                SHEET_CONSTRUCT_VALIDITY,
                SHEET_ITEM_VALIDITY,
            ]
        );
    }

    #[test]
    fn rounds_to_configured_places() {
        assert_eq!(ReportAssembler::default().round(0.91353826034), 0.913538);
        assert_eq!(ReportAssembler::new(2).round(0.8949), 0.89);
        assert_eq!(ReportAssembler::new(0).round(2.5), 3.0);
    }

    #[test]
    fn total_alpha_sheet_lists_metrics_with_interpretation() {
        let report = ReportAssembler::default().assemble(&results());
        let section = report.section(SHEET_TOTAL_ALPHA).unwrap();
        let metrics = &section.tables[0];

        assert_eq!(metrics.header[0], "Metric / المقياس");
        assert_eq!(metrics.rows[0][1], ReportCell::Integer(4));
        assert_eq!(metrics.rows[1][1], ReportCell::Integer(5));
        assert!(metrics.rows[4][2].as_text().is_some());
        assert_eq!(section.tables[1].rows.len(), 4);
    }

    #[test]
    fn deletion_sheet_has_one_row_per_item() {
        let report = ReportAssembler::default().assemble(&results());
        let table = &report.section(SHEET_DELETION_IMPACT).unwrap().tables[0];

        let names: Vec<_> = table.rows.iter().map(|r| r[0].as_text().unwrap()).collect();
        assert_eq!(names, vec!["Q1", "Q2", "Q3", "Q4"]);
    }

    #[test]
    fn two_item_dimension_deletion_cells_are_blank() {
        let report = ReportAssembler::default().assemble(&results());
        let section = report.section("Dimension A").unwrap();
        let deletion = &section.tables[2];

        assert!(deletion.rows.iter().all(|r| r[1] == ReportCell::Empty));
    }

    #[test]
    fn construct_sheet_has_score_and_rank_columns_per_dimension() {
        let report = ReportAssembler::default().assemble(&results());
        let scores = &report.section(SHEET_CONSTRUCT_VALIDITY).unwrap().tables[1];

        assert_eq!(scores.header.len(), 3 + 2 * 2);
        assert_eq!(scores.header[3], "Dim A Score / درجة البعد A");
        assert_eq!(scores.rows.len(), 5);
    }

    #[test]
    fn failed_outcome_becomes_annotated_section() {
        let mut results = results();
        results.split_half =
            AnalysisOutcome::Failed(CalculationFailure::new(ErrorCode::UndefinedCorrelation, "no spread"));

        let report = ReportAssembler::default().assemble(&results);
        let section = report.section(SHEET_SPLIT_HALF).unwrap();

        assert_eq!(section.tables[0].rows[0][1], ReportCell::text("no spread"));
        assert_eq!(section.notes, vec!["Not computed: UNDEFINED_CORRELATION"]);
    }
}
