//! Analysis Results - Every calculator run over one prepared matrix.

use serde::{Deserialize, Serialize};

use super::{
    AlphaResult, AnalysisOutcome, ConstructValidityCalculator, ConstructValidityResult,
    CronbachAlphaCalculator, SplitHalfCalculator, SplitHalfResult,
};
use crate::domain::survey::{DimensionMap, ItemSet, ResponseMatrix};

/// Alpha outcome for one named dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAlpha {
    pub dimension: String,
    pub outcome: AnalysisOutcome<AlphaResult>,
}

/// The full set of reliability and validity outcomes.
///
/// Each outcome fails independently; a failed split-half does not stop
/// alpha or construct validity from being reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub total_alpha: AnalysisOutcome<AlphaResult>,
    /// In dimension-map order.
    pub dimension_alphas: Vec<DimensionAlpha>,
    pub split_half: AnalysisOutcome<SplitHalfResult>,
    pub construct_validity: AnalysisOutcome<ConstructValidityResult>,
}

impl AnalysisResults {
    /// Runs every calculator against `matrix`.
    pub fn compute(matrix: &ResponseMatrix, items: &ItemSet, dimensions: &DimensionMap) -> Self {
        let total_alpha = CronbachAlphaCalculator::calculate_with_deletion_impact(matrix, items);

        let dimension_alphas = dimensions
            .iter()
            .map(|dimension| DimensionAlpha {
                dimension: dimension.name.clone(),
                outcome: CronbachAlphaCalculator::calculate_with_deletion_impact(
                    matrix,
                    &dimension.items,
                ),
            })
            .collect();

        Self {
            total_alpha,
            dimension_alphas,
            split_half: SplitHalfCalculator::calculate(matrix, items),
            construct_validity: ConstructValidityCalculator::calculate(matrix, items, dimensions),
        }
    }

    /// Number of outcomes that failed.
    pub fn failure_count(&self) -> usize {
        let dimensions = self
            .dimension_alphas
            .iter()
            .filter(|d| !d.outcome.is_success())
            .count();

        dimensions
            + usize::from(!self.total_alpha.is_success())
            + usize::from(!self.split_half.is_success())
            + usize::from(!self.construct_validity.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::survey::Dimension;

    fn items(names: &[&str]) -> ItemSet {
        ItemSet::new(names.to_vec()).unwrap()
    }

    fn matrix() -> ResponseMatrix {
        ResponseMatrix::from_complete_rows(
            vec!["Q1", "Q2", "Q3", "Q4", "Q5"],
            vec![
                vec![1.0, 2.0, 1.0, 2.0, 3.0],
                vec![2.0, 2.0, 3.0, 1.0, 2.0],
                vec![3.0, 3.0, 2.0, 3.0, 3.0],
                vec![2.0, 1.0, 2.0, 2.0, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn computes_one_alpha_per_dimension_in_order() {
        let dimensions = DimensionMap::new(vec![
            Dimension::new("First", items(&["Q1", "Q2", "Q3"])),
            Dimension::new("Second", items(&["Q4", "Q5"])),
        ])
        .unwrap();

        let results = AnalysisResults::compute(&matrix(), &items(&["Q1", "Q2", "Q3", "Q4", "Q5"]), &dimensions);

        let names: Vec<&str> = results.dimension_alphas.iter().map(|d| d.dimension.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!(results.total_alpha.is_success());
        assert_eq!(
            results.total_alpha.success().unwrap().deletion_impacts.len(),
            5
        );
    }

    #[test]
    fn failures_are_independent() {
        let dimensions = DimensionMap::new(vec![
            Dimension::new("Solo", items(&["Q1"])),
            Dimension::new("Rest", items(&["Q2", "Q3", "Q4", "Q5"])),
        ])
        .unwrap();

        let results = AnalysisResults::compute(&matrix(), &items(&["Q1", "Q2", "Q3", "Q4", "Q5"]), &dimensions);

        let solo = &results.dimension_alphas[0].outcome;
        assert_eq!(solo.failure().unwrap().code, ErrorCode::InsufficientItems);
        assert!(results.dimension_alphas[1].outcome.is_success());
        assert!(results.construct_validity.is_success());
        assert_eq!(results.failure_count(), 1);
    }
}
