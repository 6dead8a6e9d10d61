//! Cronbach's Alpha Calculator - Internal consistency and item deletion impact.
//!
//! alpha = k / (k - 1) * (1 - sum(item variances) / variance(total score)),
//! computed over complete cases with sample (n - 1) variances.

use serde::{Deserialize, Serialize};

use super::descriptive::sample_variance;
use super::{AnalysisOutcome, CalculationFailure, ReliabilityBand};
use crate::domain::foundation::ErrorCode;
use crate::domain::survey::{ItemSet, ResponseMatrix};

/// Sample variance of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemVariance {
    pub item: String,
    pub variance: f64,
}

/// Whether alpha came from the formula or the zero-variance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaStatus {
    Computed,
    /// Every participant had the same total score; alpha is reported as 0.
    ZeroVariance,
}

/// Alpha of the instrument with one item removed.
///
/// Both values are `None` when the remaining set cannot be analysed
/// (for example only one item would be left).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionImpact {
    pub item: String,
    pub alpha_if_deleted: Option<f64>,
    /// `alpha_if_deleted - alpha`; positive means the item hurts consistency.
    pub alpha_change: Option<f64>,
}

/// Cronbach's alpha and its building blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaResult {
    pub n_items: usize,
    pub n_participants: usize,
    pub item_variances: Vec<ItemVariance>,
    pub sum_item_variances: f64,
    pub total_score_variance: f64,
    pub alpha: f64,
    pub status: AlphaStatus,
    pub band: ReliabilityBand,
    /// One entry per item, in item order; empty unless requested.
    pub deletion_impacts: Vec<DeletionImpact>,
}

const ZERO_VARIANCE_TOLERANCE: f64 = f64::EPSILON;

/// Calculator for Cronbach's alpha.
pub struct CronbachAlphaCalculator;

impl CronbachAlphaCalculator {
    /// Alpha over `items`, without deletion impact.
    ///
    /// # Edge Cases
    /// - Fewer than 2 items: `InsufficientItems`
    /// - Fewer than 2 complete participants: `InsufficientData`
    /// - Zero total-score variance: alpha 0.0 with `AlphaStatus::ZeroVariance`
    /// - Item not in the matrix: `MissingColumn`
    pub fn calculate(matrix: &ResponseMatrix, items: &ItemSet) -> AnalysisOutcome<AlphaResult> {
        Self::compute(matrix, items).into()
    }

    /// Alpha over `items` plus, for each item, alpha recomputed without it.
    ///
    /// Each reduced set does its own complete-case filtering, so a row that
    /// was only missing the deleted item rejoins the sample.
    pub fn calculate_with_deletion_impact(
        matrix: &ResponseMatrix,
        items: &ItemSet,
    ) -> AnalysisOutcome<AlphaResult> {
        let mut result = match Self::compute(matrix, items) {
            Ok(result) => result,
            Err(failure) => return AnalysisOutcome::Failed(failure),
        };

        let baseline = result.alpha;
        result.deletion_impacts = items
            .iter()
            .map(|item| {
                let alpha_if_deleted = Self::compute(matrix, &items.without(item))
                    .ok()
                    .map(|reduced| reduced.alpha);
                DeletionImpact {
                    item: item.clone(),
                    alpha_if_deleted,
                    alpha_change: alpha_if_deleted.map(|a| a - baseline),
                }
            })
            .collect();

        AnalysisOutcome::Success(result)
    }

    fn compute(matrix: &ResponseMatrix, items: &ItemSet) -> Result<AlphaResult, CalculationFailure> {
        let k = items.len();
        if k < 2 {
            return Err(CalculationFailure::insufficient_items(k));
        }

        let cases = matrix.complete_cases(items.items())?;
        let n = cases.participant_count();
        if n < 2 {
            return Err(CalculationFailure::insufficient_data(n));
        }

        let item_variances = items
            .iter()
            .enumerate()
            .map(|(column, item)| {
                Ok(ItemVariance {
                    item: item.clone(),
                    variance: variance_of(&cases.column(column))?,
                })
            })
            .collect::<Result<Vec<_>, CalculationFailure>>()?;

        let sum_item_variances: f64 = item_variances.iter().map(|v| v.variance).sum();
        let total_score_variance = variance_of(&cases.totals())?;

        // Equal fractional totals leave rounding noise rather than an exact zero
        let zero_floor = ZERO_VARIANCE_TOLERANCE * sum_item_variances.max(1.0);
        let (alpha, status) = if total_score_variance <= zero_floor {
            (0.0, AlphaStatus::ZeroVariance)
        } else {
            let k = k as f64;
            let alpha = k / (k - 1.0) * (1.0 - sum_item_variances / total_score_variance);
            (alpha, AlphaStatus::Computed)
        };

        if !alpha.is_finite() {
            return Err(CalculationFailure::new(
                ErrorCode::ComputationFailed,
                "Cronbach's alpha is not a finite number",
            ));
        }

        Ok(AlphaResult {
            n_items: k,
            n_participants: n,
            item_variances,
            sum_item_variances,
            total_score_variance,
            alpha,
            status,
            band: ReliabilityBand::from_coefficient(alpha),
            deletion_impacts: Vec::new(),
        })
    }
}

fn variance_of(values: &[f64]) -> Result<f64, CalculationFailure> {
    sample_variance(values).ok_or_else(|| CalculationFailure::insufficient_data(values.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn items(names: &[&str]) -> ItemSet {
        ItemSet::new(names.to_vec()).unwrap()
    }

    fn matrix(rows: Vec<Vec<f64>>) -> ResponseMatrix {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let names: Vec<String> = (1..=width).map(|i| format!("Q{}", i)).collect();
        ResponseMatrix::from_complete_rows(names, rows).unwrap()
    }

    fn reference() -> ResponseMatrix {
        matrix(vec![
            vec![3.0, 3.0, 2.0, 3.0, 2.0, 3.0],
            vec![2.0, 2.0, 2.0, 2.0, 1.0, 2.0],
            vec![1.0, 1.0, 2.0, 1.0, 1.0, 1.0],
            vec![3.0, 2.0, 3.0, 3.0, 3.0, 2.0],
            vec![2.0, 3.0, 2.0, 2.0, 2.0, 3.0],
            vec![1.0, 2.0, 1.0, 1.0, 2.0, 1.0],
            vec![3.0, 3.0, 3.0, 2.0, 3.0, 3.0],
            vec![2.0, 1.0, 1.0, 2.0, 2.0, 1.0],
            vec![3.0, 3.0, 2.0, 3.0, 3.0, 2.0],
            vec![1.0, 1.0, 1.0, 2.0, 1.0, 1.0],
        ])
    }

    fn all_six() -> ItemSet {
        items(&["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"])
    }

    #[test]
    fn identical_items_give_alpha_of_one() {
        let m = matrix(vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]]);

        let result = CronbachAlphaCalculator::calculate(&m, &items(&["Q1", "Q2"]));
        let result = result.success().unwrap();

        assert!(close(result.alpha, 1.0));
        assert!(close(result.sum_item_variances, 2.0));
        assert!(close(result.total_score_variance, 4.0));
        assert_eq!(result.status, AlphaStatus::Computed);
        assert!(result.deletion_impacts.is_empty());
    }

    #[test]
    fn reference_scale_alpha() {
        let outcome = CronbachAlphaCalculator::calculate(&reference(), &all_six());
        let result = outcome.success().unwrap();

        assert_eq!(result.n_items, 6);
        assert_eq!(result.n_participants, 10);
        assert!((result.alpha - 0.9135382603).abs() < 1e-9);
        assert!((result.sum_item_variances - 4.0555555556).abs() < 1e-9);
        assert!((result.total_score_variance - 16.9888888889).abs() < 1e-9);
        assert_eq!(result.band, ReliabilityBand::Excellent);
    }

    #[test]
    fn single_item_is_insufficient() {
        let outcome = CronbachAlphaCalculator::calculate(&reference(), &items(&["Q1"]));
        assert_eq!(outcome.failure().unwrap().code, ErrorCode::InsufficientItems);
    }

    #[test]
    fn single_participant_is_insufficient_data() {
        let m = matrix(vec![vec![1.0, 2.0, 3.0]]);
        let outcome = CronbachAlphaCalculator::calculate(&m, &items(&["Q1", "Q2", "Q3"]));
        assert_eq!(outcome.failure().unwrap().code, ErrorCode::InsufficientData);
    }

    #[test]
    fn poorly_correlated_items_give_negative_alpha_unclamped() {
        let m = matrix(vec![
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![3.0, 2.0],
            vec![2.0, 1.0],
        ]);

        let outcome = CronbachAlphaCalculator::calculate(&m, &items(&["Q1", "Q2"]));
        let result = outcome.success().unwrap();

        assert_eq!(result.status, AlphaStatus::Computed);
        assert!(close(result.alpha, -2.0), "alpha was {}", result.alpha);
        assert_eq!(result.band, ReliabilityBand::Poor);
    }

    #[test]
    fn equal_fractional_totals_give_zero_variance_status() {
        let m = matrix(vec![
            vec![0.1, 0.2, 0.3],
            vec![0.3, 0.2, 0.1],
            vec![0.2, 0.1, 0.3],
        ]);

        let outcome = CronbachAlphaCalculator::calculate(&m, &items(&["Q1", "Q2", "Q3"]));
        let result = outcome.success().unwrap();

        assert_eq!(result.status, AlphaStatus::ZeroVariance);
        assert_eq!(result.alpha, 0.0);
    }

    #[test]
    fn constant_responses_give_zero_variance_status() {
        let m = matrix(vec![vec![2.0, 2.0], vec![2.0, 2.0], vec![2.0, 2.0]]);

        let outcome = CronbachAlphaCalculator::calculate(&m, &items(&["Q1", "Q2"]));
        let result = outcome.success().unwrap();

        assert_eq!(result.alpha, 0.0);
        assert_eq!(result.status, AlphaStatus::ZeroVariance);
        assert_eq!(result.band, ReliabilityBand::Poor);
    }

    #[test]
    fn unknown_item_fails_with_missing_column() {
        let outcome = CronbachAlphaCalculator::calculate(&reference(), &items(&["Q1", "Q9"]));
        assert_eq!(outcome.failure().unwrap().code, ErrorCode::MissingColumn);
    }

    #[test]
    fn incomplete_rows_are_excluded() {
        let m = ResponseMatrix::from_rows(
            vec!["Q1", "Q2"],
            vec![
                vec![Some(1.0), Some(1.0)],
                vec![Some(2.0), None],
                vec![Some(3.0), Some(3.0)],
            ],
        )
        .unwrap();

        let outcome = CronbachAlphaCalculator::calculate(&m, &items(&["Q1", "Q2"]));
        assert_eq!(outcome.success().unwrap().n_participants, 2);
    }

    #[test]
    fn deletion_impact_has_one_entry_per_item() {
        let outcome = CronbachAlphaCalculator::calculate_with_deletion_impact(&reference(), &all_six());
        let result = outcome.success().unwrap();

        let names: Vec<&str> = result.deletion_impacts.iter().map(|d| d.item.as_str()).collect();
        assert_eq!(names, vec!["Q1", "Q2", "Q3", "Q4", "Q5", "Q6"]);

        let q1 = &result.deletion_impacts[0];
        assert!((q1.alpha_if_deleted.unwrap() - 0.8724489796).abs() < 1e-9);
        assert!((q1.alpha_change.unwrap() + 0.0410892807).abs() < 1e-9);
    }

    #[test]
    fn deletion_leaving_one_item_is_undefined() {
        let m = matrix(vec![vec![1.0, 2.0], vec![2.0, 2.0], vec![3.0, 1.0]]);

        let outcome = CronbachAlphaCalculator::calculate_with_deletion_impact(&m, &items(&["Q1", "Q2"]));
        let result = outcome.success().unwrap();

        assert_eq!(result.deletion_impacts.len(), 2);
        assert!(result
            .deletion_impacts
            .iter()
            .all(|d| d.alpha_if_deleted.is_none() && d.alpha_change.is_none()));
    }

    #[test]
    fn alpha_change_is_consistent_with_alpha() {
        let outcome = CronbachAlphaCalculator::calculate_with_deletion_impact(&reference(), &all_six());
        let result = outcome.success().unwrap();

        for impact in &result.deletion_impacts {
            let expected = impact.alpha_if_deleted.unwrap() - result.alpha;
            assert!(close(impact.alpha_change.unwrap(), expected));
        }
    }
}
