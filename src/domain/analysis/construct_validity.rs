//! Construct Validity - Rank correlation of each dimension with the whole scale.
//!
//! A dimension represents the overall construct well when participants who
//! score high overall also score high on that dimension. Both scores are
//! ranked (ties share the average rank) and correlated, i.e. Spearman's rho.
//! Each item is also correlated with its dimension's total minus itself,
//! which removes the inflation of an item correlating with its own score.

use serde::{Deserialize, Serialize};

use super::descriptive::{average_ranks, pearson, spearman};
use super::{AnalysisOutcome, CalculationFailure, CorrelationStrength};
use crate::domain::survey::{DimensionMap, ItemSet, ResponseMatrix};

/// One dimension's scores and their agreement with the total score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionValidity {
    pub dimension: String,
    pub items: Vec<String>,
    pub scores: Vec<f64>,
    pub ranks: Vec<f64>,
    /// `None` when either score series is constant.
    pub correlation: Option<f64>,
    pub strength: Option<CorrelationStrength>,
}

/// Corrected item-dimension correlation for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemValidity {
    pub dimension: String,
    pub item: String,
    /// `None` when the item or the rest of its dimension is constant,
    /// which includes every single-item dimension.
    pub correlation: Option<f64>,
    pub strength: Option<CorrelationStrength>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructValidityResult {
    pub participants: Vec<usize>,
    pub total_scores: Vec<f64>,
    pub total_ranks: Vec<f64>,
    /// In dimension-map order.
    pub dimensions: Vec<DimensionValidity>,
    /// Grouped by dimension, items in dimension order.
    pub items: Vec<ItemValidity>,
}

/// Calculator for rank-based construct validity.
pub struct ConstructValidityCalculator;

impl ConstructValidityCalculator {
    /// Correlates every dimension, and every item within it, against the total.
    ///
    /// Complete cases are taken over the item set together with every
    /// dimension item, so all series share the same participants.
    ///
    /// # Edge Cases
    /// - Fewer than 2 items: `InsufficientItems`
    /// - Fewer than 2 complete participants: `InsufficientData`
    /// - Dimension item absent from the matrix: `MissingColumn`
    /// - Constant series: correlation `None`, the rest still computed
    pub fn calculate(
        matrix: &ResponseMatrix,
        items: &ItemSet,
        dimensions: &DimensionMap,
    ) -> AnalysisOutcome<ConstructValidityResult> {
        Self::compute(matrix, items, dimensions).into()
    }

    fn compute(
        matrix: &ResponseMatrix,
        items: &ItemSet,
        dimensions: &DimensionMap,
    ) -> Result<ConstructValidityResult, CalculationFailure> {
        if items.len() < 2 {
            return Err(CalculationFailure::insufficient_items(items.len()));
        }

        let mut analysed: Vec<String> = items.items().to_vec();
        for item in dimensions.iter().flat_map(|d| d.items.iter()) {
            if !analysed.contains(item) {
                analysed.push(item.clone());
            }
        }

        let cases = matrix.complete_cases(&analysed)?;
        let n = cases.participant_count();
        if n < 2 {
            return Err(CalculationFailure::insufficient_data(n));
        }

        let total_scores = cases.sums_of(items.items())?;
        let total_ranks = average_ranks(&total_scores);

        let mut dimension_results = Vec::with_capacity(dimensions.len());
        let mut item_results = Vec::new();

        for dimension in dimensions.iter() {
            let scores = cases.sums_of(dimension.items.items())?;
            let ranks = average_ranks(&scores);
            let correlation = pearson(&ranks, &total_ranks);

            for item in dimension.items.iter() {
                let own = cases.sums_of(std::slice::from_ref(item))?;
                let rest: Vec<f64> = scores.iter().zip(&own).map(|(s, o)| s - o).collect();
                let correlation = spearman(&own, &rest);
                item_results.push(ItemValidity {
                    dimension: dimension.name.clone(),
                    item: item.clone(),
                    correlation,
                    strength: correlation.map(CorrelationStrength::from_correlation),
                });
            }

            dimension_results.push(DimensionValidity {
                dimension: dimension.name.clone(),
                items: dimension.items.items().to_vec(),
                scores,
                ranks,
                correlation,
                strength: correlation.map(CorrelationStrength::from_correlation),
            });
        }

        Ok(ConstructValidityResult {
            participants: cases.participants().to_vec(),
            total_scores,
            total_ranks,
            dimensions: dimension_results,
            items: item_results,
        })
    }
}
