//! Split-Half Reliability - Odd/even item halves with Spearman-Brown correction.

use serde::{Deserialize, Serialize};

use super::descriptive::pearson;
use super::{AnalysisOutcome, CalculationFailure, ReliabilityBand};
use crate::domain::foundation::ErrorCode;
use crate::domain::survey::{ItemSet, ResponseMatrix};

/// Distance from -1 below which halves count as perfectly opposed.
const OPPOSED_TOLERANCE: f64 = 1e-12;

/// Split-half correlation and its full-length estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitHalfResult {
    /// Items at positions 1, 3, 5, ... (1-based) of the item set.
    pub odd_items: Vec<String>,
    /// Items at positions 2, 4, 6, ... (1-based) of the item set.
    pub even_items: Vec<String>,
    pub participants: Vec<usize>,
    pub odd_sums: Vec<f64>,
    pub even_sums: Vec<f64>,
    pub pearson_correlation: f64,
    pub spearman_brown: f64,
    pub band: ReliabilityBand,
}

/// Calculator for split-half reliability.
pub struct SplitHalfCalculator;

impl SplitHalfCalculator {
    /// Splits items by position; the odd half gets the extra item when
    /// the count is odd.
    pub fn partition(items: &ItemSet) -> (Vec<String>, Vec<String>) {
        let mut odd = Vec::new();
        let mut even = Vec::new();
        for (position, item) in items.iter().enumerate() {
            if position % 2 == 0 {
                odd.push(item.clone());
            } else {
                even.push(item.clone());
            }
        }
        (odd, even)
    }

    /// Spearman-Brown prophecy for doubling test length: 2r / (1 + r).
    ///
    /// `None` at r = -1, where the formula divides by zero.
    pub fn spearman_brown(r: f64) -> Option<f64> {
        let denominator = 1.0 + r;
        if denominator.abs() < OPPOSED_TOLERANCE {
            return None;
        }
        Some(2.0 * r / denominator)
    }

    /// Pearson correlation between odd-half and even-half sums.
    ///
    /// # Edge Cases
    /// - Fewer than 2 items: `InsufficientItems`
    /// - Fewer than 2 complete participants: `InsufficientData`
    /// - A half with constant sums: `UndefinedCorrelation`
    /// - Correlation of exactly -1: `UndefinedCorrelation`
    pub fn calculate(matrix: &ResponseMatrix, items: &ItemSet) -> AnalysisOutcome<SplitHalfResult> {
        Self::compute(matrix, items).into()
    }

    fn compute(matrix: &ResponseMatrix, items: &ItemSet) -> Result<SplitHalfResult, CalculationFailure> {
        if items.len() < 2 {
            return Err(CalculationFailure::insufficient_items(items.len()));
        }

        let cases = matrix.complete_cases(items.items())?;
        let n = cases.participant_count();
        if n < 2 {
            return Err(CalculationFailure::insufficient_data(n));
        }

        let (odd_items, even_items) = Self::partition(items);
        let odd_sums = cases.sums_of(&odd_items)?;
        let even_sums = cases.sums_of(&even_items)?;

        let r = pearson(&odd_sums, &even_sums).ok_or_else(|| {
            CalculationFailure::new(
                ErrorCode::UndefinedCorrelation,
                "Split-half correlation is undefined: one half has no variance",
            )
        })?;
        let spearman_brown = Self::spearman_brown(r).ok_or_else(|| {
            CalculationFailure::new(
                ErrorCode::UndefinedCorrelation,
                "Spearman-Brown correction is undefined for a correlation of -1",
            )
        })?;

        Ok(SplitHalfResult {
            odd_items,
            even_items,
            participants: cases.participants().to_vec(),
            odd_sums,
            even_sums,
            pearson_correlation: r,
            spearman_brown,
            band: ReliabilityBand::from_coefficient(spearman_brown),
        })
    }
}
