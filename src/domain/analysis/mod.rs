//! Analysis Module - Pure reliability and validity calculators.
//!
//! # Components
//!
//! - `CronbachAlphaCalculator` - Internal consistency with item deletion impact
//! - `SplitHalfCalculator` - Odd/even halves, Pearson r, Spearman-Brown
//! - `ConstructValidityCalculator` - Rank correlation of dimensions with the total
//! - `AnalysisResults` - All of the above over one matrix
//! - `descriptive` - Variance, Pearson, average ranks, Spearman
//!
//! # Design Philosophy
//!
//! All functions are pure and stateless. Calculators take a `ResponseMatrix`
//! and item descriptors and return an `AnalysisOutcome`; nothing here logs
//! or touches I/O.

pub mod descriptive;

mod construct_validity;
mod cronbach_alpha;
mod interpretation;
mod outcome;
mod results;
mod split_half;

pub use construct_validity::{
    ConstructValidityCalculator, ConstructValidityResult, DimensionValidity, ItemValidity,
};
pub use cronbach_alpha::{
    AlphaResult, AlphaStatus, CronbachAlphaCalculator, DeletionImpact, ItemVariance,
};
pub use interpretation::{CorrelationStrength, ReliabilityBand};
pub use outcome::{AnalysisOutcome, CalculationFailure};
pub use results::{AnalysisResults, DimensionAlpha};
pub use split_half::{SplitHalfCalculator, SplitHalfResult};
