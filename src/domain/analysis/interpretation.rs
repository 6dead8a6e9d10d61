//! Qualitative bands for reliability coefficients and correlations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::BilingualLabel;

/// Quality band for a reliability coefficient (alpha or Spearman-Brown).
///
/// Thresholds are strict: exactly 0.9 is `Good`, not `Excellent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityBand {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl ReliabilityBand {
    pub fn from_coefficient(value: f64) -> Self {
        if value > 0.9 {
            ReliabilityBand::Excellent
        } else if value > 0.8 {
            ReliabilityBand::Good
        } else if value > 0.7 {
            ReliabilityBand::Acceptable
        } else {
            ReliabilityBand::Poor
        }
    }

    pub fn label(&self) -> BilingualLabel {
        match self {
            ReliabilityBand::Excellent => BilingualLabel::new("Excellent", "ممتاز"),
            ReliabilityBand::Good => BilingualLabel::new("Good", "جيد"),
            ReliabilityBand::Acceptable => BilingualLabel::new("Acceptable", "مقبول"),
            ReliabilityBand::Poor => BilingualLabel::new("Poor", "ضعيف"),
        }
    }
}

impl fmt::Display for ReliabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Strength band for a correlation, judged on its absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl CorrelationStrength {
    pub fn from_correlation(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude > 0.7 {
            CorrelationStrength::Strong
        } else if magnitude > 0.5 {
            CorrelationStrength::Moderate
        } else if magnitude > 0.3 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::VeryWeak
        }
    }

    pub fn label(&self) -> BilingualLabel {
        match self {
            CorrelationStrength::Strong => BilingualLabel::new("Strong", "قوي"),
            CorrelationStrength::Moderate => BilingualLabel::new("Moderate", "متوسط"),
            CorrelationStrength::Weak => BilingualLabel::new("Weak", "ضعيف"),
            CorrelationStrength::VeryWeak => BilingualLabel::new("Very Weak", "ضعيف جداً"),
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
