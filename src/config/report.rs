//! Report configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::foundation::Timestamp;

/// Largest accepted number of decimal places for reported statistics
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory the workbook is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Workbook file name
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Rounding applied to reported statistics
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Prefix the file name with the run's start time
    #[serde(default)]
    pub timestamp_file_name: bool,
}

impl ReportConfig {
    /// Full destination path for a run started at `started_at`.
    pub fn output_path(&self, started_at: &Timestamp) -> PathBuf {
        if self.timestamp_file_name {
            self.output_dir
                .join(format!("{}_{}", started_at.file_stamp(), self.file_name))
        } else {
            self.output_dir.join(&self.file_name)
        }
    }

    /// Validate report configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ValidationError::InvalidDecimalPlaces {
                max: MAX_DECIMAL_PLACES,
                actual: self.decimal_places,
            });
        }
        let stem_ok = self
            .file_name
            .strip_suffix(".xlsx")
            .is_some_and(|stem| !stem.trim().is_empty());
        if !stem_ok || self.file_name.contains(['/', '\\']) {
            return Err(ValidationError::InvalidFileName(self.file_name.clone()));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_name: default_file_name(),
            decimal_places: default_decimal_places(),
            timestamp_file_name: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_file_name() -> String {
    "statistical_analysis.xlsx".to_string()
}

fn default_decimal_places() -> u32 {
    6
}
