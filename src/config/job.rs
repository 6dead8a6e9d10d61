//! Job configuration - which workbook to read and how its columns map to items.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::application::DimensionColumns;
use crate::domain::survey::ColumnSpec;
use crate::ports::SheetSelector;

/// Job configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobConfig {
    /// Survey workbook to analyse
    pub input_path: Option<PathBuf>,

    /// Worksheet name; the first sheet when unset
    pub sheet: Option<String>,

    /// 0-based item columns, e.g. `"0-35"`
    #[serde(default)]
    pub item_columns: ColumnSpec,

    /// Ordered dimension definitions
    #[serde(default)]
    pub dimensions: Vec<DimensionConfig>,

    /// Cell texts marking a leading header row; the response labels when unset
    pub header_placeholders: Option<Vec<String>>,
}

/// One named dimension and its sheet columns
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DimensionConfig {
    pub name: String,
    pub columns: ColumnSpec,
}

impl JobConfig {
    pub fn sheet_selector(&self) -> SheetSelector {
        SheetSelector::from_option(self.sheet.as_deref())
    }

    pub fn dimension_columns(&self) -> Vec<DimensionColumns> {
        self.dimensions
            .iter()
            .map(|d| DimensionColumns::new(d.name.trim(), d.columns.clone()))
            .collect()
    }

    /// Validate job configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.input_path.is_none() {
            return Err(ValidationError::MissingRequired("job.input_path"));
        }
        if self.item_columns.is_empty() {
            return Err(ValidationError::MissingRequired("job.item_columns"));
        }

        let mut seen = HashSet::new();
        for dimension in &self.dimensions {
            let name = dimension.name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyDimensionName);
            }
            if !seen.insert(name.to_string()) {
                return Err(ValidationError::DuplicateDimension(name.to_string()));
            }
            if dimension.columns.is_empty() {
                return Err(ValidationError::EmptyDimensionColumns(name.to_string()));
            }
        }
        Ok(())
    }
}
