//! Application configuration module
//!
//! This module provides type-safe configuration loading from an optional
//! config file and environment variables using the `config` and `dotenvy`
//! crates. Environment variables use the `SURVEY_RELIABILITY` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use survey_reliability::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Writing reports to {}", config.report.output_dir.display());
//! ```

mod error;
mod job;
mod logging;
mod report;

pub use error::{ConfigError, ValidationError};
pub use job::{DimensionConfig, JobConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use report::{ReportConfig, MAX_DECIMAL_PLACES};

use serde::Deserialize;
use std::path::Path;

use crate::application::AnalyzeSurveyCommand;
use crate::domain::foundation::Timestamp;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SURVEY_RELIABILITY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`], then apply any command line overrides
/// before calling [`AppConfig::validate()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Input workbook and column layout
    #[serde(default)]
    pub job: JobConfig,

    /// Output workbook location and rounding
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `config_path` when given (format chosen by extension)
    /// 3. Layers environment variables with `SURVEY_RELIABILITY` prefix on top
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SURVEY_RELIABILITY__LOGGING__LEVEL=debug` -> `logging.level = debug`
    /// - `SURVEY_RELIABILITY__JOB__ITEM_COLUMNS=0-35` -> `job.item_columns = 0-35`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into the expected types.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.job.validate()?;
        self.report.validate()?;
        Ok(())
    }

    /// Build the analysis command for a run started at `started_at`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the configuration is incomplete.
    pub fn to_command(&self, started_at: &Timestamp) -> Result<AnalyzeSurveyCommand, ValidationError> {
        self.validate()?;
        let input_path = self
            .job
            .input_path
            .clone()
            .ok_or(ValidationError::MissingRequired("job.input_path"))?;

        Ok(AnalyzeSurveyCommand {
            input_path,
            sheet: self.job.sheet_selector(),
            item_columns: self.job.item_columns.clone(),
            dimensions: self.job.dimension_columns(),
            header_placeholders: self.job.header_placeholders.clone(),
            output_path: self.report.output_path(started_at),
            decimal_places: self.report.decimal_places,
        })
    }
}
