//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.
//!
//! ## Commands
//! - `AnalyzeSurvey` - Read a survey sheet, compute reliability, write the report

mod analyze_survey;

pub use analyze_survey::{
    AnalysisError, AnalyzeSurveyCommand, AnalyzeSurveyHandler, AnalyzeSurveyResult,
    DimensionColumns,
};
