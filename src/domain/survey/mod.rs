//! Survey Module - Loaded response data and its cleaning.
//!
//! # Components
//!
//! - `RawTable` / `CellValue` - Sheet contents as loaded
//! - `ColumnSpec` / `ColumnResolver` - 0-based column selections and their names
//! - `ItemSet` / `DimensionMap` - Instrument scope and sub-constructs
//! - `ResponseMatrix` / `CompleteCases` - Numeric scores, complete-case slices
//! - `DataPreparer` - Header-row skipping and response-label scoring

mod column_spec;
mod columns;
mod item_set;
mod preparation;
mod raw_table;
mod response_matrix;

pub use column_spec::ColumnSpec;
pub use columns::{ColumnResolver, ResolvedColumn};
pub use item_set::{Dimension, DimensionMap, ItemSet};
pub use preparation::{
    DataPreparer, HeaderRowPolicy, PreparedData, ResponseScale, LABEL_FULLY_ACQUIRED,
    LABEL_NOT_ACQUIRED, LABEL_PARTIALLY_ACQUIRED,
};
pub use raw_table::{CellValue, RawTable};
pub use response_matrix::{CompleteCases, ResponseMatrix};
