//! Domain layer containing the survey model and the statistics engine.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, diagnostics)
//! - `survey` - Loaded sheets, item/dimension descriptors, data preparation
//! - `analysis` - Pure reliability and validity calculators
//! - `report` - Sheet/table layout of results, independent of file format

pub mod analysis;
pub mod foundation;
pub mod report;
pub mod survey;
