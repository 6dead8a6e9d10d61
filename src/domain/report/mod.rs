//! Report Module - Format-independent layout of analysis results.
//!
//! # Components
//!
//! - `Report` / `ReportSection` / `ReportTable` / `ReportCell` - Sheet content
//! - `ReportAssembler` - Section order, headers and numeric rounding

mod assembler;
mod section;

pub use assembler::{
    dimension_sheet_name, ReportAssembler, DEFAULT_DECIMAL_PLACES, SHEET_CONSTRUCT_VALIDITY,
    SHEET_DELETION_IMPACT, SHEET_ITEM_VALIDITY, SHEET_SPLIT_HALF, SHEET_TOTAL_ALPHA,
};
pub use section::{Report, ReportCell, ReportSection, ReportTable};
