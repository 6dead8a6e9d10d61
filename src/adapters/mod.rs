//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `spreadsheet` - Workbook input (calamine, in-memory)
//! - `report` - Workbook output (rust_xlsxwriter, in-memory)
//! - `diagnostics` - Diagnostic sinks (tracing, collecting)

pub mod diagnostics;
pub mod report;
pub mod spreadsheet;

pub use diagnostics::{CollectingDiagnosticSink, TracingDiagnosticSink};
pub use report::{InMemoryReportWriter, XlsxReportWriter};
pub use spreadsheet::{CalamineSpreadsheetReader, InMemorySpreadsheetReader};
