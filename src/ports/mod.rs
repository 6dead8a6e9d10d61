//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input
//!
//! - `SpreadsheetReader` - Loads one worksheet as a `RawTable`
//!
//! ## Output
//!
//! - `ReportWriter` - Persists an assembled `Report`
//! - `DiagnosticSink` - Receives non-fatal findings from a run

mod diagnostics;
mod report_writer;
mod spreadsheet_reader;

pub use diagnostics::DiagnosticSink;
pub use report_writer::{ReportWriteError, ReportWriter, WrittenReport};
pub use spreadsheet_reader::{SheetSelector, SpreadsheetError, SpreadsheetReader};
