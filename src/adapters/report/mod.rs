//! Report adapters - Implementations of `ReportWriter`.

mod in_memory;
mod xlsx_writer;

pub use in_memory::InMemoryReportWriter;
pub use xlsx_writer::{sanitize_sheet_name, XlsxReportWriter, MAX_SHEET_NAME_LEN};
