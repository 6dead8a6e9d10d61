//! Spreadsheet adapters - Implementations of `SpreadsheetReader`.

mod calamine_reader;
mod in_memory;

pub use calamine_reader::CalamineSpreadsheetReader;
pub use in_memory::InMemorySpreadsheetReader;
