//! Storage layer for the build metrics history.

pub mod csv;

// Re-export key types
pub use self::csv::{AppendOutcome, CSV_HEADERS, CsvHistory, HistoryRecord, write_rows};
