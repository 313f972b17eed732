//! Bulk import of store-contact records from uploaded CSV files and
//! Google Sheets exports.

pub mod csv;
pub mod sheets;

pub use csv::{parse_csv, CsvParseOutcome, CsvRowError};
pub use sheets::{normalize, summarize, ImportMetrics, ProcessedRow};
