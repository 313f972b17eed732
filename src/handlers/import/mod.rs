// handlers/import - bulk import endpoints under /api/import

pub mod csv;
pub mod sheets;

pub use csv::import_csv;
pub use sheets::{import_sheets, sheets_usage};
