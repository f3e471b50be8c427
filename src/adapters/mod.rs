// Adapters layer: concrete observation sources for external resources.

pub mod csv_file;
pub mod json_api;

pub use csv_file::CsvColumnSource;
pub use json_api::JsonArraySource;
