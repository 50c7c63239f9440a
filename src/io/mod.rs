pub mod csv;

// Re-export commonly used functions
pub use self::csv::{check_extension, read_csv, read_csv_bytes};
