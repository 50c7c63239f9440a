//! Exploratory data analysis over uploaded CSV tables.
//!
//! Load a table with [`io::read_csv_bytes`] (or through a [`Session`]), then
//! ask [`stats`] for summaries and the [`vis::ChartSelector`] for charts.

pub mod column;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod io;
pub mod session;
pub mod stats;
pub mod vis;

// Re-export commonly used types
pub use column::{classify, Column, ColumnKind, ColumnType};
pub use config::{ChartOptions, CsvOptions, EdaConfig};
pub use dataframe::DataFrame;
pub use error::{Error, Result};
pub use session::{DatasetOverview, Session};
pub use stats::{CorrelationMatrix, MissingCounts, SummaryReport, ValueCounts};
pub use vis::{BivariateAnalysis, ChartSelector, ChartSpec, UnivariateAnalysis};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
