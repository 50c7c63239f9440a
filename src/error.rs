use thiserror::Error;

/// Error type shared by every stage of the analysis pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// The upload contained no columns, or a header but no data rows
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The upload could not be decoded as comma-separated text
    #[error("Parse error: {0}")]
    Parse(String),

    /// A selection referenced a column absent from the current table
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[source] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => Error::Parse(format!("line {}: {}", pos.line(), err)),
            None => Error::Parse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(feature = "visualization")]
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("chart drawing failed: {}", err))
    }
}

impl Error {
    /// Message suitable for showing to the user in place of the failed section
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyInput(_) => format!("The uploaded file has no data. {}", self),
            Error::Parse(_) => format!("The uploaded file could not be read as CSV. {}", self),
            Error::UnknownColumn(name) => format!("Column '{}' is not in the current dataset.", name),
            other => other.to_string(),
        }
    }
}
