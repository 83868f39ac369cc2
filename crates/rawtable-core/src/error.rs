//! Error types for rawtable-core

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rawtable-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// The table was built from zero records, so there is no header row
    #[error("table '{table}' has no header row")]
    MissingHeader { table: String },

    /// Two header cells share a name (case-insensitive)
    #[error("another column with name '{column}' already exists (table '{table}')")]
    DuplicateHeader { table: String, column: String },

    /// Tables with different layouts cannot be appended
    #[error("cannot append table '{other}' to table '{table}': different headers:\n{table}: {expected}\n{other}: {found}")]
    HeaderMismatch {
        table: String,
        other: String,
        expected: String,
        found: String,
    },

    /// A caller passed an unusable argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value could not be read from a row
    #[error(transparent)]
    RowValue(#[from] RowValueError),

    /// No table with this name was found
    #[error("table '{0}' not found")]
    TableNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error raised while reading a row, always carrying the row's location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValueError {
    location: String,
    message: String,
}

impl RowValueError {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Where the failing row came from (e.g. "items.csv, row 12")
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RowValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.location, self.message)
    }
}

impl std::error::Error for RowValueError {}
