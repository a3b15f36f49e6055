//! Error types for record output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while persisting or exporting records.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A record's field names differ from the first record's.
    #[error("record {record} has fields [{}], expected [{}]", found.join(", "), expected.join(", "))]
    SchemaMismatch {
        record: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Table name is empty.
    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to build data frame: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Failed to create or write an output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
