//! Error types for table shape violations.

use thiserror::Error;

/// Structural invariant violated by an input table.
///
/// Shape errors mean the upstream file is malformed; they are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A column header does not have exactly three levels.
    #[error("column {column} has a {depth}-level header, expected {expected}")]
    HeaderDepth {
        column: usize,
        depth: usize,
        expected: usize,
    },

    /// The table has no columns at all.
    #[error("table has no columns")]
    NoColumns,

    /// A data row does not have one cell per column label.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A column referenced by the metadata map is absent from the table.
    #[error("column {label} referenced by metadata key '{key}' not found in table")]
    MissingColumn { key: String, label: String },

    /// Two output fields normalize to the same name.
    #[error("output field '{field}' would be produced twice")]
    DuplicateField { field: String },
}

/// Result type for shape-checked operations.
pub type Result<T> = std::result::Result<T, ShapeError>;
