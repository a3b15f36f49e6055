//! Error types for sheet decoding.

use std::path::PathBuf;

use tds_model::ShapeError;
use thiserror::Error;

/// Errors that can occur while decoding a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV records.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    // === Workbook Errors ===
    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Named sheet is not in the workbook.
    #[error("sheet '{sheet}' not found in {path} (available: {})", available.join(", "))]
    SheetNotFound {
        sheet: String,
        path: PathBuf,
        available: Vec<String>,
    },

    /// Workbook given without a sheet name.
    #[error("a sheet name is required to read workbook {path}")]
    SheetRequired { path: PathBuf },

    // === Layout Errors ===
    /// Fewer rows than the banner + header rows require.
    #[error("{path} has {found} rows, expected at least {expected} header rows")]
    NotEnoughHeaderRows {
        path: PathBuf,
        found: usize,
        expected: usize,
    },

    /// Decoded table violates a shape invariant.
    #[error("invalid table shape in {path}: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    pub(crate) fn file(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");

        let err = IngestError::SheetNotFound {
            sheet: "Provider Time & Distance".to_string(),
            path: PathBuf::from("book.xlsx"),
            available: vec!["Intro".to_string(), "Data".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "sheet 'Provider Time & Distance' not found in book.xlsx (available: Intro, Data)"
        );
    }

    #[test]
    fn test_file_error_maps_not_found() {
        let err = IngestError::file(
            std::path::Path::new("x.csv"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, IngestError::FileNotFound { .. }));

        let err = IngestError::file(
            std::path::Path::new("x.csv"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
