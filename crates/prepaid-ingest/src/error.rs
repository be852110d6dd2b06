//! Error types for reading and writing shipment files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing shipment files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Encoding Errors ===
    /// Input bytes are not valid in the declared encoding.
    #[error("input is not valid {encoding}")]
    Malformed { encoding: &'static str },

    /// Output contains a character the target encoding cannot represent.
    #[error("'{character}' cannot be written as {encoding}")]
    Unmappable {
        encoding: &'static str,
        character: char,
    },

    // === CSV Errors ===
    /// CSV structure error (e.g. unequal field counts).
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Correction names file could not be parsed.
    #[error("invalid names file {path}: {source}")]
    NamesFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl IngestError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
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

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/orders.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/orders.csv");
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let source = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = IngestError::read(std::path::Path::new("orders.csv"), source);
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
