//! Error types for tracking-sheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a tracking sheet.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV, including invalid UTF-8.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    /// CSV file has no records at all.
    #[error("CSV file is empty: {path}")]
    EmptySheet { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
