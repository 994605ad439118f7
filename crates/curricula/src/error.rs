//! Error types for the curricula library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for curricula operations.
#[derive(Debug, Error)]
pub enum CurriculaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Nothing to operate on (e.g. exporting an empty selection).
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A dimension name that the resolver does not know.
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// Export or value mode not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error writing a document back to disk.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for curricula operations.
pub type Result<T> = std::result::Result<T, CurriculaError>;
