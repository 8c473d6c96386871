//! Error types for the arbitrate library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for arbitration operations.
#[derive(Debug, Error)]
pub enum ArbitrationError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no records to import.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// An imported file lacks a column the project depends on.
    #[error("Missing column '{column}' in imported data")]
    MissingColumn { column: String },

    /// Not enough data to compute a statistic.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// No normalization mapping exists for the given question.
    #[error("No mapping registered for question '{0}'")]
    UnknownMapping(String),

    /// A case, question, or coder that does not exist was referenced.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error saving or loading a project document.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for arbitration operations.
pub type Result<T> = std::result::Result<T, ArbitrationError>;
