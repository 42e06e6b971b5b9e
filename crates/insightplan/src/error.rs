//! Error types for the InsightPlan library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for InsightPlan operations.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The suggestion gateway failed or returned something unusable.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for InsightPlan operations.
pub type Result<T> = std::result::Result<T, InsightError>;
