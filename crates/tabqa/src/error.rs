//! Error types for the tabqa library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabqa operations.
#[derive(Debug, Error)]
pub enum TabqaError {
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

    /// File format not supported by the loader.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A rule references a kind the registry does not know.
    #[error("Unknown rule kind: {0}")]
    UnknownRuleKind(String),

    /// A rule references a column absent from the dataset.
    #[error("Rule '{rule}' references missing column '{column}'")]
    MissingColumn { rule: String, column: String },

    /// A rule's parameters failed to parse for its kind.
    #[error("Invalid parameters for rule '{rule}' (kind '{kind}'): {message}")]
    InvalidRule {
        rule: String,
        kind: String,
        message: String,
    },

    /// Schema document error (unknown type tag, malformed definition).
    #[error("Schema error: {0}")]
    Schema(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for tabqa operations.
pub type Result<T> = std::result::Result<T, TabqaError>;
