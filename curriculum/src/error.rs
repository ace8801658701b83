//! Error types for curriculum loading.

use thiserror::Error;

/// Result type alias for curriculum operations.
pub type Result<T> = std::result::Result<T, CurriculumError>;

/// Errors that can occur while loading curriculum data.
#[derive(Error, Debug)]
pub enum CurriculumError {
    /// Data file not found.
    #[error("curriculum data not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally valid JSON with unusable content.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}
