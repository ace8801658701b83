//! Error types for the annotation capability.

use thiserror::Error;

/// Result type alias for annotation operations.
pub type Result<T> = std::result::Result<T, NlpError>;

/// Errors that can occur in the annotation capability.
#[derive(Error, Debug)]
pub enum NlpError {
    /// Vector dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
