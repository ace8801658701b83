//! Error types for metadata extraction.

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors surfaced by the extraction service.
///
/// Missing matches are never errors; they show up as missing fields.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The linguistic annotator failed to initialise.
    #[error("annotator unavailable: {0}")]
    AnnotatorUnavailable(String),

    /// Input text rejected before extraction.
    #[error("text too short: {chars} non-whitespace characters, at least {min} required")]
    TextTooShort { chars: usize, min: usize },

    /// Configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Curriculum or synonym data error.
    #[error("curriculum error: {0}")]
    Curriculum(#[from] curriculo_curriculum::CurriculumError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
