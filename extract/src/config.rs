//! Configuration for the extraction service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Configuration for the extraction service.
///
/// Every key is optional in the TOML form; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Curriculum taxonomy file.
    pub curriculum_path: PathBuf,

    /// Synonym table replacing the built-in one.
    pub synonyms_path: Option<PathBuf>,

    /// Texts with at most this many words get a taxonomy-wide search first.
    pub short_text_max_words: usize,

    /// Minimum non-whitespace characters of a request text.
    pub min_text_chars: usize,

    /// Maximum free topics attached as suggestions.
    pub max_topic_suggestions: usize,

    /// Fields below this confidence are reported missing.
    pub missing_confidence_threshold: f32,

    /// Suggest the units in scope when subject and grade matched but no unit did.
    pub suggest_scope_units: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            curriculum_path: PathBuf::from("data/curriculum.json"),
            synonyms_path: None,
            short_text_max_words: 5,
            min_text_chars: 3,
            max_topic_suggestions: 5,
            missing_confidence_threshold: 0.5,
            suggest_scope_units: true,
        }
    }
}

impl ExtractConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the curriculum file.
    pub fn with_curriculum_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.curriculum_path = path.into();
        self
    }

    /// Set the synonym table file.
    pub fn with_synonyms_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.synonyms_path = Some(path.into());
        self
    }

    pub fn with_short_text_max_words(mut self, words: usize) -> Self {
        self.short_text_max_words = words;
        self
    }

    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    pub fn with_max_topic_suggestions(mut self, max: usize) -> Self {
        self.max_topic_suggestions = max;
        self
    }

    pub fn with_missing_confidence_threshold(mut self, threshold: f32) -> Self {
        self.missing_confidence_threshold = threshold;
        self
    }

    pub fn with_suggest_scope_units(mut self, enabled: bool) -> Self {
        self.suggest_scope_units = enabled;
        self
    }
}
