//! Phrase-list classification for subject and cognitive level.

use serde::{Deserialize, Serialize};

use curriculo_nlp::{Annotator, Document, PhraseMatcher};

use crate::vocabulary::Category;

const BASE_CONFIDENCE: f32 = 0.75;
const MAX_LENGTH_BONUS: f32 = 0.20;
const MAX_CONFIDENCE: f32 = 0.98;

/// A category found in a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Category label.
    pub label: String,

    /// Matched text.
    pub span: String,

    /// Confidence derived from the span length.
    pub confidence: f32,
}

/// Classifies text by the longest phrase it contains.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    phrases: PhraseMatcher,
}

impl CategoryMatcher {
    /// Register every category of a table. Table order breaks ties.
    pub fn new(annotator: &dyn Annotator, table: &[Category]) -> Self {
        let mut phrases = PhraseMatcher::new();
        for (label, keywords) in table {
            phrases.add(annotator, label, keywords);
        }
        Self { phrases }
    }

    /// Category of the longest matched span; the earliest match wins ties.
    pub fn best_match(&self, doc: &Document) -> Option<CategoryMatch> {
        let mut best: Option<CategoryMatch> = None;
        let mut best_len = 0;

        for found in self.phrases.find(doc) {
            let len = found.char_len(doc);
            if len > best_len {
                best_len = len;
                best = Some(CategoryMatch {
                    label: found.label.clone(),
                    span: found.text(doc).to_string(),
                    confidence: span_confidence(len),
                });
            }
        }

        best
    }

    /// Every matched span, in text order.
    pub fn all_matches(&self, doc: &Document) -> Vec<CategoryMatch> {
        self.phrases
            .find(doc)
            .into_iter()
            .map(|found| {
                let span = found.text(doc).to_string();
                CategoryMatch {
                    confidence: span_confidence(span.chars().count()),
                    label: found.label,
                    span,
                }
            })
            .collect()
    }

    /// Number of registered phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// `min(0.98, 0.75 + min(0.20, chars / 100))`.
pub fn span_confidence(chars: usize) -> f32 {
    (BASE_CONFIDENCE + (chars as f32 / 100.0).min(MAX_LENGTH_BONUS)).min(MAX_CONFIDENCE)
}
