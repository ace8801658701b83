//! Exact phrase matching over token sequences.
//!
//! Phrases are tokenized with the same annotator as the searched text and
//! compared on folded token forms, so "frações" and "fracoes" register as
//! one pattern.

use serde::{Deserialize, Serialize};

use crate::annotator::Annotator;
use crate::document::Document;

/// A registered phrase pattern.
#[derive(Debug, Clone)]
struct Pattern {
    label: usize,
    norms: Vec<String>,
}

/// A phrase occurrence in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    /// Label the matching phrase was registered under.
    pub label: String,

    /// First token index.
    pub start_token: usize,

    /// One past the last token index.
    pub end_token: usize,
}

impl PhraseMatch {
    /// Source text covered by the match.
    pub fn text<'a>(&self, doc: &'a Document) -> &'a str {
        doc.span_text(self.start_token, self.end_token)
    }

    /// Length of the matched text in characters.
    pub fn char_len(&self, doc: &Document) -> usize {
        self.text(doc).chars().count()
    }
}

/// Matches registered phrase lists against annotated documents.
#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    labels: Vec<String>,
    patterns: Vec<Pattern>,
}

impl PhraseMatcher {
    /// Create an empty matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register phrases under a label.
    ///
    /// Labels keep their registration order; re-adding a label appends to it.
    pub fn add(&mut self, annotator: &dyn Annotator, label: &str, phrases: &[&str]) {
        let label_idx = match self.labels.iter().position(|l| l == label) {
            Some(idx) => idx,
            None => {
                self.labels.push(label.to_string());
                self.labels.len() - 1
            }
        };

        for phrase in phrases {
            let norms: Vec<String> = annotator
                .annotate(phrase)
                .tokens
                .into_iter()
                .map(|t| t.norm)
                .collect();
            if norms.is_empty() {
                continue;
            }
            let duplicate = self
                .patterns
                .iter()
                .any(|p| p.label == label_idx && p.norms == norms);
            if !duplicate {
                self.patterns.push(Pattern {
                    label: label_idx,
                    norms,
                });
            }
        }
    }

    /// Registered labels in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are registered.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Find every pattern occurrence, ordered by start token then
    /// registration order.
    pub fn find(&self, doc: &Document) -> Vec<PhraseMatch> {
        let mut matches = Vec::new();

        for start in 0..doc.tokens.len() {
            for pattern in &self.patterns {
                let end = start + pattern.norms.len();
                if end > doc.tokens.len() {
                    continue;
                }
                let hit = doc.tokens[start..end]
                    .iter()
                    .zip(&pattern.norms)
                    .all(|(token, norm)| &token.norm == norm);
                if hit {
                    matches.push(PhraseMatch {
                        label: self.labels[pattern.label].clone(),
                        start_token: start,
                        end_token: end,
                    });
                }
            }
        }

        matches
    }
}
