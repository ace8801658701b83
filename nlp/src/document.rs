//! Annotated document types.

use serde::{Deserialize, Serialize};

use crate::Embedding;

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    Propn,
    Verb,
    Adj,
    Adv,
    Det,
    Adp,
    Cconj,
    Pron,
    Num,
    Punct,
    Other,
}

/// A single token of an annotated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as it appears in the source.
    pub text: String,

    /// Lowercased, accent-free form used for matching.
    pub norm: String,

    /// Dictionary form.
    pub lemma: String,

    /// Part-of-speech tag.
    pub pos: PartOfSpeech,

    /// Whether the token is a stop word.
    pub is_stop: bool,

    /// Whether the token is punctuation.
    pub is_punct: bool,

    /// Byte offset of the token start in the source text.
    pub start: usize,

    /// Byte offset one past the token end.
    pub end: usize,
}

impl Token {
    /// Whether the token was tagged as a proper noun.
    pub fn is_proper_noun(&self) -> bool {
        self.pos == PartOfSpeech::Propn
    }

    /// Length of the surface text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Named-entity label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// A person.
    Per,
    /// An organization.
    Org,
    /// A location.
    Loc,
    /// An event.
    Event,
    /// Anything else.
    Misc,
}

/// A named-entity span over a token range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    /// First token index.
    pub start_token: usize,
    /// One past the last token index.
    pub end_token: usize,
}

/// A multi-token noun phrase with its head token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NounChunk {
    pub text: String,
    pub start_token: usize,
    pub end_token: usize,
    /// Index of the head token in the document.
    pub root: usize,
}

impl NounChunk {
    /// Number of tokens in the chunk.
    pub fn len(&self) -> usize {
        self.end_token - self.start_token
    }

    /// Whether the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.end_token == self.start_token
    }
}

/// An annotated text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source text.
    pub text: String,

    /// Tokens in order, whitespace excluded.
    pub tokens: Vec<Token>,

    /// Named-entity spans.
    pub entities: Vec<EntitySpan>,

    /// Noun phrases.
    pub noun_chunks: Vec<NounChunk>,

    /// Document vector, when the annotator provides one.
    pub vector: Option<Embedding>,
}

impl Document {
    /// Whether a non-empty document vector is available.
    pub fn has_vector(&self) -> bool {
        self.vector.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Source text covered by a token range.
    pub fn span_text(&self, start_token: usize, end_token: usize) -> &str {
        if start_token >= end_token || end_token > self.tokens.len() {
            return "";
        }
        let start = self.tokens[start_token].start;
        let end = self.tokens[end_token - 1].end;
        self.text.get(start..end).unwrap_or("")
    }

    /// Head token of a noun chunk.
    pub fn root_of(&self, chunk: &NounChunk) -> Option<&Token> {
        self.tokens.get(chunk.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(text: &str, start: usize) -> Token {
        Token {
            text: text.to_string(),
            norm: text.to_lowercase(),
            lemma: text.to_lowercase(),
            pos: PartOfSpeech::Noun,
            is_stop: false,
            is_punct: false,
            start,
            end: start + text.len(),
        }
    }

    #[test]
    fn test_span_text() {
        let doc = Document {
            text: "era  vargas".to_string(),
            tokens: vec![token("era", 0), token("vargas", 5)],
            ..Default::default()
        };

        assert_eq!(doc.span_text(0, 2), "era  vargas");
        assert_eq!(doc.span_text(1, 2), "vargas");
        assert_eq!(doc.span_text(1, 1), "");
        assert_eq!(doc.span_text(0, 5), "");
    }

    #[test]
    fn test_has_vector() {
        let mut doc = Document::default();
        assert!(!doc.has_vector());
        doc.vector = Some(Vec::new());
        assert!(!doc.has_vector());
        doc.vector = Some(vec![0.1, 0.2]);
        assert!(doc.has_vector());
    }
}
