//! # Linguistic Annotation
//!
//! This crate provides the annotation capability consumed by the curriculum
//! matchers and the extraction pipeline:
//!
//! - **Tokenization & Lemmas**: Word-level tokens with folded forms and lemmas
//! - **Part of Speech**: Coarse tags plus proper-noun, stop-word and punctuation flags
//! - **Entities & Noun Chunks**: Named-entity spans and multi-token noun phrases
//! - **Phrase Matching**: Exact token-sequence matching against keyword lists
//! - **Similarity**: Vector cosine similarity with a lemma-overlap fallback
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Annotation Capability                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Annotator ──► Document ──► PhraseMatcher                       │
//! │      │            │                                             │
//! │      ▼            ▼                                             │
//! │  HeuristicAnnotator   document_similarity                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any external linguistic service can be plugged in by implementing
//! [`Annotator`]. [`HeuristicAnnotator`] is a rule-based Portuguese
//! implementation without word vectors.

pub mod annotator;
pub mod document;
pub mod error;
pub mod lexicon;
pub mod phrase;
pub mod similarity;
pub mod text;

pub use annotator::{Annotator, HeuristicAnnotator};
pub use document::{Document, EntityLabel, EntitySpan, NounChunk, PartOfSpeech, Token};
pub use error::{NlpError, Result};
pub use phrase::{PhraseMatch, PhraseMatcher};
pub use similarity::{cosine_similarity, document_similarity, lemma_overlap_similarity};
pub use text::{fold, strip_accents, title_case};

/// A dense vector representation of a span or document.
pub type Embedding = Vec<f32>;
