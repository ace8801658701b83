//! # Curriculum Matching
//!
//! This crate matches free text against a hierarchical curriculum taxonomy
//! (subject → grade → thematic unit → knowledge object → skills):
//!
//! - **Normalizer**: Accent/case folding, stop-word and generic-term removal, term weights
//! - **Synonym Expansion**: Longest-key-first query variants from a curated table
//! - **Taxonomy**: The nested curriculum with a reverse index per knowledge object
//! - **Matcher**: Global, scoped and any-grade search combining weighted key-term
//!   overlap with a semantic-similarity fallback
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Curriculum Matcher                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  SynonymTable ──► variants ──► key_terms ──► weighted_overlap   │
//! │                      │                            │             │
//! │                      ▼                            ▼             │
//! │                 Annotator ──► document_similarity  Taxonomy     │
//! │                                                   (reverse idx) │
//! │                      MatchObserver ◄── decision points          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod observer;
pub mod scoring;
pub mod synonyms;
pub mod taxonomy;

pub use error::{CurriculumError, Result};
pub use matcher::{
    CurriculumMatcher, GlobalConfidence, GlobalMatch, MatchMethod, ScopeOptions, ScoredMatch,
};
pub use normalizer::{KeyTerms, key_terms, normalize};
pub use observer::{
    MatchEvent, MatchObserver, NoopObserver, RecordingObserver, Stage, TracingObserver,
};
pub use scoring::{BonusScheme, weighted_overlap};
pub use synonyms::SynonymTable;
pub use taxonomy::{ObjectContext, Taxonomy};
