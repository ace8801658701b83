//! # Educational Metadata Extraction
//!
//! Turns a short teacher description ("Questão sobre a Era Vargas para o 9º
//! ano") into structured metadata with a confidence per field:
//!
//! - **Category fields**: subject and cognitive level by longest phrase match
//! - **Grade**: ordinal phrasings ("6º ano", "sexto ano") by pattern
//! - **Keyword fields**: question type, source-text type and student profile
//! - **Curriculum fields**: thematic unit, knowledge object and skill through
//!   [`curriculo_curriculum::CurriculumMatcher`]
//! - **Suggestions**: free topics and in-scope units when no unit matched
//! - **Defaults**: confidence-gated fallbacks for what is still missing
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use curriculo_extract::{ExtractConfig, ExtractRequest, Extractor};
//! use curriculo_nlp::HeuristicAnnotator;
//!
//! let extractor = Extractor::new(ExtractConfig::default(), Arc::new(HeuristicAnnotator::new()));
//! let response = extractor.handle(&ExtractRequest::new("Era Vargas"))?;
//! println!("{:?}", response.result.extracted);
//! # Ok::<(), curriculo_extract::ExtractError>(())
//! ```

pub mod category;
pub mod config;
pub mod defaults;
pub mod error;
pub mod extractor;
pub mod field;
pub mod grade;
pub mod keywords;
pub mod pipeline;
pub mod request;
pub mod result;
pub mod topics;
pub mod vocabulary;

pub use category::{CategoryMatch, CategoryMatcher};
pub use config::ExtractConfig;
pub use error::{ExtractError, Result};
pub use extractor::{Extractor, HealthStatus};
pub use field::Field;
pub use grade::GradeExtractor;
pub use keywords::{KeywordExtractor, KeywordMatch};
pub use pipeline::ExtractionPipeline;
pub use request::{ExtractRequest, ExtractResponse};
pub use result::{ExtractionContext, ExtractionResult, Suggestion};
pub use topics::TopicExtractor;
