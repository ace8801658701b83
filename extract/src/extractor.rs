//! Service facade owning the loaded data and the pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use curriculo_curriculum::{MatchObserver, SynonymTable, Taxonomy};
use curriculo_nlp::Annotator;

use crate::config::ExtractConfig;
use crate::error::{ExtractError, Result};
use crate::pipeline::ExtractionPipeline;
use crate::request::{ExtractRequest, ExtractResponse};
use crate::result::{ExtractionContext, ExtractionResult};

/// Service state reported by [`Extractor::health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` or `"degraded"`.
    pub status: String,
    pub annotator_ready: bool,
    pub curriculum_objects: usize,
}

/// Entry point for extraction requests.
///
/// The curriculum and synonym table are loaded once and shared read-only by
/// every request. Without a ready annotator no pipeline is built and every
/// request fails with [`ExtractError::AnnotatorUnavailable`].
#[derive(Debug)]
pub struct Extractor {
    config: ExtractConfig,
    annotator_name: String,
    taxonomy: Arc<Taxonomy>,
    pipeline: Option<ExtractionPipeline>,
}

impl Extractor {
    /// Load the configured curriculum and synonyms.
    ///
    /// A missing or invalid curriculum leaves an empty taxonomy; only
    /// non-curriculum fields are extracted then.
    pub fn new(config: ExtractConfig, annotator: Arc<dyn Annotator>) -> Self {
        let taxonomy = Taxonomy::load_or_empty(&config.curriculum_path);
        let synonyms = match &config.synonyms_path {
            Some(path) => SynonymTable::load(path).unwrap_or_else(|e| {
                warn!("Failed to load synonyms from {}: {e}, using built-in table", path.display());
                SynonymTable::builtin()
            }),
            None => SynonymTable::builtin(),
        };
        Self::from_parts(config, Arc::new(taxonomy), Arc::new(synonyms), annotator)
    }

    /// Load the configured curriculum and synonyms, failing on either.
    ///
    /// Use when the data files were named explicitly and a silent fallback
    /// would hide a typo.
    pub fn try_new(config: ExtractConfig, annotator: Arc<dyn Annotator>) -> Result<Self> {
        let taxonomy = Taxonomy::load(&config.curriculum_path)?;
        let synonyms = match &config.synonyms_path {
            Some(path) => SynonymTable::load(path)?,
            None => SynonymTable::builtin(),
        };
        Ok(Self::from_parts(
            config,
            Arc::new(taxonomy),
            Arc::new(synonyms),
            annotator,
        ))
    }

    /// Build from already loaded data.
    pub fn from_parts(
        config: ExtractConfig,
        taxonomy: Arc<Taxonomy>,
        synonyms: Arc<SynonymTable>,
        annotator: Arc<dyn Annotator>,
    ) -> Self {
        let annotator_name = annotator.name().to_string();
        let pipeline = if annotator.is_ready() {
            Some(ExtractionPipeline::new(
                &config,
                Arc::clone(&taxonomy),
                synonyms,
                annotator,
            ))
        } else {
            warn!("Annotator {annotator_name} is not ready, extraction disabled");
            None
        };

        info!(
            "Extractor initialised: annotator={annotator_name}, curriculum objects={}",
            taxonomy.object_count()
        );

        Self {
            config,
            annotator_name,
            taxonomy,
            pipeline,
        }
    }

    /// Report pipeline decisions to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.pipeline = self.pipeline.map(|p| p.with_observer(observer));
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Whether requests can be served.
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn health(&self) -> HealthStatus {
        let ready = self.is_ready();
        HealthStatus {
            status: if ready { "healthy" } else { "degraded" }.to_string(),
            annotator_ready: ready,
            curriculum_objects: self.taxonomy.object_count(),
        }
    }

    /// Classify a text with the given context.
    pub fn process(&self, text: &str, context: &ExtractionContext) -> Result<ExtractionResult> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| ExtractError::AnnotatorUnavailable(self.annotator_name.clone()))?;
        debug!(chars = text.len(), context = context.len(), "Processing text");
        Ok(pipeline.classify(text, context))
    }

    /// Validate and serve one request.
    pub fn handle(&self, request: &ExtractRequest) -> Result<ExtractResponse> {
        let chars = request.significant_chars();
        if chars < self.config.min_text_chars {
            return Err(ExtractError::TextTooShort {
                chars,
                min: self.config.min_text_chars,
            });
        }

        let result = self.process(&request.text, &request.extraction_context())?;
        Ok(ExtractResponse {
            result,
            original_text: request.text.clone(),
        })
    }
}
