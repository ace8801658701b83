//! Field-by-field resolution of one teacher description.
//!
//! The pipeline seeds the result from caller context, tries a taxonomy-wide
//! search for short texts, then resolves the remaining fields in dependency
//! order:
//!
//! ```text
//! disciplina → ano → nivelBloom → tipoQuestao → tipoTextoBase → perfilAluno
//!            → unidadeTematica → objetoConhecimento → habilidade
//! ```
//!
//! A field that already has a value is never recomputed, so context values
//! always survive. Fields nothing could resolve get confidence-gated
//! defaults or stay missing; absence is never an error.

use std::sync::Arc;

use tracing::debug;

use curriculo_curriculum::{
    CurriculumMatcher, MatchEvent, MatchObserver, Stage, SynonymTable, Taxonomy, TracingObserver,
};
use curriculo_nlp::{Annotator, fold};

use crate::category::CategoryMatcher;
use crate::config::ExtractConfig;
use crate::defaults::apply_defaults;
use crate::field::Field;
use crate::grade::{GRADE_CONFIDENCE, GradeExtractor};
use crate::keywords::KeywordExtractor;
use crate::result::{CONTEXT_CONFIDENCE, ExtractionContext, ExtractionResult};
use crate::topics::TopicExtractor;
use crate::vocabulary::{COGNITIVE_LEVELS, QUESTION_TYPES, STUDENT_PROFILES, SUBJECTS, TEXT_TYPES};

/// Confidence of a grade inferred from the unit it contains.
pub const INFERRED_GRADE_CONFIDENCE: f32 = 0.75;

/// Confidence of the synthesized skill statement.
pub const GENERIC_SKILL_CONFIDENCE: f32 = 0.50;

pub const TOPIC_MESSAGE: &str = "Tópicos identificados no texto (não encontrados na BNCC)";

/// Resolves every metadata field of a text.
pub struct ExtractionPipeline {
    annotator: Arc<dyn Annotator>,
    curriculum: CurriculumMatcher,
    subjects: CategoryMatcher,
    cognitive_levels: CategoryMatcher,
    grades: GradeExtractor,
    question_types: KeywordExtractor,
    text_types: KeywordExtractor,
    profiles: KeywordExtractor,
    topics: TopicExtractor,
    observer: Arc<dyn MatchObserver>,
    short_text_max_words: usize,
    missing_confidence_threshold: f32,
    suggest_scope_units: bool,
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("annotator", &self.annotator.name())
            .field("curriculum", &self.curriculum)
            .field("subject_phrases", &self.subjects.len())
            .field("cognitive_level_phrases", &self.cognitive_levels.len())
            .finish()
    }
}

impl ExtractionPipeline {
    pub fn new(
        config: &ExtractConfig,
        taxonomy: Arc<Taxonomy>,
        synonyms: Arc<SynonymTable>,
        annotator: Arc<dyn Annotator>,
    ) -> Self {
        let subjects = CategoryMatcher::new(annotator.as_ref(), SUBJECTS);
        let cognitive_levels = CategoryMatcher::new(annotator.as_ref(), COGNITIVE_LEVELS);
        let curriculum = CurriculumMatcher::new(taxonomy, synonyms, Arc::clone(&annotator));

        Self {
            annotator,
            curriculum,
            subjects,
            cognitive_levels,
            grades: GradeExtractor::new(),
            question_types: KeywordExtractor::new(QUESTION_TYPES),
            text_types: KeywordExtractor::new(TEXT_TYPES),
            profiles: KeywordExtractor::new(STUDENT_PROFILES),
            topics: TopicExtractor::new(config.max_topic_suggestions),
            observer: Arc::new(TracingObserver),
            short_text_max_words: config.short_text_max_words,
            missing_confidence_threshold: config.missing_confidence_threshold,
            suggest_scope_units: config.suggest_scope_units,
        }
    }

    /// Report matcher and resolution events to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.curriculum = self.curriculum.with_observer(Arc::clone(&observer));
        self.observer = observer;
        self
    }

    pub fn curriculum(&self) -> &CurriculumMatcher {
        &self.curriculum
    }

    /// Resolve every field of `text`.
    pub fn classify(&self, text: &str, context: &ExtractionContext) -> ExtractionResult {
        let mut result = ExtractionResult::new();
        let text_lower = text.to_lowercase();

        for (field, value) in context.iter() {
            result.fill(field, value, CONTEXT_CONFIDENCE);
        }

        if text.split_whitespace().count() <= self.short_text_max_words {
            self.apply_global_search(&mut result, text);
        }

        let doc = self.annotator.annotate(text);

        if !result.contains(Field::Subject)
            && let Some(found) = self.subjects.best_match(&doc)
        {
            self.resolve(&mut result, Field::Subject, found.label, found.confidence);
        }

        if !result.contains(Field::Grade)
            && let Some(grade) = self.grades.extract(text)
        {
            self.resolve(&mut result, Field::Grade, grade, GRADE_CONFIDENCE);
        }

        if !result.contains(Field::CognitiveLevel)
            && let Some(found) = self.cognitive_levels.best_match(&doc)
        {
            self.resolve(&mut result, Field::CognitiveLevel, found.label, found.confidence);
        }

        for (field, extractor) in [
            (Field::QuestionType, &self.question_types),
            (Field::TextType, &self.text_types),
            (Field::StudentProfile, &self.profiles),
        ] {
            if !result.contains(field)
                && let Some(found) = extractor.extract(&text_lower)
            {
                self.resolve(&mut result, field, found.label, found.confidence);
            }
        }

        self.resolve_unit(&mut result, text);
        self.resolve_object(&mut result, text);
        self.resolve_skill(&mut result, text);

        if !result.contains(Field::Unit) {
            self.attach_unit_suggestions(&mut result, &doc);
        }

        apply_defaults(&mut result, &text_lower);
        result.compute_missing(self.missing_confidence_threshold);

        debug!(
            extracted = result.extracted.len(),
            missing = result.missing_fields.len(),
            "Classification finished"
        );
        result
    }

    /// Taxonomy-wide search for short texts. Only fills unset fields, and a
    /// hit contradicting a supplied subject or grade is dropped.
    fn apply_global_search(&self, result: &mut ExtractionResult, text: &str) {
        let Some(found) = self.curriculum.search_global(text) else {
            debug!("Global search found nothing");
            return;
        };

        let agrees = |field: Field, value: &str| {
            result
                .get(field)
                .is_none_or(|known| fold(known) == fold(value))
        };
        if !agrees(Field::Subject, &found.subject) || !agrees(Field::Grade, &found.grade) {
            debug!(
                subject = %found.subject,
                grade = %found.grade,
                "Global hit contradicts the context, ignoring it"
            );
            return;
        }

        self.resolve(result, Field::Subject, found.subject, found.confidence.subject);
        self.resolve(result, Field::Grade, found.grade, found.confidence.grade);
        self.resolve(result, Field::Unit, found.unit, found.confidence.unit);
        self.resolve(result, Field::Object, found.object, found.confidence.object);
        if let Some(skill) = found.skill {
            self.resolve(result, Field::Skill, skill, found.confidence.skill);
        }
    }

    fn resolve_unit(&self, result: &mut ExtractionResult, text: &str) {
        if result.contains(Field::Unit) {
            return;
        }
        let subject = result.get(Field::Subject).map(str::to_string);
        let grade = result.get(Field::Grade).map(str::to_string);

        match (subject, grade) {
            (Some(subject), None) => {
                let Some(found) = self.curriculum.match_unit_any_grade(text, &subject) else {
                    return;
                };
                let unit = found.value.clone();
                self.resolve(result, Field::Unit, found.value, found.confidence);
                if let Some(grade) = self.curriculum.grade_of_unit(&subject, &unit) {
                    self.resolve(result, Field::Grade, grade, INFERRED_GRADE_CONFIDENCE);
                }
            }
            (Some(subject), Some(grade)) => {
                if let Some(found) = self.curriculum.match_unit(text, &subject, &grade) {
                    self.resolve(result, Field::Unit, found.value, found.confidence);
                }
            }
            (None, _) => debug!("Unit needs a subject"),
        }
    }

    fn resolve_object(&self, result: &mut ExtractionResult, text: &str) {
        if result.contains(Field::Object) {
            return;
        }
        let (Some(subject), Some(grade)) = (result.get(Field::Subject), result.get(Field::Grade))
        else {
            debug!("Object needs subject and grade");
            return;
        };

        if let Some(found) =
            self.curriculum
                .match_object(text, subject, grade, result.get(Field::Unit))
        {
            self.resolve(result, Field::Object, found.value, found.confidence);
        }
    }

    fn resolve_skill(&self, result: &mut ExtractionResult, text: &str) {
        if result.contains(Field::Skill) {
            return;
        }
        let (Some(subject), Some(grade), Some(unit), Some(object)) = (
            result.get(Field::Subject),
            result.get(Field::Grade),
            result.get(Field::Unit),
            result.get(Field::Object),
        ) else {
            debug!("Skill needs subject, grade, unit and object");
            return;
        };

        let found = self
            .curriculum
            .match_skill(text, subject, grade, unit, object)
            .or_else(|| {
                self.fallback("no skill under the resolved grade");
                self.curriculum
                    .match_skill_any_grade(subject, unit, Some(object))
            });
        let (value, confidence) = match found {
            Some(found) => (found.value, found.confidence),
            None => {
                self.fallback("generic skill statement");
                (
                    format!("Compreender e analisar {object} no contexto de {unit}"),
                    GENERIC_SKILL_CONFIDENCE,
                )
            }
        };
        self.resolve(result, Field::Skill, value, confidence);
    }

    /// Free topics, plus the units in scope when subject and grade are known.
    fn attach_unit_suggestions(&self, result: &mut ExtractionResult, doc: &curriculo_nlp::Document) {
        let topics = self.topics.extract(doc);
        if !topics.is_empty() {
            result.suggest(Field::Unit, topics, TOPIC_MESSAGE);
        }

        if !self.suggest_scope_units {
            return;
        }
        let (Some(subject), Some(grade)) = (result.get(Field::Subject), result.get(Field::Grade))
        else {
            return;
        };
        let scope = self.curriculum.scope_options(subject, grade);
        if !scope.units.is_empty() {
            let message = format!("Unidades temáticas da BNCC para {subject} {grade}");
            result.suggest(Field::Unit, scope.units, message);
        }
    }

    fn fallback(&self, reason: &str) {
        self.observer.observe(&MatchEvent::FallbackEntered {
            stage: Stage::Pipeline,
            reason: reason.to_string(),
        });
    }

    fn resolve(
        &self,
        result: &mut ExtractionResult,
        field: Field,
        value: impl Into<String>,
        confidence: f32,
    ) {
        let value = value.into();
        if result.fill(field, value.clone(), confidence) {
            self.observer.observe(&MatchEvent::Resolved {
                field: field.key().to_string(),
                value,
                confidence,
            });
        }
    }
}
