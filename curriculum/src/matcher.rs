//! Multi-stage matching of free text against the curriculum taxonomy.
//!
//! Every search expands the query with the synonym table, scores each
//! variant against knowledge-object strings with the weighted-overlap rule
//! and, for scoped searches, falls back to semantic similarity when the
//! lexical path stays below its threshold. Units are found through their
//! objects: a unit matches when one of its objects does.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use curriculo_nlp::{Annotator, Document, document_similarity};

use crate::normalizer::{KeyTerms, key_terms};
use crate::observer::{MatchEvent, MatchObserver, Stage, TracingObserver};
use crate::scoring::{
    ANY_GRADE_SEMANTIC_THRESHOLD, ANY_GRADE_SKILL_CONFIDENCE, ANY_GRADE_UNIT_SKILL_CONFIDENCE,
    BonusScheme, GLOBAL_SKILL_CONFIDENCE, GLOBAL_SUBJECT_GRADE_CONFIDENCE, GLOBAL_THRESHOLD,
    SCOPED_THRESHOLD, SEMANTIC_THRESHOLD, SINGLE_SKILL_CONFIDENCE, SKILL_OVERLAP_CONFIDENCE,
    lexical_confidence, semantic_confidence, weighted_overlap,
};
use crate::synonyms::SynonymTable;
use crate::taxonomy::Taxonomy;

/// How a match was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Weighted key-term overlap.
    Lexical,
    /// Semantic similarity fallback.
    Semantic,
    /// Direct lookup in the taxonomy.
    Direct,
}

/// A single matched value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// The matched unit, object or skill.
    pub value: String,

    /// Confidence in [0, 1].
    pub confidence: f32,

    /// Raw score that produced the confidence.
    pub score: f32,

    /// Which path produced the match.
    pub method: MatchMethod,
}

/// Per-field confidences of a global hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfidence {
    pub subject: f32,
    pub grade: f32,
    pub unit: f32,
    pub object: f32,
    pub skill: f32,
}

/// Result of a taxonomy-wide search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMatch {
    pub subject: String,
    pub grade: String,
    pub unit: String,
    pub object: String,

    /// First skill of the object, if it has any.
    pub skill: Option<String>,

    /// Best weighted-overlap score.
    pub score: f32,

    /// Query variant that produced the score.
    pub variant: String,

    pub confidence: GlobalConfidence,
}

/// Everything available in a (subject, grade) scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeOptions {
    pub units: Vec<String>,
    pub objects: Vec<String>,
    pub total_skills: usize,
}

/// A query variant with its key terms.
struct Variant {
    text: String,
    terms: KeyTerms,
}

/// Matches text against a read-only taxonomy.
///
/// Object key terms and annotated object documents are computed once at
/// construction; queries only pay for their own variants.
pub struct CurriculumMatcher {
    taxonomy: Arc<Taxonomy>,
    synonyms: Arc<SynonymTable>,
    annotator: Arc<dyn Annotator>,
    observer: Arc<dyn MatchObserver>,
    object_terms: HashMap<String, KeyTerms>,
    object_docs: HashMap<String, Document>,
}

impl std::fmt::Debug for CurriculumMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurriculumMatcher")
            .field("objects", &self.taxonomy.object_count())
            .field("synonyms", &self.synonyms.len())
            .field("annotator", &self.annotator.name())
            .finish()
    }
}

impl CurriculumMatcher {
    /// Create a matcher reporting to a [`TracingObserver`].
    pub fn new(
        taxonomy: Arc<Taxonomy>,
        synonyms: Arc<SynonymTable>,
        annotator: Arc<dyn Annotator>,
    ) -> Self {
        let mut object_terms = HashMap::new();
        let mut object_docs = HashMap::new();
        for object in taxonomy.reverse_index().keys() {
            object_terms.insert(object.clone(), key_terms(object));
            object_docs.insert(object.clone(), annotator.annotate(object));
        }
        debug!(objects = object_terms.len(), "Prepared curriculum matcher");

        Self {
            taxonomy,
            synonyms,
            annotator,
            observer: Arc::new(TracingObserver),
            object_terms,
            object_docs,
        }
    }

    /// Report decisions to another observer.
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Search every knowledge object when subject and grade are unknown.
    ///
    /// Returns the full path of the best object when its score is above
    /// [`GLOBAL_THRESHOLD`].
    pub fn search_global(&self, text: &str) -> Option<GlobalMatch> {
        let variants = self.variants(text);
        self.emit(MatchEvent::Attempted {
            stage: Stage::GlobalSearch,
            query: text.to_string(),
            variants: variants.len(),
        });

        let mut ranked: Vec<(f32, &str, usize)> = Vec::new();
        for object in self.taxonomy.reverse_index().keys() {
            let Some(object_terms) = self.object_terms.get(object) else {
                continue;
            };
            let mut best = 0.0_f32;
            let mut best_variant = 0;
            for (idx, variant) in variants.iter().enumerate() {
                let score =
                    weighted_overlap(&variant.terms, object_terms, idx > 0, BonusScheme::Global);
                if score > best {
                    best = score;
                    best_variant = idx;
                }
            }
            if best > 0.0 {
                ranked.push((best, object.as_str(), best_variant));
            }
        }

        // Stable: equal scores keep taxonomy order.
        ranked.sort_by_key(|(score, _, _)| std::cmp::Reverse(OrderedFloat(*score)));

        for (score, object, _) in ranked.iter().take(3) {
            self.emit(MatchEvent::Candidate {
                stage: Stage::GlobalSearch,
                candidate: (*object).to_string(),
                score: *score,
            });
        }

        let Some(&(score, object, variant_idx)) = ranked.first() else {
            self.emit(MatchEvent::ThresholdCompared {
                stage: Stage::GlobalSearch,
                score: 0.0,
                threshold: GLOBAL_THRESHOLD,
                accepted: false,
            });
            return None;
        };

        let accepted = score > GLOBAL_THRESHOLD;
        self.emit(MatchEvent::ThresholdCompared {
            stage: Stage::GlobalSearch,
            score,
            threshold: GLOBAL_THRESHOLD,
            accepted,
        });
        if !accepted {
            return None;
        }

        let context = self.taxonomy.lookup(object)?;
        let skill = context.skills.first().cloned();
        let path_confidence = lexical_confidence(score);

        Some(GlobalMatch {
            subject: context.subject.clone(),
            grade: context.grade.clone(),
            unit: context.unit.clone(),
            object: object.to_string(),
            confidence: GlobalConfidence {
                subject: GLOBAL_SUBJECT_GRADE_CONFIDENCE,
                grade: GLOBAL_SUBJECT_GRADE_CONFIDENCE,
                unit: path_confidence,
                object: path_confidence,
                skill: if skill.is_some() {
                    GLOBAL_SKILL_CONFIDENCE
                } else {
                    0.0
                },
            },
            skill,
            score,
            variant: variants
                .get(variant_idx)
                .map(|v| v.text.clone())
                .unwrap_or_default(),
        })
    }

    /// Find the thematic unit of a (subject, grade) scope through its objects.
    pub fn match_unit(&self, text: &str, subject: &str, grade: &str) -> Option<ScoredMatch> {
        let candidates = self.taxonomy.objects_in_grade(subject, grade);
        self.scoped_search(Stage::Unit, text, &candidates, |(unit, _)| unit)
    }

    /// Find a knowledge object, within one unit when given.
    pub fn match_object(
        &self,
        text: &str,
        subject: &str,
        grade: &str,
        unit: Option<&str>,
    ) -> Option<ScoredMatch> {
        let candidates: Vec<(&str, &str)> = match unit {
            Some(unit) => self
                .taxonomy
                .objects(subject, grade, unit)
                .into_iter()
                .map(|object| (unit, object))
                .collect(),
            None => self.taxonomy.objects_in_grade(subject, grade),
        };
        self.scoped_search(Stage::Object, text, &candidates, |(_, object)| object)
    }

    /// Pick a skill of a known object.
    ///
    /// Among several skills the one sharing the most raw words with the text
    /// wins; otherwise the first skill is returned.
    pub fn match_skill(
        &self,
        text: &str,
        subject: &str,
        grade: &str,
        unit: &str,
        object: &str,
    ) -> Option<ScoredMatch> {
        let skills = self.taxonomy.skills(subject, grade, unit, object);
        let first = skills.first()?;

        if skills.len() > 1 {
            let lowered = text.to_lowercase();
            let text_words: HashSet<&str> = lowered.split_whitespace().collect();

            let mut best: Option<(&String, usize)> = None;
            for skill in skills {
                let skill_lower = skill.to_lowercase();
                let shared = skill_lower
                    .split_whitespace()
                    .collect::<HashSet<_>>()
                    .intersection(&text_words)
                    .count();
                if shared > best.map_or(0, |(_, count)| count) {
                    best = Some((skill, shared));
                }
            }

            if let Some((skill, shared)) = best {
                self.emit(MatchEvent::Candidate {
                    stage: Stage::Skill,
                    candidate: skill.clone(),
                    score: shared as f32,
                });
                return Some(ScoredMatch {
                    value: skill.clone(),
                    confidence: SKILL_OVERLAP_CONFIDENCE,
                    score: shared as f32,
                    method: MatchMethod::Lexical,
                });
            }
        }

        Some(ScoredMatch {
            value: first.clone(),
            confidence: SINGLE_SKILL_CONFIDENCE,
            score: 0.0,
            method: MatchMethod::Direct,
        })
    }

    /// Find a skill when the unit is known but not under the resolved grade.
    ///
    /// In the first grade of the subject containing the unit, returns the
    /// object's first skill, or the first skill of the unit's first object
    /// when the object is unknown there.
    pub fn match_skill_any_grade(
        &self,
        subject: &str,
        unit: &str,
        object: Option<&str>,
    ) -> Option<ScoredMatch> {
        let grades = self.taxonomy.subject_grades(subject)?;

        for units in grades.values() {
            let Some(objects) = units.get(unit) else {
                continue;
            };
            if let Some(object) = object
                && let Some(skills) = objects.get(object)
            {
                if let Some(skill) = skills.first() {
                    return Some(ScoredMatch {
                        value: skill.clone(),
                        confidence: ANY_GRADE_SKILL_CONFIDENCE,
                        score: 0.0,
                        method: MatchMethod::Direct,
                    });
                }
            } else if let Some((_, skills)) = objects.first()
                && let Some(skill) = skills.first()
            {
                return Some(ScoredMatch {
                    value: skill.clone(),
                    confidence: ANY_GRADE_UNIT_SKILL_CONFIDENCE,
                    score: 0.0,
                    method: MatchMethod::Direct,
                });
            }
        }

        None
    }

    /// Find a unit across every grade of a subject, semantically.
    pub fn match_unit_any_grade(&self, text: &str, subject: &str) -> Option<ScoredMatch> {
        let variants = self.variants(text);
        self.emit(MatchEvent::Attempted {
            stage: Stage::UnitAnyGrade,
            query: text.to_string(),
            variants: variants.len(),
        });

        let candidates = self.taxonomy.objects_in_subject(subject);
        let docs = self.variant_docs(&variants);

        let mut best: Option<(&str, f32)> = None;
        for (_, unit, object) in candidates {
            let similarity = self.best_similarity(&docs, object);
            if similarity > best.map_or(0.0, |(_, s)| s) {
                self.emit(MatchEvent::Candidate {
                    stage: Stage::UnitAnyGrade,
                    candidate: object.to_string(),
                    score: similarity,
                });
                best = Some((unit, similarity));
            }
        }

        let (unit, similarity) = best?;
        let accepted = similarity > ANY_GRADE_SEMANTIC_THRESHOLD;
        self.emit(MatchEvent::ThresholdCompared {
            stage: Stage::UnitAnyGrade,
            score: similarity,
            threshold: ANY_GRADE_SEMANTIC_THRESHOLD,
            accepted,
        });

        accepted.then(|| ScoredMatch {
            value: unit.to_string(),
            confidence: semantic_confidence(similarity),
            score: similarity,
            method: MatchMethod::Semantic,
        })
    }

    /// First grade of the subject containing the unit.
    pub fn grade_of_unit(&self, subject: &str, unit: &str) -> Option<String> {
        self.taxonomy
            .grade_of_unit(subject, unit)
            .map(str::to_string)
    }

    /// Units, objects and skill count of a (subject, grade) scope.
    pub fn scope_options(&self, subject: &str, grade: &str) -> ScopeOptions {
        ScopeOptions {
            units: self
                .taxonomy
                .units(subject, grade)
                .into_iter()
                .map(str::to_string)
                .collect(),
            objects: self
                .taxonomy
                .objects_in_grade(subject, grade)
                .into_iter()
                .map(|(_, object)| object.to_string())
                .collect(),
            total_skills: self.taxonomy.skill_count(subject, grade),
        }
    }

    /// Lexical pass over (unit, object) candidates with semantic fallback.
    ///
    /// `pick` selects the reported value from the winning candidate.
    fn scoped_search<'a>(
        &self,
        stage: Stage,
        text: &str,
        candidates: &[(&'a str, &'a str)],
        pick: impl Fn((&'a str, &'a str)) -> &'a str,
    ) -> Option<ScoredMatch> {
        if candidates.is_empty() {
            return None;
        }

        let variants = self.variants(text);
        self.emit(MatchEvent::Attempted {
            stage,
            query: text.to_string(),
            variants: variants.len(),
        });

        let mut best: Option<((&str, &str), f32)> = None;
        for &(unit, object) in candidates {
            let Some(object_terms) = self.object_terms.get(object) else {
                continue;
            };
            let score = variants
                .iter()
                .enumerate()
                .map(|(idx, variant)| {
                    weighted_overlap(&variant.terms, object_terms, idx > 0, BonusScheme::Scoped)
                })
                .fold(0.0_f32, f32::max);

            if score > best.map_or(0.0, |(_, s)| s) {
                self.emit(MatchEvent::Candidate {
                    stage,
                    candidate: object.to_string(),
                    score,
                });
                best = Some(((unit, object), score));
            }
        }

        let lexical_score = best.map_or(0.0, |(_, s)| s);
        let accepted = lexical_score > SCOPED_THRESHOLD;
        self.emit(MatchEvent::ThresholdCompared {
            stage,
            score: lexical_score,
            threshold: SCOPED_THRESHOLD,
            accepted,
        });
        if accepted && let Some((candidate, score)) = best {
            return Some(ScoredMatch {
                value: pick(candidate).to_string(),
                confidence: lexical_confidence(score),
                score,
                method: MatchMethod::Lexical,
            });
        }

        self.emit(MatchEvent::FallbackEntered {
            stage,
            reason: format!("lexical score {lexical_score:.3} not above {SCOPED_THRESHOLD}"),
        });

        let docs = self.variant_docs(&variants);
        let mut best: Option<((&str, &str), f32)> = None;
        for &(unit, object) in candidates {
            let similarity = self.best_similarity(&docs, object);
            if similarity > best.map_or(0.0, |(_, s)| s) {
                best = Some(((unit, object), similarity));
            }
        }

        let (candidate, similarity) = best?;
        let accepted = similarity > SEMANTIC_THRESHOLD;
        self.emit(MatchEvent::ThresholdCompared {
            stage,
            score: similarity,
            threshold: SEMANTIC_THRESHOLD,
            accepted,
        });

        accepted.then(|| ScoredMatch {
            value: pick(candidate).to_string(),
            confidence: semantic_confidence(similarity),
            score: similarity,
            method: MatchMethod::Semantic,
        })
    }

    fn variants(&self, text: &str) -> Vec<Variant> {
        self.synonyms
            .expand(text)
            .into_iter()
            .map(|text| {
                let terms = key_terms(&text);
                Variant { text, terms }
            })
            .collect()
    }

    fn variant_docs(&self, variants: &[Variant]) -> Vec<Document> {
        variants
            .iter()
            .map(|v| self.annotator.annotate(&v.text))
            .collect()
    }

    fn best_similarity(&self, docs: &[Document], object: &str) -> f32 {
        let Some(object_doc) = self.object_docs.get(object) else {
            return 0.0;
        };
        docs.iter()
            .map(|doc| document_similarity(doc, object_doc))
            .fold(0.0_f32, f32::max)
    }

    fn emit(&self, event: MatchEvent) {
        self.observer.observe(&event);
    }
}
