//! Fallback values for fields the text did not resolve.

use curriculo_nlp::fold;
use tracing::debug;

use crate::field::Field;
use crate::result::ExtractionResult;
use crate::vocabulary::{
    ANALYSIS_VERBS, CALCULATION_VERBS, EARLY_GRADES, EXPLANATORY_VERBS, LATER_GRADES,
    OPTION_MARKERS, TEXT_TYPE_BY_SUBJECT,
};

pub const PROFILE_CONFIDENCE: f32 = 0.6;
pub const QUESTION_TYPE_CONFIDENCE: f32 = 0.65;
pub const VERB_LEVEL_CONFIDENCE: f32 = 0.65;
pub const FALLBACK_LEVEL_CONFIDENCE: f32 = 0.5;
pub const TEXT_TYPE_CONFIDENCE: f32 = 0.55;

/// Fill profile, question type, cognitive level and text type when unset.
///
/// `text` must already be lower-cased. Fields already present are left alone.
pub fn apply_defaults(result: &mut ExtractionResult, text: &str) {
    if !result.contains(Field::StudentProfile)
        && let Some(profile) = result.get(Field::Grade).and_then(profile_for_grade)
    {
        result.fill(Field::StudentProfile, profile, PROFILE_CONFIDENCE);
        debug!(profile, "Default student profile from grade");
    }

    if !result.contains(Field::QuestionType)
        && let Some(kind) = question_type_for(text)
    {
        result.fill(Field::QuestionType, kind, QUESTION_TYPE_CONFIDENCE);
        debug!(kind, "Default question type");
    }

    if !result.contains(Field::CognitiveLevel) {
        let (level, confidence) = cognitive_level_for(text);
        result.fill(Field::CognitiveLevel, level, confidence);
        debug!(level, "Default cognitive level");
    }

    if !result.contains(Field::TextType)
        && let Some(kind) = result.get(Field::Subject).and_then(text_type_for_subject)
    {
        result.fill(Field::TextType, kind, TEXT_TYPE_CONFIDENCE);
        debug!(kind, "Default text type from subject");
    }
}

/// Early grades map to basic knowledge, later grades to good command.
pub fn profile_for_grade(grade: &str) -> Option<&'static str> {
    if EARLY_GRADES.iter().any(|g| grade.contains(g)) {
        Some("conhecimento_basico")
    } else if LATER_GRADES.iter().any(|g| grade.contains(g)) {
        Some("bom_dominio")
    } else {
        None
    }
}

fn question_type_for(text: &str) -> Option<&'static str> {
    if OPTION_MARKERS.iter().any(|m| text.contains(m)) {
        Some("multipla_escolha")
    } else if EXPLANATORY_VERBS.iter().any(|v| text.contains(v)) {
        Some("dissertativa_longa")
    } else {
        None
    }
}

fn cognitive_level_for(text: &str) -> (&'static str, f32) {
    if ANALYSIS_VERBS.iter().any(|v| text.contains(v)) {
        ("analise", VERB_LEVEL_CONFIDENCE)
    } else if CALCULATION_VERBS.iter().any(|v| text.contains(v)) {
        ("aplicacao", VERB_LEVEL_CONFIDENCE)
    } else {
        ("compreensao", FALLBACK_LEVEL_CONFIDENCE)
    }
}

fn text_type_for_subject(subject: &str) -> Option<&'static str> {
    let subject = fold(subject);
    TEXT_TYPE_BY_SUBJECT
        .iter()
        .find(|(fragment, _)| subject.contains(fragment))
        .map(|(_, kind)| *kind)
}
