use std::path::PathBuf;
use std::sync::Arc;

use curriculo_curriculum::{MatchEvent, RecordingObserver};
use curriculo_extract::pipeline::TOPIC_MESSAGE;
use curriculo_extract::{
    ExtractConfig, ExtractError, ExtractRequest, ExtractionContext, Extractor, Field,
};
use curriculo_nlp::HeuristicAnnotator;
use pretty_assertions::assert_eq;

fn curriculum_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/curriculum.json")
}

fn extractor() -> Extractor {
    let config = ExtractConfig::default().with_curriculum_path(curriculum_path());
    Extractor::new(config, Arc::new(HeuristicAnnotator::new()))
}

fn classify(extractor: &Extractor, text: &str) -> curriculo_extract::ExtractionResult {
    extractor.process(text, &ExtractionContext::new()).unwrap()
}

#[test]
fn test_era_vargas_resolves_through_global_search() {
    let extractor = extractor();
    let result = classify(&extractor, "Era Vargas");

    assert_eq!(result.get(Field::Subject), Some("História"));
    assert_eq!(result.get(Field::Grade), Some("9º"));
    assert_eq!(
        result.get(Field::Unit),
        Some("O nascimento da República no Brasil e os processos históricos até a metade do século XX")
    );
    assert_eq!(
        result.get(Field::Object),
        Some("O período varguista e suas contradições")
    );
    assert!(result.get(Field::Skill).is_some_and(|s| s.starts_with("(EF09HI06)")));
    assert!(result.confidence_of(Field::Subject) >= 0.85);
    assert!(result.confidence_of(Field::Grade) >= 0.85);

    assert_eq!(result.get(Field::TextType), Some("documento_historico"));
    assert_eq!(result.get(Field::StudentProfile), Some("bom_dominio"));
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_fraction_question() {
    let extractor = extractor();
    let result = classify(&extractor, "Explique a fração 3/4");

    assert_eq!(result.get(Field::Subject), Some("Matemática"));
    assert_eq!(result.get(Field::QuestionType), Some("dissertativa_longa"));
    assert_eq!(result.confidence_of(Field::QuestionType), 0.65);
    assert_eq!(result.get(Field::CognitiveLevel), Some("compreensao"));
    assert_eq!(result.get(Field::TextType), Some("grafico_barras"));
    assert!(!result.contains(Field::Unit));
    assert!(result.missing_fields.contains(&Field::Grade));
    assert!(result.missing_fields.contains(&Field::Unit));
}

#[test]
fn test_context_is_never_overwritten() {
    let extractor = extractor();
    let context = ExtractionContext::new().with(Field::Subject, "Matemática");
    let result = extractor.process("Era Vargas", &context).unwrap();

    assert_eq!(result.get(Field::Subject), Some("Matemática"));
    assert_eq!(result.confidence_of(Field::Subject), 1.0);
    // The Vargas hit belongs to another subject and is dropped whole.
    assert_eq!(result.get(Field::Unit), None);
    assert_eq!(result.get(Field::Grade), None);
}

#[test]
fn test_agreeing_context_keeps_global_hit() {
    let extractor = extractor();
    let context = ExtractionContext::new().with(Field::Subject, "historia");
    let result = extractor.process("Era Vargas", &context).unwrap();

    assert_eq!(result.get(Field::Subject), Some("historia"));
    assert_eq!(result.confidence_of(Field::Subject), 1.0);
    assert_eq!(result.get(Field::Grade), Some("9º"));
    assert_eq!(
        result.get(Field::Object),
        Some("O período varguista e suas contradições")
    );
    assert!(result.contains(Field::Unit));
}

#[test]
fn test_context_from_request_json() {
    let extractor = extractor();
    let request = ExtractRequest::new("Questão sobre o período varguista")
        .with_context("disciplina", "História")
        .with_context("ano", "9º")
        .with_context("tipoQuestao", "verdadeiro_falso");
    let response = extractor.handle(&request).unwrap();

    assert_eq!(response.original_text, "Questão sobre o período varguista");
    assert_eq!(response.result.get(Field::QuestionType), Some("verdadeiro_falso"));
    assert_eq!(
        response.result.get(Field::Object),
        Some("O período varguista e suas contradições")
    );
}

#[test]
fn test_grade_numeral_and_word() {
    let extractor = extractor();
    for text in ["Questão para o 6º ano", "Questão para o sexto ano"] {
        let result = classify(&extractor, text);
        assert_eq!(result.get(Field::Grade), Some("6º"), "{text}");
        assert_eq!(result.confidence_of(Field::Grade), 0.95, "{text}");
        assert_eq!(result.get(Field::StudentProfile), Some("bom_dominio"), "{text}");
    }
}

#[test]
fn test_scoped_question_resolves_full_path() {
    let extractor = extractor();
    let result = classify(
        &extractor,
        "Questão sobre o período varguista para o 9º ano de história",
    );

    assert_eq!(result.get(Field::Subject), Some("História"));
    assert_eq!(result.get(Field::Grade), Some("9º"));
    assert_eq!(
        result.get(Field::Object),
        Some("O período varguista e suas contradições")
    );
    assert!(result.get(Field::Skill).is_some_and(|s| s.starts_with("(EF09HI06)")));
    assert!(!result.missing_fields.contains(&Field::Unit));
}

#[test]
fn test_unknown_topic_becomes_suggestion() {
    let extractor = extractor();
    let result = classify(&extractor, "Napoleão Bonaparte");

    assert!(!result.contains(Field::Unit));
    assert_eq!(result.suggestions.len(), 1);
    assert_eq!(result.suggestions[0].field, Field::Unit);
    assert_eq!(result.suggestions[0].values, vec!["Napoleão Bonaparte"]);
    assert_eq!(result.suggestions[0].message, TOPIC_MESSAGE);
    assert!(result.missing_fields.contains(&Field::Subject));
}

#[test]
fn test_scope_units_suggested_when_no_unit_matches() {
    let extractor = extractor();
    let result = classify(
        &extractor,
        "Questão de matemática para o 6º ano sobre o teorema de Tales",
    );

    assert_eq!(result.get(Field::Subject), Some("Matemática"));
    assert_eq!(result.get(Field::Grade), Some("6º"));
    assert!(!result.contains(Field::Unit));
    let scope = result
        .suggestions
        .iter()
        .find(|s| s.message.starts_with("Unidades temáticas"))
        .unwrap();
    assert_eq!(
        scope.values,
        vec!["Números", "Geometria", "Probabilidade e estatística"]
    );
}

#[test]
fn test_missing_fields_follow_confidence() {
    let extractor = extractor();
    for text in [
        "Era Vargas",
        "Explique a fração 3/4",
        "Napoleão Bonaparte",
        "Compare a Revolução Francesa e a Revolução Industrial no 8º ano",
    ] {
        let result = classify(&extractor, text);
        for field in Field::CHECKLIST {
            let resolved = result.contains(field) && result.confidence_of(field) >= 0.5;
            assert_eq!(result.missing_fields.contains(&field), !resolved, "{text}: {field}");
        }
    }
}

#[test]
fn test_classification_is_deterministic() {
    let extractor = extractor();
    for text in ["Era Vargas", "ditadura militar no Brasil", "Explique a fração 3/4"] {
        let first = classify(&extractor, text);
        let second = classify(&extractor, text);
        assert_eq!(first, second);
    }
}

#[test]
fn test_short_text_is_rejected() {
    let extractor = extractor();
    let err = extractor.handle(&ExtractRequest::new("oi")).unwrap_err();
    assert!(matches!(err, ExtractError::TextTooShort { chars: 2, min: 3 }));
}

#[test]
fn test_health_reports_curriculum_size() {
    let extractor = extractor();
    let health = extractor.health();
    assert_eq!(health.status, "healthy");
    assert!(health.annotator_ready);
    assert_eq!(health.curriculum_objects, extractor.taxonomy().object_count());
    assert!(health.curriculum_objects > 30);
}

#[test]
fn test_observer_sees_resolutions() {
    let observer = Arc::new(RecordingObserver::new());
    let extractor = extractor().with_observer(observer.clone());
    classify(&extractor, "Era Vargas");

    let events = observer.events();
    assert!(events.iter().any(|e| matches!(e, MatchEvent::Attempted { .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        MatchEvent::Resolved { field, value, .. } if field == "disciplina" && value == "História"
    )));
}
