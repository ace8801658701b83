//! Extraction results and caller-supplied context.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::field::Field;

/// Confidence of a value supplied by the caller.
pub const CONTEXT_CONFIDENCE: f32 = 1.0;

/// Alternative values offered for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Field the values are for.
    pub field: Field,

    /// Candidate values.
    pub values: Vec<String>,

    /// Human-readable note.
    pub message: String,
}

/// Resolved fields of one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Field values in resolution order.
    pub extracted: IndexMap<Field, String>,

    /// Confidence per resolved field.
    pub confidence: IndexMap<Field, f32>,

    /// Alternatives for fields that could not be resolved.
    pub suggestions: Vec<Suggestion>,

    /// Fields absent or below the confidence threshold.
    pub missing_fields: Vec<Field>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the field has a value.
    pub fn contains(&self, field: Field) -> bool {
        self.extracted.contains_key(&field)
    }

    /// Value of a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.extracted.get(&field).map(String::as_str)
    }

    /// Confidence of a field, 0.0 when absent.
    pub fn confidence_of(&self, field: Field) -> f32 {
        self.confidence.get(&field).copied().unwrap_or_default()
    }

    /// Set a field unless it already has a value. Returns whether it was set.
    pub fn fill(&mut self, field: Field, value: impl Into<String>, confidence: f32) -> bool {
        if self.contains(field) {
            return false;
        }
        self.extracted.insert(field, value.into());
        self.confidence.insert(field, confidence);
        true
    }

    /// Attach a suggestion record.
    pub fn suggest(&mut self, field: Field, values: Vec<String>, message: impl Into<String>) {
        self.suggestions.push(Suggestion {
            field,
            values,
            message: message.into(),
        });
    }

    /// Recompute `missing_fields` over the checklist.
    pub fn compute_missing(&mut self, threshold: f32) {
        self.missing_fields = Field::CHECKLIST
            .into_iter()
            .filter(|field| !self.contains(*field) || self.confidence_of(*field) < threshold)
            .collect();
    }
}

/// Caller-supplied field values, treated as ground truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionContext {
    values: IndexMap<Field, String>,
}

impl ExtractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Empty or whitespace-only values are ignored.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert a value. Empty or whitespace-only values are ignored.
    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            debug!(field = %field, "Ignoring empty context value");
            return;
        }
        self.values.insert(field, value);
    }

    /// Build from a JSON object keyed by wire names.
    ///
    /// Unknown keys and falsy values (null, false, 0, empty string, array or
    /// object) are skipped.
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        let mut context = Self::new();
        for (key, value) in map {
            let Some(field) = Field::from_key(key) else {
                debug!(key = %key, "Ignoring unknown context key");
                continue;
            };
            match value_text(value) {
                Some(text) => context.insert(field, text),
                None => debug!(field = %field, "Ignoring falsy context value"),
            }
        }
        context
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_fill_never_overwrites() {
        let mut result = ExtractionResult::new();
        assert!(result.fill(Field::Subject, "Matemática", 1.0));
        assert!(!result.fill(Field::Subject, "História", 0.9));
        assert_eq!(result.get(Field::Subject), Some("Matemática"));
        assert_eq!(result.confidence_of(Field::Subject), 1.0);
    }

    #[test]
    fn test_missing_fields() {
        let mut result = ExtractionResult::new();
        result.fill(Field::Subject, "História", 0.85);
        result.fill(Field::CognitiveLevel, "compreensao", 0.5);
        result.fill(Field::StudentProfile, "bom_dominio", 0.49);
        result.compute_missing(0.5);

        assert!(!result.missing_fields.contains(&Field::Subject));
        assert!(!result.missing_fields.contains(&Field::CognitiveLevel));
        assert!(result.missing_fields.contains(&Field::StudentProfile));
        assert_eq!(result.missing_fields.len(), 7);
        assert_eq!(result.missing_fields[0], Field::Grade);
    }

    #[test]
    fn test_context_from_json_skips_falsy_and_unknown() {
        let map = json!({
            "disciplina": "Matemática",
            "ano": "",
            "nivelBloom": null,
            "tipoQuestao": false,
            "serie": "6º",
            "perfilAluno": 0
        });
        let context = ExtractionContext::from_json_map(map.as_object().unwrap());
        assert_eq!(context.len(), 1);
        assert_eq!(context.get(Field::Subject), Some("Matemática"));
    }

    #[test]
    fn test_whitespace_context_value_is_absent() {
        let context = ExtractionContext::new()
            .with(Field::Grade, "   ")
            .with(Field::Subject, " História ");
        assert_eq!(context.get(Field::Grade), None);
        assert_eq!(context.get(Field::Subject), Some(" História "));

        let map = json!({ "ano": " \t" });
        assert!(ExtractionContext::from_json_map(map.as_object().unwrap()).is_empty());
    }

    #[test]
    fn test_result_serializes_wire_names() {
        let mut result = ExtractionResult::new();
        result.fill(Field::Grade, "6º", 0.95);
        result.suggest(Field::Unit, vec!["Napoleão".to_string()], "nota");
        result.compute_missing(0.5);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["extracted"]["ano"], "6º");
        assert_eq!(json["suggestions"][0]["field"], "unidadeTematica");
        assert_eq!(json["missing_fields"][0], "disciplina");
    }
}
