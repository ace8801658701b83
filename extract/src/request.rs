//! Request and response contract of the extraction service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::result::{ExtractionContext, ExtractionResult};

/// One extraction request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Teacher description.
    pub text: String,

    /// Known field values keyed by wire name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl ExtractRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }

    /// Attach a context value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Typed context. Unknown keys and falsy values are dropped.
    pub fn extraction_context(&self) -> ExtractionContext {
        self.context
            .as_ref()
            .map(ExtractionContext::from_json_map)
            .unwrap_or_default()
    }

    /// Characters of the text that are not whitespace.
    pub fn significant_chars(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }
}

/// Extraction result echoed with the request text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractResponse {
    #[serde(flatten)]
    pub result: ExtractionResult,

    pub original_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_from_json() {
        let request: ExtractRequest = serde_json::from_value(json!({
            "text": "Era Vargas",
            "context": { "disciplina": "História", "ano": null }
        }))
        .unwrap();

        let context = request.extraction_context();
        assert_eq!(context.len(), 1);
        assert_eq!(context.get(Field::Subject), Some("História"));
    }

    #[test]
    fn test_request_without_context() {
        let request: ExtractRequest = serde_json::from_str(r#"{"text": "  a b "}"#).unwrap();
        assert!(request.extraction_context().is_empty());
        assert_eq!(request.significant_chars(), 2);
    }

    #[test]
    fn test_response_is_flat() {
        let mut result = ExtractionResult::new();
        result.fill(Field::Grade, "6º", 0.95);
        let response = ExtractResponse {
            result,
            original_text: "6º ano".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["extracted"]["ano"], "6º");
        assert_eq!(json["original_text"], "6º ano");
        assert!(json.get("result").is_none());
    }
}
