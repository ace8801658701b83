//! Substring keyword scan for question type, text type and student profile.

use serde::{Deserialize, Serialize};

use crate::vocabulary::Category;

const BASE_CONFIDENCE: f32 = 0.80;
const MAX_LENGTH_BONUS: f32 = 0.15;
const WHOLE_WORD_BONUS: f32 = 0.10;
const MAX_CONFIDENCE: f32 = 0.98;

/// A keyword hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub label: String,
    pub keyword: String,
    pub confidence: f32,
}

/// Scans lower-cased text for category keywords.
#[derive(Debug, Clone, Copy)]
pub struct KeywordExtractor {
    table: &'static [Category],
}

impl KeywordExtractor {
    pub fn new(table: &'static [Category]) -> Self {
        Self { table }
    }

    /// Highest-confidence keyword found, the longer keyword on equal confidence.
    ///
    /// `text` must already be lower-cased.
    pub fn extract(&self, text: &str) -> Option<KeywordMatch> {
        let padded = format!(" {text} ");
        let mut best: Option<KeywordMatch> = None;
        let mut best_len = 0;

        for (label, keywords) in self.table {
            for keyword in *keywords {
                if !text.contains(keyword) {
                    continue;
                }
                let len = keyword.chars().count();
                let mut confidence = BASE_CONFIDENCE + (len as f32 / 100.0).min(MAX_LENGTH_BONUS);
                if padded.contains(&format!(" {keyword} ")) {
                    confidence = (confidence + WHOLE_WORD_BONUS).min(MAX_CONFIDENCE);
                }

                let best_confidence = best.as_ref().map_or(0.0, |b| b.confidence);
                if confidence > best_confidence || (confidence == best_confidence && len > best_len)
                {
                    best_len = len;
                    best = Some(KeywordMatch {
                        label: (*label).to_string(),
                        keyword: (*keyword).to_string(),
                        confidence,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{QUESTION_TYPES, STUDENT_PROFILES, TEXT_TYPES};
    use pretty_assertions::assert_eq;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_whole_word_bonus() {
        let extractor = KeywordExtractor::new(TEXT_TYPES);
        let found = extractor.extract("use um mapa do brasil").unwrap();
        assert_eq!(found.label, "mapa");
        assert!(approx(found.confidence, 0.94));
    }

    #[test]
    fn test_longer_keyword_wins() {
        let extractor = KeywordExtractor::new(QUESTION_TYPES);
        let found = extractor
            .extract("questão de múltipla escolha sobre frações")
            .unwrap();
        assert_eq!(found.label, "multipla_escolha");
        assert_eq!(found.keyword, "múltipla escolha");
    }

    #[test]
    fn test_substring_without_bonus() {
        let extractor = KeywordExtractor::new(STUDENT_PROFILES);
        let found = extractor.extract("turma iniciantes").unwrap();
        assert_eq!(found.label, "conhecimento_basico");
        assert!(approx(found.confidence, 0.89));
    }

    #[test]
    fn test_nothing_found() {
        let extractor = KeywordExtractor::new(QUESTION_TYPES);
        assert_eq!(extractor.extract("era vargas"), None);
    }
}
