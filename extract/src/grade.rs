//! Grade extraction from ordinal phrasings.

use regex_lite::Regex;
use tracing::{debug, warn};

use crate::vocabulary::GRADES;

/// Confidence of a grade read from the text.
pub const GRADE_CONFIDENCE: f32 = 0.95;

/// Maps "6º ano", "6 ano", "sexto ano" and similar to canonical grade labels.
#[derive(Debug, Clone)]
pub struct GradeExtractor {
    patterns: Vec<(&'static str, Regex)>,
}

impl Default for GradeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeExtractor {
    pub fn new() -> Self {
        let mut patterns = Vec::new();
        for (grade, sources) in GRADES {
            for source in *sources {
                match Regex::new(&format!("(?i){source}")) {
                    Ok(re) => patterns.push((*grade, re)),
                    Err(e) => warn!(pattern = source, error = %e, "Invalid grade pattern"),
                }
            }
        }
        Self { patterns }
    }

    /// First grade whose pattern matches. Run on the original text so
    /// numerals and ordinal marks are preserved.
    ///
    /// `(?i)` folds ASCII only, so accented capitals are lowered first.
    pub fn extract(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        let found = self
            .patterns
            .iter()
            .find(|(_, re)| re.is_match(&lowered))
            .map(|(grade, _)| *grade);
        debug!(grade = ?found, "Grade extraction");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeral_and_word_forms() {
        let extractor = GradeExtractor::new();
        assert_eq!(extractor.extract("Questão para o 6º ano"), Some("6º"));
        assert_eq!(extractor.extract("questão para o sexto ano"), Some("6º"));
        assert_eq!(extractor.extract("turma do 8o ano"), Some("8º"));
        assert_eq!(extractor.extract("alunos do 9 ano"), Some("9º"));
        assert_eq!(extractor.extract("Sétimo Ano"), Some("7º"));
        assert_eq!(extractor.extract("NONO ANO"), Some("9º"));
    }

    #[test]
    fn test_uppercase_accented_ordinals() {
        let extractor = GradeExtractor::new();
        assert_eq!(extractor.extract("QUESTÃO PARA O SÉTIMO ANO"), Some("7º"));
        assert_eq!(extractor.extract("SÉTIMO ANO"), Some("7º"));
        assert_eq!(extractor.extract("QUESTÃO DO 6º ANO"), Some("6º"));
    }

    #[test]
    fn test_no_grade() {
        let extractor = GradeExtractor::new();
        assert_eq!(extractor.extract("Era Vargas"), None);
    }
}
