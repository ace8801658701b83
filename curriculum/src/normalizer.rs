//! Lexical normalization and key-term weighting.
//!
//! Terms are folded (lowercase, no diacritics), stripped of punctuation and
//! stop words, and filtered against a list of generic curriculum words that
//! appear everywhere and discriminate nothing. Highly specific terms (proper
//! names, named historical processes) carry double weight.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use curriculo_nlp::fold;

/// Weight of a high-value term.
pub const HIGH_VALUE_WEIGHT: f32 = 2.0;

/// Weight of every other significant term.
pub const BASE_WEIGHT: f32 = 1.0;

/// Terms must be longer than this many characters.
const MIN_TERM_CHARS: usize = 2;

/// Articles, prepositions, conjunctions and possessives.
const STOP_WORDS: &[&str] = &[
    "o", "a", "os", "as", "de", "da", "do", "das", "dos", "em", "na", "no", "nas", "nos", "um",
    "uma", "uns", "umas", "ao", "aos", "por", "para", "com", "sem", "e", "ou", "mas", "que",
    "seu", "sua", "seus", "suas",
];

/// Words too common across the curriculum to discriminate.
///
/// "era" is here on purpose: "era JK" and "Era Vargas" must not match on it.
const GENERIC_TERMS: &[&str] = &[
    "historia", "brasil", "mundo", "pais", "periodo", "epoca", "tempo", "ano", "anos",
    "processos", "processo", "questao", "questoes", "aspectos", "aspecto", "caracteristicas",
    "contexto", "situacao", "momento", "fase", "parte", "partes", "elemento", "elementos",
    "forma", "formas", "sobre", "com", "longa", "analise", "dissertativa", "historico",
    "documento", "ideal", "nacao", "moderna", "moderno", "transformacao", "desdobramentos",
    "desdobramento", "nascimento", "metade", "seculo", "primeiros", "primeira", "era",
];

/// Proper names and narrowly scoped terms.
const HIGH_VALUE_TERMS: &[&str] = &[
    "vargas", "varguista", "getulio", "trabalhismo", "trabalhista", "trabalhadores",
    "urbanizacao", "urbana", "urbano", "segregacao", "espacial", "ditadura", "militar", "golpe",
    "autoritario", "guerra", "revolucao", "conflito", "republica", "republicano", "republicana",
    "abolicao", "escravidao", "independencia", "colonial", "colonizacao", "jk", "juscelino",
    "kubitschek", "redemocratizacao", "constituicao", "negros", "indigena", "quilombolas",
    "afrodescendentes", "feminino", "anarquismo", "totalitarismo", "fascismo", "nazismo",
    "holocausto", "onu", "direitos", "humanos",
];

/// Weighted key terms of a text, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyTerms(IndexMap<String, f32>);

impl KeyTerms {
    /// Weight of a term, if present.
    pub fn weight(&self, term: &str) -> Option<f32> {
        self.0.get(term).copied()
    }

    /// Whether the term is present.
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains_key(term)
    }

    /// Sum of all term weights.
    pub fn total_weight(&self) -> f32 {
        self.0.values().sum()
    }

    /// Terms in first-occurrence order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Terms carrying the high-value weight.
    pub fn high_value_terms(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, weight)| **weight >= HIGH_VALUE_WEIGHT)
            .map(|(term, _)| term.as_str())
            .collect()
    }

    /// Terms shared with another set, in this set's order.
    pub fn common_with<'a>(&'a self, other: &KeyTerms) -> Vec<&'a str> {
        self.terms().filter(|t| other.contains(t)).collect()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no term survived normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fold and split a text into words, dropping punctuation and stop words.
fn content_words(text: &str) -> Vec<String> {
    let cleaned: String = fold(text)
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

fn is_significant(word: &str) -> bool {
    word.chars().count() > MIN_TERM_CHARS && !GENERIC_TERMS.contains(&word)
}

/// Significant terms of a text, in order, duplicates kept.
pub fn normalize(text: &str) -> Vec<String> {
    content_words(text)
        .into_iter()
        .filter(|w| is_significant(w))
        .collect()
}

/// Significant terms of a text with their weights.
pub fn key_terms(text: &str) -> KeyTerms {
    let mut terms = IndexMap::new();
    for word in normalize(text) {
        let weight = if HIGH_VALUE_TERMS.contains(&word.as_str()) {
            HIGH_VALUE_WEIGHT
        } else {
            BASE_WEIGHT
        };
        terms.entry(word).or_insert(weight);
    }
    KeyTerms(terms)
}

/// Whether a folded term is on the high-value list.
pub fn is_high_value(term: &str) -> bool {
    HIGH_VALUE_TERMS.contains(&term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_drops_stop_and_generic_words() {
        assert_eq!(
            normalize("O período varguista e suas contradições"),
            vec!["varguista", "contradicoes"]
        );
    }

    #[test]
    fn test_normalize_drops_short_terms_and_punctuation() {
        assert_eq!(normalize("Explique a fração 3/4!"), vec!["explique", "fracao"]);
    }

    #[test]
    fn test_era_is_generic() {
        assert_eq!(normalize("Era Vargas"), vec!["vargas"]);
    }

    #[test]
    fn test_key_term_weights() {
        let terms = key_terms("Getúlio Vargas e a vida urbana");
        assert_eq!(terms.weight("getulio"), Some(HIGH_VALUE_WEIGHT));
        assert_eq!(terms.weight("vargas"), Some(HIGH_VALUE_WEIGHT));
        assert_eq!(terms.weight("vida"), Some(BASE_WEIGHT));
        assert_eq!(terms.weight("urbana"), Some(HIGH_VALUE_WEIGHT));
        assert_eq!(terms.total_weight(), 7.0);
        assert_eq!(terms.high_value_terms(), vec!["getulio", "vargas", "urbana"]);
    }

    #[test]
    fn test_key_terms_deduplicate() {
        let terms = key_terms("guerra e guerra fria");
        assert_eq!(terms.len(), 2);
        assert_eq!(terms.terms().collect::<Vec<_>>(), vec!["guerra", "fria"]);
    }

    #[test]
    fn test_common_with() {
        let a = key_terms("trabalhismo e protagonismo político");
        let b = key_terms("o papel do trabalhismo");
        assert_eq!(a.common_with(&b), vec!["trabalhismo"]);
    }
}
