//! The annotation capability and its rule-based implementation.

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::document::{Document, EntityLabel, EntitySpan, NounChunk, PartOfSpeech, Token};
use crate::lexicon::{
    ADJECTIVE_SUFFIXES, CONJUNCTIONS, CONNECTORS, DETERMINERS, LOCATIVE_PREPOSITIONS, PREPOSITIONS,
    PRONOUNS, VERB_SUFFIXES, is_stop_word,
};
use crate::text::fold;

/// Trait for linguistic annotation services.
///
/// Implementations must be deterministic: annotating the same text twice
/// yields the same document.
pub trait Annotator: Send + Sync {
    /// Get the name of this annotator.
    fn name(&self) -> &str;

    /// Whether the underlying model finished loading.
    fn is_ready(&self) -> bool {
        true
    }

    /// Annotate a text.
    fn annotate(&self, text: &str) -> Document;
}

/// Plural endings folded back to the singular, longest first.
const PLURAL_RULES: &[(&str, &str)] = &[
    ("oes", "ao"),
    ("aes", "ao"),
    ("ais", "al"),
    ("eis", "el"),
    ("ois", "ol"),
    ("res", "r"),
    ("zes", "z"),
    ("ns", "m"),
    ("as", "a"),
    ("os", "o"),
    ("es", "e"),
];

/// Rule-based Portuguese annotator.
///
/// Proper nouns come from capitalization, entities from runs of proper
/// nouns, and noun chunks from runs of content words. No word vectors are
/// produced, so similarity falls back to lemma overlap.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAnnotator;

impl HeuristicAnnotator {
    /// Create a new heuristic annotator.
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut sentence_start = true;

        for (start, segment) in text.split_word_bound_indices() {
            if segment.trim().is_empty() {
                continue;
            }

            let is_punct = segment.chars().all(|c| !c.is_alphanumeric());
            let norm = fold(segment);
            let is_stop = !is_punct && is_stop_word(&norm);
            let pos = Self::tag(segment, &norm, is_punct, is_stop, sentence_start);
            let lemma = match pos {
                PartOfSpeech::Noun | PartOfSpeech::Adj => lemmatize(&norm),
                _ => norm.clone(),
            };

            if is_punct {
                sentence_start = matches!(segment, "." | "!" | "?");
            } else {
                sentence_start = false;
            }

            tokens.push(Token {
                text: segment.to_string(),
                norm,
                lemma,
                pos,
                is_stop,
                is_punct,
                start,
                end: start + segment.len(),
            });
        }

        // A capitalized sentence opener directly followed by a proper noun
        // belongs to the same name.
        for i in 0..tokens.len().saturating_sub(1) {
            if tokens[i].pos != PartOfSpeech::Propn
                && !tokens[i].is_stop
                && !tokens[i].is_punct
                && starts_uppercase(&tokens[i].text)
                && tokens[i + 1].pos == PartOfSpeech::Propn
            {
                tokens[i].pos = PartOfSpeech::Propn;
                tokens[i].lemma = tokens[i].norm.clone();
            }
        }

        tokens
    }

    fn tag(
        surface: &str,
        norm: &str,
        is_punct: bool,
        is_stop: bool,
        sentence_start: bool,
    ) -> PartOfSpeech {
        if is_punct {
            return PartOfSpeech::Punct;
        }
        if surface.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return PartOfSpeech::Num;
        }
        if is_stop {
            return if DETERMINERS.contains(&norm) {
                PartOfSpeech::Det
            } else if PREPOSITIONS.contains(&norm) {
                PartOfSpeech::Adp
            } else if CONJUNCTIONS.contains(&norm) {
                PartOfSpeech::Cconj
            } else if PRONOUNS.contains(&norm) {
                PartOfSpeech::Pron
            } else {
                PartOfSpeech::Other
            };
        }

        let all_caps = surface.chars().count() > 1 && surface.chars().all(char::is_uppercase);
        if all_caps || (starts_uppercase(surface) && !sentence_start) {
            return PartOfSpeech::Propn;
        }

        let long_enough = norm.chars().count() > 4;
        if long_enough && VERB_SUFFIXES.iter().any(|s| norm.ends_with(s)) {
            PartOfSpeech::Verb
        } else if long_enough && ADJECTIVE_SUFFIXES.iter().any(|s| norm.ends_with(s)) {
            PartOfSpeech::Adj
        } else {
            PartOfSpeech::Noun
        }
    }

    fn entities(text: &str, tokens: &[Token]) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if tokens[i].pos != PartOfSpeech::Propn {
                i += 1;
                continue;
            }

            let start = i;
            let mut end = i + 1;
            loop {
                if end < tokens.len() && tokens[end].pos == PartOfSpeech::Propn {
                    end += 1;
                } else if end + 1 < tokens.len()
                    && CONNECTORS.contains(&tokens[end].norm.as_str())
                    && tokens[end + 1].pos == PartOfSpeech::Propn
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let label = if start > 0 && LOCATIVE_PREPOSITIONS.contains(&tokens[start - 1].norm.as_str())
            {
                EntityLabel::Loc
            } else {
                EntityLabel::Misc
            };

            spans.push(EntitySpan {
                text: slice(text, tokens, start, end).to_string(),
                label,
                start_token: start,
                end_token: end,
            });
            i = end;
        }

        spans
    }

    fn noun_chunks(text: &str, tokens: &[Token]) -> Vec<NounChunk> {
        let is_content = |t: &Token| {
            matches!(
                t.pos,
                PartOfSpeech::Noun | PartOfSpeech::Propn | PartOfSpeech::Adj | PartOfSpeech::Num
            )
        };

        let mut chunks = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !is_content(&tokens[i]) {
                i += 1;
                continue;
            }

            let start = i;
            let mut end = i + 1;
            loop {
                if end < tokens.len() && is_content(&tokens[end]) {
                    end += 1;
                } else if end + 1 < tokens.len()
                    && CONNECTORS.contains(&tokens[end].norm.as_str())
                    && is_content(&tokens[end + 1])
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let root = (start..end)
                .find(|&k| matches!(tokens[k].pos, PartOfSpeech::Noun | PartOfSpeech::Propn));
            if let Some(root) = root {
                chunks.push(NounChunk {
                    text: slice(text, tokens, start, end).to_string(),
                    start_token: start,
                    end_token: end,
                    root,
                });
            }
            i = end;
        }

        chunks
    }
}

impl Annotator for HeuristicAnnotator {
    fn name(&self) -> &str {
        "heuristic-pt"
    }

    fn annotate(&self, text: &str) -> Document {
        let tokens = Self::tokenize(text);
        let entities = Self::entities(text, &tokens);
        let noun_chunks = Self::noun_chunks(text, &tokens);

        debug!(
            "Annotated {} tokens, {} entities, {} noun chunks",
            tokens.len(),
            entities.len(),
            noun_chunks.len()
        );

        Document {
            text: text.to_string(),
            tokens,
            entities,
            noun_chunks,
            vector: None,
        }
    }
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

fn slice<'a>(text: &'a str, tokens: &[Token], start: usize, end: usize) -> &'a str {
    text.get(tokens[start].start..tokens[end - 1].end).unwrap_or("")
}

/// Reduce a folded noun or adjective to its singular form.
fn lemmatize(norm: &str) -> String {
    if norm.chars().count() <= 3 {
        return norm.to_string();
    }
    for (suffix, replacement) in PLURAL_RULES {
        if let Some(stem) = norm.strip_suffix(suffix) {
            return format!("{stem}{replacement}");
        }
    }
    norm.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_skips_whitespace() {
        let doc = HeuristicAnnotator::new().annotate("Explique a fração 3/4");
        let texts: Vec<_> = doc.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Explique", "a", "fração", "3", "/", "4"]);
        assert_eq!(doc.tokens[2].norm, "fracao");
        assert!(doc.tokens[1].is_stop);
        assert!(doc.tokens[4].is_punct);
    }

    #[test]
    fn test_ordinal_stays_one_token() {
        let doc = HeuristicAnnotator::new().annotate("para o 6º ano");
        assert!(doc.tokens.iter().any(|t| t.text == "6º" && t.pos == PartOfSpeech::Num));
    }

    #[test]
    fn test_plural_lemmas() {
        assert_eq!(lemmatize("fracoes"), "fracao");
        assert_eq!(lemmatize("trabalhadores"), "trabalhador");
        assert_eq!(lemmatize("numeros"), "numero");
        assert_eq!(lemmatize("mar"), "mar");
    }

    #[test]
    fn test_entities_from_proper_noun_runs() {
        let doc = HeuristicAnnotator::new().annotate("Uma questão sobre Napoleão Bonaparte");
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].text, "Napoleão Bonaparte");
        assert_eq!(doc.entities[0].label, EntityLabel::Misc);
    }

    #[test]
    fn test_sentence_opener_joins_following_name() {
        let doc = HeuristicAnnotator::new().annotate("Getúlio Vargas e o trabalhismo");
        assert_eq!(doc.entities[0].text, "Getúlio Vargas");
    }

    #[test]
    fn test_locative_entity() {
        let doc = HeuristicAnnotator::new().annotate("a urbanização em São Paulo");
        assert_eq!(doc.entities[0].text, "São Paulo");
        assert_eq!(doc.entities[0].label, EntityLabel::Loc);
    }

    #[test]
    fn test_noun_chunks_join_connectors() {
        let doc = HeuristicAnnotator::new().annotate("a crise do café e a vida urbana");
        let chunks: Vec<_> = doc.noun_chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(chunks, vec!["crise do café", "vida urbana"]);
        let root = doc.root_of(&doc.noun_chunks[0]).map(|t| t.text.as_str());
        assert_eq!(root, Some("crise"));
    }
}
