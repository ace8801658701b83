//! Free-topic extraction for texts that matched nothing in the curriculum.
//!
//! Topics come from named entities and multi-word noun phrases. When
//! neither yields anything, single proper nouns are used instead. Format
//! vocabulary ("mapa", "múltipla escolha") and grade ordinals ("6º ano")
//! never count as topics.

use std::collections::BTreeSet;

use regex_lite::Regex;
use tracing::{debug, warn};

use curriculo_nlp::{Document, PartOfSpeech, title_case};

use crate::vocabulary::TOPIC_BLACKLIST;

const GRADE_ORDINAL: &str = r"^\d+[º°]?\s*ano";
const MIN_TOPIC_CHARS: usize = 3;
const MIN_CHUNK_WORDS: usize = 2;

#[derive(Debug, Clone)]
pub struct TopicExtractor {
    grade_ordinal: Option<Regex>,
    limit: usize,
}

impl TopicExtractor {
    /// Extractor returning at most `limit` topics.
    pub fn new(limit: usize) -> Self {
        let grade_ordinal = match Regex::new(GRADE_ORDINAL) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "Invalid grade ordinal pattern, ordinals will not be filtered");
                None
            }
        };
        Self {
            grade_ordinal,
            limit,
        }
    }

    /// Sorted, deduplicated, title-cased topics.
    pub fn extract(&self, doc: &Document) -> Vec<String> {
        let mut topics = BTreeSet::new();

        for entity in &doc.entities {
            if self.is_topic(&entity.text) {
                topics.insert(title_case(&entity.text));
            }
        }

        for chunk in &doc.noun_chunks {
            let text = chunk.text.trim();
            let Some(root) = doc.root_of(chunk) else {
                continue;
            };
            if text.split_whitespace().count() >= MIN_CHUNK_WORDS
                && root.pos == PartOfSpeech::Noun
                && !root.is_stop
                && self.is_topic(text)
            {
                topics.insert(title_case(text));
            }
        }

        if topics.is_empty() {
            for token in &doc.tokens {
                if token.is_proper_noun()
                    && !token.is_stop
                    && !token.text.chars().all(|c| c.is_ascii_digit())
                    && !is_blacklisted(&token.text.to_lowercase())
                {
                    topics.insert(title_case(&token.text));
                }
            }
        }

        let topics: Vec<String> = topics
            .into_iter()
            .filter(|t| {
                let t = t.trim();
                t.chars().count() >= MIN_TOPIC_CHARS && !t.starts_with(',')
            })
            .take(self.limit)
            .collect();

        debug!(?topics, "Free topics");
        topics
    }

    fn is_topic(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let is_ordinal = self
            .grade_ordinal
            .as_ref()
            .is_some_and(|re| re.is_match(&lower));
        !is_ordinal && !is_blacklisted(&lower)
    }
}

fn is_blacklisted(lower: &str) -> bool {
    TOPIC_BLACKLIST.iter().any(|term| lower.contains(term))
}
