//! Similarity computation between annotated documents.

use std::collections::HashSet;

use crate::document::Document;
use crate::error::{NlpError, Result};

/// Tokens longer than this count as important even when not proper nouns.
const IMPORTANT_TOKEN_CHARS: usize = 6;

/// Bonus added per shared important lemma.
const IMPORTANT_OVERLAP_BONUS: f32 = 0.5;

/// Cosine of the angle between two document vectors, in [-1, 1].
///
/// Vectors from one annotator share a dimension; a mismatch means they came
/// from different models. A zero vector scores 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(NlpError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });
    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / denominator)
}

/// Similarity from shared lemmas, weighted toward proper nouns and long words.
///
/// The base score is the shared-lemma count over the larger lemma set. Each
/// shared important lemma (proper noun or word longer than six characters)
/// multiplies the base by an extra 0.5. Clamped to 1.0.
pub fn lemma_overlap_similarity(a: &Document, b: &Document) -> f32 {
    let lemmas_a = content_lemmas(a);
    let lemmas_b = content_lemmas(b);

    if lemmas_a.is_empty() || lemmas_b.is_empty() {
        return 0.0;
    }

    let overlap = lemmas_a.intersection(&lemmas_b).count();
    let mut score = overlap as f32 / lemmas_a.len().max(lemmas_b.len()) as f32;

    let important_overlap = important_lemmas(a)
        .intersection(&important_lemmas(b))
        .count();
    if important_overlap > 0 {
        score *= 1.0 + important_overlap as f32 * IMPORTANT_OVERLAP_BONUS;
    }

    score.min(1.0)
}

/// Semantic similarity between two documents, clamped to [0, 1].
///
/// Uses vector cosine when both documents carry vectors of the same
/// dimension, lemma overlap otherwise.
pub fn document_similarity(a: &Document, b: &Document) -> f32 {
    if let (Some(va), Some(vb)) = (a.vector.as_deref(), b.vector.as_deref())
        && !va.is_empty()
        && !vb.is_empty()
        && let Ok(similarity) = cosine_similarity(va, vb)
    {
        return similarity.clamp(0.0, 1.0);
    }
    lemma_overlap_similarity(a, b).clamp(0.0, 1.0)
}

fn content_lemmas(doc: &Document) -> HashSet<&str> {
    doc.tokens
        .iter()
        .filter(|t| !t.is_stop && !t.is_punct && t.char_len() > 2)
        .map(|t| t.lemma.as_str())
        .collect()
}

fn important_lemmas(doc: &Document) -> HashSet<&str> {
    doc.tokens
        .iter()
        .filter(|t| !t.is_stop && (t.is_proper_noun() || t.char_len() > IMPORTANT_TOKEN_CHARS))
        .map(|t| t.lemma.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Annotator, HeuristicAnnotator};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(cosine_similarity(&a, &b).is_err());
    }

    #[test]
    fn test_lemma_overlap_matches_plural() {
        let annotator = HeuristicAnnotator::new();
        let a = annotator.annotate("frações");
        let b = annotator.annotate("fração");
        assert_eq!(lemma_overlap_similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_lemma_overlap_important_bonus() {
        let annotator = HeuristicAnnotator::new();
        let a = annotator.annotate("trabalhismo operário");
        let b = annotator.annotate("trabalhismo e política nacional");
        // 1 shared of 3 lemmas, boosted by one long shared word.
        let sim = lemma_overlap_similarity(&a, &b);
        assert!((sim - 0.5).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn test_document_similarity_prefers_vectors() {
        let annotator = HeuristicAnnotator::new();
        let mut a = annotator.annotate("abc");
        let mut b = annotator.annotate("xyz");
        a.vector = Some(vec![1.0, 0.0]);
        b.vector = Some(vec![-1.0, 0.0]);
        assert_eq!(document_similarity(&a, &b), 0.0);

        b.vector = Some(vec![1.0, 0.0]);
        assert!((document_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_documents() {
        let annotator = HeuristicAnnotator::new();
        let a = annotator.annotate("");
        let b = annotator.annotate("vargas");
        assert_eq!(document_similarity(&a, &b), 0.0);
    }
}
