//! Thresholds, confidence formulas and the weighted-overlap rule.
//!
//! These values decide match outcomes on real curriculum data and are kept
//! as named constants rather than configuration.

use crate::normalizer::{HIGH_VALUE_WEIGHT, KeyTerms};

/// Global search accepts a best score strictly above this.
pub const GLOBAL_THRESHOLD: f32 = 0.20;

/// Scoped unit/object search accepts a lexical score strictly above this.
pub const SCOPED_THRESHOLD: f32 = 0.15;

/// Semantic fallback of scoped search accepts a similarity above this.
pub const SEMANTIC_THRESHOLD: f32 = 0.35;

/// Any-grade unit search accepts a similarity above this.
pub const ANY_GRADE_SEMANTIC_THRESHOLD: f32 = 0.30;

/// Lexical confidence: `min(cap, base + score * slope)`.
pub const LEXICAL_CONFIDENCE_BASE: f32 = 0.55;
pub const LEXICAL_CONFIDENCE_SLOPE: f32 = 0.30;
pub const LEXICAL_CONFIDENCE_CAP: f32 = 0.85;

/// Semantic confidence: `min(cap, base + similarity * slope)`.
pub const SEMANTIC_CONFIDENCE_BASE: f32 = 0.50;
pub const SEMANTIC_CONFIDENCE_SLOPE: f32 = 0.30;
pub const SEMANTIC_CONFIDENCE_CAP: f32 = 0.80;

/// Subject and grade confidence of a global hit.
pub const GLOBAL_SUBJECT_GRADE_CONFIDENCE: f32 = 0.85;

/// Skill confidence of a global hit whose object has skills.
pub const GLOBAL_SKILL_CONFIDENCE: f32 = 0.75;

/// Skill chosen by word overlap among several.
pub const SKILL_OVERLAP_CONFIDENCE: f32 = 0.75;

/// First (or only) skill of the object.
pub const SINGLE_SKILL_CONFIDENCE: f32 = 0.70;

/// Object skill found under the same unit in another grade.
pub const ANY_GRADE_SKILL_CONFIDENCE: f32 = 0.65;

/// First skill of the unit found in another grade.
pub const ANY_GRADE_UNIT_SKILL_CONFIDENCE: f32 = 0.60;

/// Global bonus for two or more shared high-value terms.
pub const GLOBAL_HIGH_VALUE_TWO: f32 = 3.0;

/// Global bonus for one shared high-value term.
pub const GLOBAL_HIGH_VALUE_ONE: f32 = 2.5;

/// Global bonus when the best variant came from synonym expansion.
pub const GLOBAL_VARIANT_BONUS: f32 = 1.5;

/// Scoped bonus tiers for 3+, 2 and 1 shared high-value terms.
pub const SCOPED_HIGH_VALUE_THREE: f32 = 2.0;
pub const SCOPED_HIGH_VALUE_TWO: f32 = 1.7;
pub const SCOPED_HIGH_VALUE_ONE: f32 = 1.4;

/// Scoped bonus for 3+ and 2 shared terms of any weight.
pub const SCOPED_COMMON_THREE: f32 = 1.3;
pub const SCOPED_COMMON_TWO: f32 = 1.2;

/// Scoped bonus when the variant came from synonym expansion.
pub const SCOPED_VARIANT_BONUS: f32 = 1.3;

/// Which bonus tiers to apply on top of the base overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusScheme {
    /// Two high-value tiers and the larger variant bonus.
    Global,
    /// Three high-value tiers, a common-count tier and the smaller variant bonus.
    Scoped,
}

/// Weighted key-term overlap of a query variant against a candidate.
///
/// The base is the query weight of shared terms over the candidate's total
/// weight (at least 1.0). Bonuses multiply in order: high-value tier,
/// common-count tier (scoped only), expansion variant.
pub fn weighted_overlap(
    query: &KeyTerms,
    candidate: &KeyTerms,
    from_expansion: bool,
    scheme: BonusScheme,
) -> f32 {
    let common = query.common_with(candidate);
    if common.is_empty() {
        return 0.0;
    }

    let shared_weight: f32 = common.iter().filter_map(|t| query.weight(t)).sum();
    let mut score = shared_weight / candidate.total_weight().max(1.0);

    let high_value = common
        .iter()
        .filter(|t| query.weight(t).unwrap_or_default() >= HIGH_VALUE_WEIGHT)
        .count();

    match scheme {
        BonusScheme::Global => {
            if high_value >= 2 {
                score *= GLOBAL_HIGH_VALUE_TWO;
            } else if high_value >= 1 {
                score *= GLOBAL_HIGH_VALUE_ONE;
            }
            if from_expansion {
                score *= GLOBAL_VARIANT_BONUS;
            }
        }
        BonusScheme::Scoped => {
            if high_value >= 3 {
                score *= SCOPED_HIGH_VALUE_THREE;
            } else if high_value >= 2 {
                score *= SCOPED_HIGH_VALUE_TWO;
            } else if high_value >= 1 {
                score *= SCOPED_HIGH_VALUE_ONE;
            }
            if common.len() >= 3 {
                score *= SCOPED_COMMON_THREE;
            } else if common.len() >= 2 {
                score *= SCOPED_COMMON_TWO;
            }
            if from_expansion {
                score *= SCOPED_VARIANT_BONUS;
            }
        }
    }

    score
}

/// Confidence of a lexical match.
pub fn lexical_confidence(score: f32) -> f32 {
    (LEXICAL_CONFIDENCE_BASE + score * LEXICAL_CONFIDENCE_SLOPE).min(LEXICAL_CONFIDENCE_CAP)
}

/// Confidence of a semantic match.
pub fn semantic_confidence(similarity: f32) -> f32 {
    (SEMANTIC_CONFIDENCE_BASE + similarity * SEMANTIC_CONFIDENCE_SLOPE)
        .min(SEMANTIC_CONFIDENCE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::key_terms;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_no_common_terms_scores_zero() {
        let q = key_terms("frações");
        let c = key_terms("O período varguista");
        assert_eq!(weighted_overlap(&q, &c, false, BonusScheme::Global), 0.0);
        assert_eq!(weighted_overlap(&q, &c, true, BonusScheme::Scoped), 0.0);
    }

    #[test]
    fn test_global_variant_bonus() {
        // varguista (2.0) over varguista + contradicoes (3.0), ×2.5, ×1.5.
        let q = key_terms("período varguista");
        let c = key_terms("O período varguista e suas contradições");
        let score = weighted_overlap(&q, &c, true, BonusScheme::Global);
        assert!(approx(score, 2.5), "got {score}");
        let score = weighted_overlap(&q, &c, false, BonusScheme::Global);
        assert!(approx(score, 2.0 / 3.0 * 2.5), "got {score}");
    }

    #[test]
    fn test_scoped_tiers() {
        let q = key_terms("trabalhismo urbano vida");
        let c = key_terms("trabalhismo urbano vida cotidiana");
        // 5.0 / 6.0, two high-value (×1.7), three common (×1.3).
        let score = weighted_overlap(&q, &c, false, BonusScheme::Scoped);
        assert!(approx(score, 5.0 / 6.0 * 1.7 * 1.3), "got {score}");
    }

    #[test]
    fn test_monotonic_in_high_value_terms() {
        let candidate = key_terms("guerra fascismo nazismo holocausto");
        let queries = [
            "alfa beta gama delta",
            "guerra beta gama delta",
            "guerra fascismo gama delta",
            "guerra fascismo nazismo delta",
            "guerra fascismo nazismo holocausto",
        ];
        for scheme in [BonusScheme::Global, BonusScheme::Scoped] {
            let scores: Vec<f32> = queries
                .iter()
                .map(|q| weighted_overlap(&key_terms(q), &candidate, false, scheme))
                .collect();
            for pair in scores.windows(2) {
                assert!(pair[0] <= pair[1], "{scheme:?}: {scores:?}");
            }
        }
    }

    #[test]
    fn test_confidence_caps() {
        assert!(approx(lexical_confidence(0.0), 0.55));
        assert!(approx(lexical_confidence(0.5), 0.70));
        assert!(approx(lexical_confidence(10.0), 0.85));
        assert!(approx(semantic_confidence(0.5), 0.65));
        assert!(approx(semantic_confidence(1.0), 0.80));
    }
}
