//! Multi-factor similarity scoring between a structural signature and a
//! stored pattern.
//!
//! The score is a sum of three capped sub-scores, normalized to [0, 1]:
//! token overlap, relationship agreement, and constraint agreement. An
//! abstraction-level adjustment is applied last so that `shallow` requests
//! bias toward more matches and `deep` requests toward fewer, more
//! conservative ones.

use crate::extract::{ConstraintTag, RelationKind, StructuralSignature};
use crate::library::Pattern;
use serde::{Deserialize, Serialize};

/// Cap applied to each sub-score.
const MAX_SUBSCORE: f64 = 10.0;
/// Maximum possible raw total, used as the normalization divisor.
const MAX_RAW_SCORE: f64 = 30.0;

const TERM_OVERLAP_WEIGHT: f64 = 2.0;
const RELATION_AGREEMENT_WEIGHT: f64 = 3.0;
const CONSTRAINT_AGREEMENT_WEIGHT: f64 = 2.0;

/// Flat boost added for shallow matching.
const SHALLOW_BOOST: f64 = 0.2;
/// Damping factor applied for deep matching.
const DEEP_DAMPING: f64 = 0.9;

/// How aggressively analogies are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbstractionLevel {
    /// Bias toward more matches: surface similarity is enough.
    Shallow,
    /// Bias toward fewer, structurally sound matches. The default.
    #[default]
    Deep,
}

impl std::fmt::Display for AbstractionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shallow => write!(f, "shallow"),
            Self::Deep => write!(f, "deep"),
        }
    }
}

/// Score a signature against one pattern, yielding a confidence in [0, 1].
pub fn score(
    signature: &StructuralSignature,
    pattern: &Pattern,
    level: AbstractionLevel,
) -> f64 {
    let raw = term_overlap(signature, pattern)
        + relation_agreement(signature, pattern)
        + constraint_agreement(signature, pattern);

    let normalized = raw / MAX_RAW_SCORE;

    match level {
        AbstractionLevel::Shallow => (normalized + SHALLOW_BOOST).min(1.0),
        AbstractionLevel::Deep => normalized * DEEP_DAMPING,
    }
}

/// Token overlap between the signature's key terms and the pattern's
/// features, problems, and solutions.
fn term_overlap(signature: &StructuralSignature, pattern: &Pattern) -> f64 {
    let haystack = [
        pattern.key_features.join(" "),
        pattern.common_problems.join(" "),
        pattern.typical_solutions.join(" "),
    ]
    .join(" ")
    .to_lowercase();

    let hits = signature
        .key_terms
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .count();

    (hits as f64 * TERM_OVERLAP_WEIGHT).min(MAX_SUBSCORE)
}

/// Agreement between detected relationship kinds and the pattern's feature
/// text, via fixed keyword pairs.
fn relation_agreement(signature: &StructuralSignature, pattern: &Pattern) -> f64 {
    let features = pattern.key_features.join(" ").to_lowercase();

    let hits = signature
        .relationships
        .iter()
        .filter(|rel| match rel.kind {
            RelationKind::DependsOn => features.contains("depend"),
            RelationKind::CompetesFor => features.contains("claim"),
            RelationKind::WaitIn => features.contains("queue"),
            RelationKind::FlowsTo | RelationKind::CoordinatesWith => false,
        })
        .count();

    (hits as f64 * RELATION_AGREEMENT_WEIGHT).min(MAX_SUBSCORE)
}

/// Agreement between detected constraints and the pattern's problem list.
fn constraint_agreement(signature: &StructuralSignature, pattern: &Pattern) -> f64 {
    let problems = pattern.common_problems.join(" ").to_lowercase();

    let hits = signature
        .constraints
        .iter()
        .filter(|tag| {
            let probe = match tag {
                ConstraintTag::NoDuplication => "duplicat",
                ConstraintTag::RealTime => "real-time",
                ConstraintTag::Scalability => "scal",
                ConstraintTag::DynamicWorkload => "vary",
                ConstraintTag::FaultTolerance => "fail",
            };
            problems.contains(probe)
        })
        .count();

    (hits as f64 * CONSTRAINT_AGREEMENT_WEIGHT).min(MAX_SUBSCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_structure;
    use crate::library::seed_patterns;

    fn seed(id: &str) -> Pattern {
        seed_patterns().into_iter().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_task_claiming_problem_scores_restaurant_kitchen() {
        let sig = extract_structure("multiple agents need to claim tasks without duplicating work");
        let kitchen = seed("restaurant_kitchen");

        // One relationship agreement (claim) and one constraint agreement
        // (duplication): raw 5 of 30, dampened by the deep factor.
        let confidence = score(&sig, &kitchen, AbstractionLevel::Deep);
        assert!((confidence - 5.0 / 30.0 * 0.9).abs() < 1e-9);
        assert!(confidence > 0.0);
    }

    #[test]
    fn test_unrelated_pattern_scores_zero() {
        let sig = extract_structure("multiple agents need to claim tasks without duplicating work");
        let postal = seed("postal_sorting");
        assert_eq!(score(&sig, &postal, AbstractionLevel::Deep), 0.0);
    }

    #[test]
    fn test_shallow_never_below_deep() {
        let sig = extract_structure(
            "workers must claim queued jobs, depend on a scheduler, and avoid duplicate runs",
        );
        for pattern in seed_patterns() {
            let shallow = score(&sig, &pattern, AbstractionLevel::Shallow);
            let deep = score(&sig, &pattern, AbstractionLevel::Deep);
            assert!(shallow >= deep, "pattern {}", pattern.id);
        }
    }

    #[test]
    fn test_shallow_boost_is_capped_at_one() {
        let sig = StructuralSignature::default();
        let pattern = seed("ant_colony");
        let shallow = score(&sig, &pattern, AbstractionLevel::Shallow);
        assert!((shallow - 0.2).abs() < 1e-9);
        assert!(shallow <= 1.0);
    }

    #[test]
    fn test_term_overlap_is_capped() {
        let mut pattern = seed("restaurant_kitchen");
        pattern.key_features = vec![
            "alpha bravo charlie delta echo foxtrot golf hotel india juliet".to_string(),
        ];

        let sig = StructuralSignature {
            key_terms: vec![
                "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            relationships: Vec::new(),
            constraints: Vec::new(),
        };

        // Eight hits at weight 2 would be 16; the cap holds it at 10.
        assert!((term_overlap(&sig, &pattern) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let sig = extract_structure(
            "agents need queues, workers must claim tasks, jobs depend on inputs, \
             handle failures, avoid duplicates, scale to millions in real-time",
        );
        for pattern in seed_patterns() {
            for level in [AbstractionLevel::Shallow, AbstractionLevel::Deep] {
                let s = score(&sig, &pattern, level);
                assert!((0.0..=1.0).contains(&s), "pattern {} level {}", pattern.id, level);
            }
        }
    }
}
