//! Structural signature extraction from free-text problem statements.
//!
//! Extraction is deterministic pattern matching over surface text, not
//! language understanding. It analyzes:
//! - Verb/noun co-occurrence templates (key terms)
//! - Relationship keyword families (depends_on, flows_to, ...)
//! - Constraint keyword families (no_duplication, real_time, ...)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum length for a captured key term.
const MIN_TERM_LEN: usize = 4;

/// Short function words that are never useful relationship endpoints.
const STOPWORDS: &[&str] = &["the", "and", "are", "for", "not", "all", "any", "our"];

/// Kind of structural relationship detected in a problem statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// One part cannot proceed without another
    DependsOn,
    /// Information or work moves from one part to another
    FlowsTo,
    /// Parts contend for a shared resource
    CompetesFor,
    /// Parts actively align their behavior
    CoordinatesWith,
    /// Work sits in a holding area until handled
    WaitIn,
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DependsOn => write!(f, "depends_on"),
            Self::FlowsTo => write!(f, "flows_to"),
            Self::CompetesFor => write!(f, "competes_for"),
            Self::CoordinatesWith => write!(f, "coordinates_with"),
            Self::WaitIn => write!(f, "wait_in"),
        }
    }
}

/// Constraint tag detected in a problem statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintTag {
    /// Work must not be done twice
    NoDuplication,
    /// Results are needed immediately
    RealTime,
    /// Volume can grow far beyond current size
    Scalability,
    /// Load varies unpredictably
    DynamicWorkload,
    /// Parts can fail and the whole must survive
    FaultTolerance,
}

impl std::fmt::Display for ConstraintTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDuplication => write!(f, "no_duplication"),
            Self::RealTime => write!(f, "real_time"),
            Self::Scalability => write!(f, "scalability"),
            Self::DynamicWorkload => write!(f, "dynamic_workload"),
            Self::FaultTolerance => write!(f, "fault_tolerance"),
        }
    }
}

/// A detected relationship between two loosely identified endpoints.
///
/// Endpoints come from the words adjacent to the first trigger keyword when
/// those are usable, generic placeholders otherwise; only `kind` carries
/// scoring weight downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRelation {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

/// Normalized structural signature of a problem statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralSignature {
    /// Deduplicated key terms, in order of first appearance
    pub key_terms: Vec<String>,
    /// At most one relation per keyword family
    pub relationships: Vec<SignatureRelation>,
    /// At most one tag per constraint family
    pub constraints: Vec<ConstraintTag>,
}

// Key-term templates: a word next to a modal or a managing verb.
static TERM_BEFORE_MODAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]+)\s+(?:need|needs|must|should|can)\b").expect("invalid regex")
});

static TERM_AFTER_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:manage|manages|managing|handle|handles|handling|process|processes|processing)\s+([a-z]+)\b")
        .expect("invalid regex")
});

static TERM_BEFORE_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]+)\s+(?:depend|depends|wait|waits|run|runs)\b")
        .expect("invalid regex")
});

// Relationship keyword families. Each family contributes at most one
// relation regardless of how often it occurs.
static DEPENDS_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:depend\w*|requir\w*|wait(?:s|ing)?\s+for)\b").expect("invalid regex")
});

static FLOWS_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:communicat\w*|shar(?:e|es|ed|ing)|send(?:s|ing)?|sent)\b")
        .expect("invalid regex")
});

static COMPETES_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:compet\w*|claim\w*|acquir\w*)\b").expect("invalid regex")
});

static COORDINATES_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:coordinat\w*|organiz\w*|synchroniz\w*)\b").expect("invalid regex")
});

static WAITS_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:queue\w*|waiting|pending)\b").expect("invalid regex")
});

// Constraint keyword families.
static NO_DUPLICATION_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:duplicat\w*|exactly\s+once|only\s+once|idempotent\w*)\b")
        .expect("invalid regex")
});

static REAL_TIME_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:real[-\s]?time|immediate\w*|instant\w*|low[-\s]latency)\b")
        .expect("invalid regex")
});

static SCALABILITY_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:scal\w*|thousands?|millions?|high[-\s]volume)\b")
        .expect("invalid regex")
});

static DYNAMIC_WORKLOAD_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:dynamic\w*|var(?:y|ies|ying|iable)|fluctuat\w*|unpredictab\w*|bursty)\b")
        .expect("invalid regex")
});

static FAULT_TOLERANCE_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fail\w*|crash\w*|fault\w*|recover\w*|resilien\w*)\b")
        .expect("invalid regex")
});

/// Extract the structural signature of a problem statement.
///
/// Deterministic and stateless: the same text always yields the same
/// signature, and nothing is learned or stored.
pub fn extract_structure(text: &str) -> StructuralSignature {
    StructuralSignature {
        key_terms: extract_key_terms(text),
        relationships: extract_relationships(text),
        constraints: extract_constraints(text),
    }
}

fn extract_key_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for regex in [&*TERM_BEFORE_MODAL, &*TERM_AFTER_VERB, &*TERM_BEFORE_VERB] {
        for capture in regex.captures_iter(text) {
            let term = capture[1].to_lowercase();
            if term.len() >= MIN_TERM_LEN && !terms.contains(&term) {
                terms.push(term);
            }
        }
    }

    terms
}

fn extract_relationships(text: &str) -> Vec<SignatureRelation> {
    let families: [(&Regex, RelationKind); 5] = [
        (&DEPENDS_FAMILY, RelationKind::DependsOn),
        (&FLOWS_FAMILY, RelationKind::FlowsTo),
        (&COMPETES_FAMILY, RelationKind::CompetesFor),
        (&COORDINATES_FAMILY, RelationKind::CoordinatesWith),
        (&WAITS_FAMILY, RelationKind::WaitIn),
    ];

    families
        .into_iter()
        .filter_map(|(regex, kind)| {
            regex.find(text).map(|hit| {
                let (from, to) = endpoint_words(text, hit.start(), hit.end());
                SignatureRelation { from, to, kind }
            })
        })
        .collect()
}

fn extract_constraints(text: &str) -> Vec<ConstraintTag> {
    let families: [(&Regex, ConstraintTag); 5] = [
        (&NO_DUPLICATION_FAMILY, ConstraintTag::NoDuplication),
        (&REAL_TIME_FAMILY, ConstraintTag::RealTime),
        (&SCALABILITY_FAMILY, ConstraintTag::Scalability),
        (&DYNAMIC_WORKLOAD_FAMILY, ConstraintTag::DynamicWorkload),
        (&FAULT_TOLERANCE_FAMILY, ConstraintTag::FaultTolerance),
    ];

    families
        .into_iter()
        .filter(|(regex, _)| regex.is_match(text))
        .map(|(_, tag)| tag)
        .collect()
}

/// Pick the words adjacent to a keyword hit as relationship endpoints,
/// falling back to generic placeholders when the neighbors are too short or
/// are function words.
fn endpoint_words(text: &str, start: usize, end: usize) -> (String, String) {
    let before = text[..start]
        .split_whitespace()
        .last()
        .map(normalize_endpoint)
        .filter(|w| is_usable_endpoint(w));
    let after = text[end..]
        .split_whitespace()
        .next()
        .map(normalize_endpoint)
        .filter(|w| is_usable_endpoint(w));

    (
        before.unwrap_or_else(|| "component".to_string()),
        after.unwrap_or_else(|| "resource".to_string()),
    )
}

fn normalize_endpoint(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn is_usable_endpoint(word: &str) -> bool {
    word.len() >= 3 && !STOPWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_terms_from_modal_template() {
        let sig = extract_structure("multiple agents need to claim tasks without duplicating work");
        assert_eq!(sig.key_terms, vec!["agents"]);
    }

    #[test]
    fn test_key_terms_minimum_length() {
        // "it" is captured by the modal template but is below the length floor.
        let sig = extract_structure("it must handle requests quickly");
        assert_eq!(sig.key_terms, vec!["requests"]);
    }

    #[test]
    fn test_key_terms_are_deduplicated() {
        let sig = extract_structure("workers must stop and workers should restart");
        assert_eq!(sig.key_terms, vec!["workers"]);
    }

    #[test]
    fn test_relationship_families_one_tag_each() {
        let sig = extract_structure(
            "services compete for slots, claim leases, and acquire locks constantly",
        );
        let kinds: Vec<RelationKind> = sig.relationships.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RelationKind::CompetesFor]);
    }

    #[test]
    fn test_all_relationship_families() {
        let sig = extract_structure(
            "stages depend on inputs, send results downstream, compete for memory, \
             coordinate checkpoints, and leave pending work queued",
        );
        let kinds: Vec<RelationKind> = sig.relationships.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RelationKind::DependsOn,
                RelationKind::FlowsTo,
                RelationKind::CompetesFor,
                RelationKind::CoordinatesWith,
                RelationKind::WaitIn,
            ]
        );
    }

    #[test]
    fn test_relationship_endpoints_from_adjacent_words() {
        let sig = extract_structure("billing depends on database");
        assert_eq!(sig.relationships.len(), 1);
        assert_eq!(sig.relationships[0].from, "billing");
        // "on" is too short to be an endpoint, so the placeholder is used.
        assert_eq!(sig.relationships[0].to, "resource");
    }

    #[test]
    fn test_relationship_endpoint_placeholders() {
        let sig = extract_structure("claim it");
        assert_eq!(sig.relationships[0].from, "component");
        assert_eq!(sig.relationships[0].to, "resource");
    }

    #[test]
    fn test_constraint_families() {
        let sig = extract_structure(
            "must process events in real-time, scale to millions, survive crashes, \
             absorb unpredictable load, and never duplicate a delivery",
        );
        assert_eq!(
            sig.constraints,
            vec![
                ConstraintTag::NoDuplication,
                ConstraintTag::RealTime,
                ConstraintTag::Scalability,
                ConstraintTag::DynamicWorkload,
                ConstraintTag::FaultTolerance,
            ]
        );
    }

    #[test]
    fn test_constraint_families_fire_once() {
        let sig = extract_structure("duplicate entries and duplicated deliveries and duplication");
        assert_eq!(sig.constraints, vec![ConstraintTag::NoDuplication]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "workers must coordinate and share state while waiting for slots";
        assert_eq!(extract_structure(text), extract_structure(text));
    }

    #[test]
    fn test_empty_text_yields_empty_signature() {
        assert_eq!(extract_structure(""), StructuralSignature::default());
    }
}
