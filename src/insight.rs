//! Term mapping and insight generation for a matched pattern.
//!
//! Everything here is template-driven: a fixed table of domain-term pairs
//! for source→target mappings, and substring-triggered phrase templates for
//! transferable insights. No text generation happens outside these tables.

use crate::library::Pattern;
use serde::{Deserialize, Serialize};

/// Maximum number of insights returned for one pattern.
const MAX_INSIGHTS: usize = 5;
/// Minimum mappings before generic fallbacks are appended.
const MIN_MAPPINGS: usize = 3;

/// A source-domain term paired with its analogue in the problem domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermMapping {
    /// Term from the pattern's source domain
    pub source_feature: String,
    /// Corresponding term in the stated problem
    pub target_feature: String,
}

impl TermMapping {
    fn new(source_feature: impl Into<String>, target_feature: impl Into<String>) -> Self {
        Self {
            source_feature: source_feature.into(),
            target_feature: target_feature.into(),
        }
    }
}

/// Fixed table of domain-term pairs: terms on the left are looked up in the
/// pattern's text, terms on the right in the problem statement.
const TERM_TABLE: &[(&[&str], &[&str])] = &[
    (
        &["ticket", "order", "letter", "item"],
        &["task", "job", "work item", "request"],
    ),
    (
        &["cook", "chef", "worker", "scout", "clerk", "detector"],
        &["agent", "worker", "service", "process"],
    ),
    (
        &["expediter", "dispatcher", "controller", "hub"],
        &["orchestrator", "coordinator", "scheduler"],
    ),
    (
        &["station", "runway", "route", "trail"],
        &["queue", "resource", "endpoint"],
    ),
    (
        &["pheromone", "marker", "signal"],
        &["metric", "signal", "event"],
    ),
];

/// Insight phrase templates, triggered by substrings of the pattern's
/// solutions and features.
const INSIGHT_TEMPLATES: &[(&str, &str)] = &[
    (
        "pull",
        "Use a pull-based model where workers claim tasks when they have capacity",
    ),
    (
        "queue",
        "Make pending work visible in an explicit queue instead of pushing blindly",
    ),
    (
        "priorit",
        "Add priority lanes so urgent work overtakes routine work",
    ),
    ("batch", "Batch related work to cut per-item overhead"),
    (
        "slot",
        "Schedule exclusive slots for access to the contended resource",
    ),
    (
        "cache",
        "Cache successful responses so repeated problems resolve immediately",
    ),
    (
        "proportion",
        "Scale the response to the strength of the observed signal",
    ),
    (
        "reinforce",
        "Reinforce what works gradually instead of switching all at once",
    ),
    (
        "local decision",
        "Prefer local decisions over global knowledge at each step",
    ),
    (
        "lease",
        "Time-bound every hold so resources return to the pool",
    ),
];

/// Map source-domain terms onto problem-domain terms.
///
/// Walks the fixed table; a row yields a mapping when some source term
/// appears in the pattern's text and some target term appears in the problem
/// statement. Fewer than three hits appends two generic fallback mappings so
/// the caller always has something to anchor the analogy on.
pub fn term_mappings(pattern: &Pattern, problem: &str) -> Vec<TermMapping> {
    let pattern_text = pattern_text(pattern);
    let problem_text = problem.to_lowercase();

    let mut mappings: Vec<TermMapping> = TERM_TABLE
        .iter()
        .filter_map(|(sources, targets)| {
            let source = sources.iter().find(|s| pattern_text.contains(**s))?;
            let target = targets.iter().find(|t| problem_text.contains(**t))?;
            Some(TermMapping::new(*source, *target))
        })
        .collect();

    if mappings.len() < MIN_MAPPINGS {
        mappings.push(TermMapping::new(
            "central coordination point",
            "orchestrator/coordinator",
        ));
        mappings.push(TermMapping::new("worker / unit of work", "task/job"));
    }

    mappings
}

/// Generate transferable insights for a pattern, capped at five.
pub fn transferable_insights(pattern: &Pattern, _problem: &str) -> Vec<String> {
    let haystack = [
        pattern.typical_solutions.join(" "),
        pattern.key_features.join(" "),
    ]
    .join(" ")
    .to_lowercase();

    INSIGHT_TEMPLATES
        .iter()
        .filter(|(trigger, _)| haystack.contains(trigger))
        .take(MAX_INSIGHTS)
        .map(|(_, phrase)| (*phrase).to_string())
        .collect()
}

/// Synthesize a recommended approach from the best-matching pattern.
///
/// Concatenates the pattern's domain, its leading insights (the first plus
/// up to two more), and up to three keyword-triggered elaborations drawn
/// from the raw problem text.
pub fn suggested_approach(pattern: &Pattern, insights: &[String], problem: &str) -> String {
    let mut approach = format!(
        "Borrow from {}: {}.",
        pattern.source_domain, pattern.abstract_structure
    );

    if let Some(first) = insights.first() {
        approach.push_str(&format!(" Start here: {}.", first));
    }
    for insight in insights.iter().skip(1).take(2) {
        approach.push_str(&format!(" Also: {}.", insight));
    }

    let problem_text = problem.to_lowercase();
    let elaborations: [(&[&str], &str); 3] = [
        (
            &["agent", "multiple", "parallel"],
            "Have each agent claim work explicitly so nothing is processed twice",
        ),
        (
            &["depend"],
            "Gate dependent work on completion of its prerequisites",
        ),
        (
            &["priorit", "urgent", "deadline"],
            "Handle priority explicitly so urgent work cannot starve",
        ),
    ];

    for (triggers, elaboration) in elaborations {
        if triggers.iter().any(|t| problem_text.contains(t)) {
            approach.push_str(&format!(" {}.", elaboration));
        }
    }

    approach
}

fn pattern_text(pattern: &Pattern) -> String {
    [
        pattern.source_domain.clone(),
        pattern.abstract_structure.clone(),
        pattern.key_features.join(" "),
        pattern.common_problems.join(" "),
        pattern.typical_solutions.join(" "),
    ]
    .join(" ")
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::seed_patterns;

    fn seed(id: &str) -> Pattern {
        seed_patterns().into_iter().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_mappings_from_term_table() {
        let kitchen = seed("restaurant_kitchen");
        let mappings = term_mappings(
            &kitchen,
            "multiple worker agents need to claim tasks from a shared queue",
        );

        // "order" ↔ "task", "cook" ↔ "agent", "station" ↔ "queue" all hit.
        assert!(mappings
            .iter()
            .any(|m| m.source_feature == "order" && m.target_feature == "task"));
        assert!(mappings.len() >= MIN_MAPPINGS);
    }

    #[test]
    fn test_generic_fallbacks_appended_when_sparse() {
        let immune = seed("immune_response");
        let mappings = term_mappings(&immune, "nothing in common here");

        assert!(mappings
            .iter()
            .any(|m| m.source_feature == "central coordination point"));
        assert!(mappings.iter().any(|m| m.target_feature == "task/job"));
    }

    #[test]
    fn test_insights_trigger_on_solutions() {
        let kitchen = seed("restaurant_kitchen");
        let insights = transferable_insights(&kitchen, "claim tasks without duplicating work");

        assert!(insights.iter().any(|i| i.contains("pull-based")));
        assert!(insights.len() <= MAX_INSIGHTS);
    }

    #[test]
    fn test_insights_capped_at_five() {
        let mut pattern = seed("restaurant_kitchen");
        pattern.typical_solutions = vec![
            "pull queue priority batch slot cache proportion reinforce lease".to_string(),
            "local decision making".to_string(),
        ];

        let insights = transferable_insights(&pattern, "anything");
        assert_eq!(insights.len(), MAX_INSIGHTS);
    }

    #[test]
    fn test_approach_mentions_domain_and_leading_insight() {
        let kitchen = seed("restaurant_kitchen");
        let insights = transferable_insights(&kitchen, "claim tasks");
        let approach = suggested_approach(
            &kitchen,
            &insights,
            "multiple agents need to claim tasks without duplicating work",
        );

        assert!(approach.contains("restaurant_kitchen"));
        assert!(approach.contains("pull-based"));
        // "multiple agents" triggers the claiming elaboration.
        assert!(approach.contains("claim work explicitly"));
    }

    #[test]
    fn test_approach_elaborations_follow_problem_keywords() {
        let postal = seed("postal_sorting");
        let approach = suggested_approach(
            &postal,
            &[],
            "stages depend on earlier stages and urgent batches jump the line",
        );

        assert!(approach.contains("Gate dependent work"));
        assert!(approach.contains("urgent work cannot starve"));
        assert!(!approach.contains("claim work explicitly"));
    }
}
