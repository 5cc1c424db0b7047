//! Type definitions for the pattern library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored structural abstraction of a source domain.
///
/// Patterns are what analogy retrieval ranks: each one captures how an
/// unrelated domain solves a class of problems, so a new problem can be
/// mapped onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Stable slug identifier
    pub id: String,
    /// Domain the pattern was abstracted from, e.g. "restaurant_kitchen"
    pub source_domain: String,
    /// One-sentence structural description of the domain's mechanics
    pub abstract_structure: String,
    /// Structural features, ordered
    pub key_features: Vec<String>,
    /// Problems the domain typically runs into, ordered
    pub common_problems: Vec<String>,
    /// Solutions the domain typically applies, ordered
    pub typical_solutions: Vec<String>,
    /// Relationships to other concepts
    #[serde(default)]
    pub relationships: Vec<PatternRelationship>,
    /// When the pattern was created
    pub created: DateTime<Utc>,
    /// How many times this pattern won retrieval; monotonically increasing
    pub usage_count: u64,
}

/// A relationship entry on a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRelationship {
    /// Relationship label
    pub relationship: String,
    /// Target concept text
    pub target: String,
}

impl PatternRelationship {
    pub fn new(relationship: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            relationship: relationship.into(),
            target: target.into(),
        }
    }
}

/// A pattern as submitted by a caller, before an id is assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPattern {
    pub source_domain: String,
    pub abstract_structure: String,
    pub key_features: Vec<String>,
    pub common_problems: Vec<String>,
    pub typical_solutions: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<PatternRelationship>,
}

impl NewPattern {
    /// Create a new pattern submission for a source domain.
    pub fn new(source_domain: impl Into<String>, abstract_structure: impl Into<String>) -> Self {
        Self {
            source_domain: source_domain.into(),
            abstract_structure: abstract_structure.into(),
            ..Self::default()
        }
    }

    /// Add a key feature.
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.key_features.push(feature.into());
        self
    }

    /// Add a common problem.
    pub fn with_problem(mut self, problem: impl Into<String>) -> Self {
        self.common_problems.push(problem.into());
        self
    }

    /// Add a typical solution.
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.typical_solutions.push(solution.into());
        self
    }
}

/// Usage summary for one pattern, as reported by library stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternUsage {
    pub id: String,
    pub source_domain: String,
    pub usage_count: u64,
}

/// Statistics about the pattern library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryStats {
    /// Total stored patterns
    pub total: usize,
    /// Up to five patterns, most used first
    pub top_used: Vec<PatternUsage>,
    /// Distinct source domains, in storage order
    pub domains: Vec<String>,
}

/// On-disk layout of the persisted library.
///
/// The whole record is rewritten on every mutation; there is no incremental
/// append format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternFile {
    pub patterns: Vec<Pattern>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}
