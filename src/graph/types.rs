//! Type definitions for the concept graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A concept node in the graph.
///
/// Nodes are keyed by a deterministic slug of their display text, so the
/// same concept registered twice resolves to the same node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptNode {
    /// Stable slug identifier derived from `concept`
    pub id: String,
    /// Original display text
    pub concept: String,
    /// When the node was first registered
    pub created: DateTime<Utc>,
    /// How many times this node has been read or explicitly strengthened
    pub access_count: u64,
    /// Open key/value metadata, shallow-merged on re-registration
    pub metadata: HashMap<String, Value>,
}

impl ConceptNode {
    /// Create a bare node for the given concept text.
    pub fn new(id: impl Into<String>, concept: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            concept: concept.into(),
            created: Utc::now(),
            access_count: 0,
            metadata: HashMap::new(),
        }
    }
}

/// A directed, labeled, weighted edge between two concepts.
///
/// Edges are keyed by the `(from, to, relationship)` triple. Registering the
/// same triple again reinforces the existing edge instead of duplicating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptEdge {
    /// Slug of the source node
    pub from: String,
    /// Slug of the target node
    pub to: String,
    /// Relationship label, e.g. "depends_on"
    pub relationship: String,
    /// Strength in [0, 1]; monotonically non-decreasing
    pub strength: f64,
    /// When the edge was first created
    pub created: DateTime<Utc>,
}

/// A relationship declared when registering a concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRelationship {
    /// Relationship label
    pub relationship: String,
    /// Display text of the target concept
    pub target: String,
}

impl ConceptRelationship {
    pub fn new(relationship: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            relationship: relationship.into(),
            target: target.into(),
        }
    }
}

/// An outgoing edge as returned by a neighbor lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborEntry {
    /// Display text of the neighboring concept
    pub concept: String,
    /// Relationship label on the edge
    pub relationship: String,
    /// Edge strength after the read reinforcement was applied
    pub strength: f64,
}

/// An incoming edge as returned by a dependents lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependentEntry {
    /// Display text of the depending concept
    pub concept: String,
    /// Relationship label on the edge
    pub relationship: String,
    /// Edge strength at read time
    pub strength: f64,
}

/// One hop along a path found by breadth-first search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathHop {
    /// Display text of the hop's source concept
    pub from: String,
    /// Display text of the hop's target concept
    pub to: String,
    /// Relationship label on the traversed edge
    pub relationship: String,
    /// Edge strength at traversal time
    pub strength: f64,
}

/// A node that would be affected if a given concept changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEntry {
    /// Display text of the affected concept
    pub concept: String,
    /// Relationship types pointing at the changed concept
    pub affected_edges: Vec<String>,
}

/// An edge match from a relationship-type query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEntry {
    /// Display text of the source concept
    pub from: String,
    /// Display text of the target concept
    pub to: String,
    /// Edge strength at read time
    pub strength: f64,
}

/// Statistics about the concept graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total registered nodes
    pub node_count: usize,
    /// Total edges
    pub edge_count: usize,
    /// Mean edge strength, 0.0 for an edgeless graph
    pub avg_strength: f64,
}
