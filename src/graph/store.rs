//! In-memory concept graph store.
//!
//! The graph lives for the process lifetime and is never persisted. Reads
//! that traverse forward edges reinforce them, so lookups are deliberately
//! not idempotent; see [`ConceptGraph::neighbors`].

use crate::graph::types::*;
use crate::slug::slugify;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Strength assigned to a newly created edge.
pub const INITIAL_STRENGTH: f64 = 0.3;
/// Reinforcement applied when an existing edge is re-registered.
pub const REGISTER_REINFORCEMENT: f64 = 0.1;
/// Reinforcement applied to each outgoing edge on a neighbor read.
pub const READ_REINFORCEMENT: f64 = 0.05;
/// Reinforcement applied by an explicit strengthen call.
pub const EXPLICIT_REINFORCEMENT: f64 = 0.15;
/// Upper bound on edge strength.
pub const MAX_STRENGTH: f64 = 1.0;

fn reinforce(strength: f64, amount: f64) -> f64 {
    (strength + amount).min(MAX_STRENGTH)
}

/// Directed, labeled, weighted multigraph over concept nodes.
///
/// Construct one explicitly and pass it by reference; there is no global
/// instance. Edge iteration order is insertion order, which makes path
/// tie-breaking and impact grouping deterministic within a process.
#[derive(Debug, Default)]
pub struct ConceptGraph {
    nodes: HashMap<String, ConceptNode>,
    edges: Vec<ConceptEdge>,
}

impl ConceptGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concept, optionally with relationships and metadata.
    ///
    /// Re-registering an existing concept shallow-merges `metadata` into the
    /// node instead of duplicating it, and leaves `access_count` untouched.
    /// Each relationship target is created as a bare placeholder node when
    /// unknown. A relationship that duplicates an existing
    /// `(from, to, relationship)` triple reinforces that edge rather than
    /// adding a parallel one.
    ///
    /// Returns the slug the concept was registered under. Never fails.
    pub fn register(
        &mut self,
        concept: &str,
        relationships: &[ConceptRelationship],
        metadata: Option<HashMap<String, Value>>,
    ) -> String {
        let id = slugify(concept);

        match self.nodes.get_mut(&id) {
            Some(node) => {
                if let Some(meta) = metadata {
                    node.metadata.extend(meta);
                }
            }
            None => {
                let mut node = ConceptNode::new(id.clone(), concept);
                if let Some(meta) = metadata {
                    node.metadata = meta;
                }
                self.nodes.insert(id.clone(), node);
            }
        }

        for rel in relationships {
            let target_id = slugify(&rel.target);
            self.nodes
                .entry(target_id.clone())
                .or_insert_with(|| ConceptNode::new(target_id.clone(), rel.target.clone()));

            match self.find_edge_mut(&id, &target_id, &rel.relationship) {
                Some(edge) => {
                    edge.strength = reinforce(edge.strength, REGISTER_REINFORCEMENT);
                }
                None => {
                    self.edges.push(ConceptEdge {
                        from: id.clone(),
                        to: target_id,
                        relationship: rel.relationship.clone(),
                        strength: INITIAL_STRENGTH,
                        created: chrono::Utc::now(),
                    });
                }
            }
        }

        id
    }

    /// Look up all outgoing edges of a concept.
    ///
    /// This is a mutating read: the node's `access_count` is incremented by
    /// exactly 1 and every returned edge is reinforced by
    /// [`READ_REINFORCEMENT`], capped at [`MAX_STRENGTH`]. Forward traversal
    /// counts as usage; reverse lookups ([`ConceptGraph::dependents`]) do
    /// not. An unknown concept returns an empty list and mutates nothing.
    pub fn neighbors(&mut self, concept: &str) -> Vec<NeighborEntry> {
        let id = slugify(concept);

        let Some(node) = self.nodes.get_mut(&id) else {
            return Vec::new();
        };
        node.access_count += 1;

        let mut reinforced = Vec::new();
        for edge in self.edges.iter_mut().filter(|e| e.from == id) {
            edge.strength = reinforce(edge.strength, READ_REINFORCEMENT);
            reinforced.push((edge.to.clone(), edge.relationship.clone(), edge.strength));
        }

        debug!(concept = %id, edges = reinforced.len(), "neighbor read reinforced");

        reinforced
            .into_iter()
            .map(|(to, relationship, strength)| NeighborEntry {
                concept: self.display(&to),
                relationship,
                strength,
            })
            .collect()
    }

    /// Reverse lookup: all concepts with an edge pointing at `concept`.
    ///
    /// Read-only; no reinforcement is applied.
    pub fn dependents(&self, concept: &str) -> Vec<DependentEntry> {
        let id = slugify(concept);
        self.edges
            .iter()
            .filter(|e| e.to == id)
            .map(|e| DependentEntry {
                concept: self.display(&e.from),
                relationship: e.relationship.clone(),
                strength: e.strength,
            })
            .collect()
    }

    /// Find a path between two concepts by breadth-first search.
    ///
    /// Traversal is over unweighted edge count; strength is carried along in
    /// the hops but does not influence ordering. Returns `Some(vec![])` when
    /// `from` and `to` resolve to the same node, and `None` when either
    /// endpoint is unknown or no path exists. Equal-length paths are resolved
    /// by edge insertion order.
    pub fn find_path(&self, from: &str, to: &str) -> Option<Vec<PathHop>> {
        let from_id = slugify(from);
        let to_id = slugify(to);

        if !self.nodes.contains_key(&from_id) || !self.nodes.contains_key(&to_id) {
            return None;
        }
        if from_id == to_id {
            return Some(Vec::new());
        }

        // BFS with predecessor edges for path reconstruction.
        let mut queue = VecDeque::from([from_id.clone()]);
        let mut predecessor: HashMap<String, usize> = HashMap::new();

        while let Some(current) = queue.pop_front() {
            for (index, edge) in self.edges.iter().enumerate() {
                if edge.from != current {
                    continue;
                }
                if edge.to == from_id || predecessor.contains_key(&edge.to) {
                    continue;
                }
                predecessor.insert(edge.to.clone(), index);
                if edge.to == to_id {
                    return Some(self.reconstruct_path(&predecessor, &to_id));
                }
                queue.push_back(edge.to.clone());
            }
        }

        None
    }

    fn reconstruct_path(&self, predecessor: &HashMap<String, usize>, to_id: &str) -> Vec<PathHop> {
        let mut hops = Vec::new();
        let mut cursor = to_id.to_string();

        while let Some(&index) = predecessor.get(&cursor) {
            let edge = &self.edges[index];
            hops.push(PathHop {
                from: self.display(&edge.from),
                to: self.display(&edge.to),
                relationship: edge.relationship.clone(),
                strength: edge.strength,
            });
            cursor = edge.from.clone();
        }

        hops.reverse();
        hops
    }

    /// List every concept that would be affected if `concept` changed,
    /// with the relationship types involved.
    pub fn impact_analysis(&self, concept: &str) -> Vec<ImpactEntry> {
        let id = slugify(concept);
        let mut entries: Vec<ImpactEntry> = Vec::new();

        for edge in self.edges.iter().filter(|e| e.to == id) {
            let concept = self.display(&edge.from);
            match entries.iter_mut().find(|entry| entry.concept == concept) {
                Some(entry) => {
                    if !entry.affected_edges.contains(&edge.relationship) {
                        entry.affected_edges.push(edge.relationship.clone());
                    }
                }
                None => entries.push(ImpactEntry {
                    concept,
                    affected_edges: vec![edge.relationship.clone()],
                }),
            }
        }

        entries
    }

    /// All edges of a given relationship type, strongest first.
    pub fn query_by_relationship(&self, relationship: &str) -> Vec<RelationshipEntry> {
        let mut entries: Vec<RelationshipEntry> = self
            .edges
            .iter()
            .filter(|e| e.relationship == relationship)
            .map(|e| RelationshipEntry {
                from: self.display(&e.from),
                to: self.display(&e.to),
                strength: e.strength,
            })
            .collect();

        entries.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        entries
    }

    /// Explicitly strengthen a concept's usage.
    ///
    /// Increments the node's `access_count`; when a relationship type is
    /// given, also reinforces all outgoing edges of that type by
    /// [`EXPLICIT_REINFORCEMENT`], capped. Unknown concepts are a no-op.
    pub fn strengthen(&mut self, concept: &str, relationship: Option<&str>) {
        let id = slugify(concept);

        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        node.access_count += 1;

        if let Some(rel) = relationship {
            for edge in self
                .edges
                .iter_mut()
                .filter(|e| e.from == id && e.relationship == rel)
            {
                edge.strength = reinforce(edge.strength, EXPLICIT_REINFORCEMENT);
            }
        }
    }

    /// Aggregate statistics over the graph.
    pub fn stats(&self) -> GraphStats {
        let avg_strength = if self.edges.is_empty() {
            0.0
        } else {
            self.edges.iter().map(|e| e.strength).sum::<f64>() / self.edges.len() as f64
        };

        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            avg_strength,
        }
    }

    /// Get a node by concept text, if registered.
    pub fn get(&self, concept: &str) -> Option<&ConceptNode> {
        self.nodes.get(&slugify(concept))
    }

    fn find_edge_mut(&mut self, from: &str, to: &str, relationship: &str) -> Option<&mut ConceptEdge> {
        self.edges
            .iter_mut()
            .find(|e| e.from == from && e.to == to && e.relationship == relationship)
    }

    fn display(&self, id: &str) -> String {
        self.nodes
            .get(id)
            .map(|n| n.concept.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
