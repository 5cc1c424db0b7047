//! Concept graph: a directed, labeled, weighted multigraph over concepts.
//!
//! The graph is an in-memory, process-lifetime store for explicit
//! relationship bookkeeping. Retrieval paths that get used grow stronger:
//!
//! - re-registering an edge reinforces it (+0.1)
//! - a neighbor read reinforces every returned edge (+0.05)
//! - an explicit strengthen reinforces one relationship type (+0.15)
//!
//! All reinforcement is capped at 1.0 and nothing ever decays or is deleted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mnemo_core::graph::{ConceptGraph, ConceptRelationship};
//!
//! let mut graph = ConceptGraph::new();
//! graph.register(
//!     "task queue",
//!     &[ConceptRelationship::new("coordinates_with", "worker pool")],
//!     None,
//! );
//!
//! // Mutating read: strengthens the traversed edges.
//! let neighbors = graph.neighbors("task queue");
//! ```

mod store;
mod types;

pub use store::{
    ConceptGraph, EXPLICIT_REINFORCEMENT, INITIAL_STRENGTH, MAX_STRENGTH, READ_REINFORCEMENT,
    REGISTER_REINFORCEMENT,
};
pub use types::{
    ConceptEdge, ConceptNode, ConceptRelationship, DependentEntry, GraphStats, ImpactEntry,
    NeighborEntry, PathHop, RelationshipEntry,
};
