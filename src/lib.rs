//! # mnemo-core
//!
//! A structural memory and analogical retrieval library for AI reasoning
//! agents. It stores concepts and cross-domain problem-solving patterns,
//! retrieves the pattern most analogous to a newly stated problem, and
//! strengthens the retrieval paths that prove useful.
//!
//! ## Core Components
//!
//! - **Graph**: directed, labeled, weighted concept graph with Hebbian
//!   reinforcement on reads
//! - **Library**: file-backed pattern store with seed content and usage
//!   reinforcement
//! - **Extract**: deterministic structural-signature extraction from free
//!   text
//! - **Scoring**: multi-factor similarity between signatures and patterns
//! - **Engine**: the retrieval loop: extract, score, rank, elaborate,
//!   reinforce
//!
//! ## Example
//!
//! ```rust,ignore
//! use mnemo_core::{AbstractionLevel, AnalogyEngine, PatternLibrary};
//!
//! let library = PatternLibrary::open("patterns.json");
//! let mut engine = AnalogyEngine::new(library);
//!
//! let result = engine.synthesize(
//!     "multiple agents need to claim tasks without duplicating work",
//!     None,
//!     AbstractionLevel::Deep,
//!     3,
//! );
//! println!("{}", result.best_analogy.suggested_approach);
//! ```

pub mod engine;
pub mod error;
pub mod extract;
pub mod graph;
pub mod insight;
pub mod library;
pub mod request;
pub mod scoring;
pub mod slug;

// Re-exports for convenience
pub use engine::{Analogy, AnalogyEngine, BestAnalogy, Synthesis, REINFORCE_THRESHOLD};
pub use error::{Error, Result};
pub use extract::{
    extract_structure, ConstraintTag, RelationKind, SignatureRelation, StructuralSignature,
};
pub use graph::{
    ConceptEdge, ConceptGraph, ConceptNode, ConceptRelationship, DependentEntry, GraphStats,
    ImpactEntry, NeighborEntry, PathHop, RelationshipEntry,
};
pub use insight::{suggested_approach, term_mappings, transferable_insights, TermMapping};
pub use library::{
    seed_patterns, LibraryStats, NewPattern, Pattern, PatternFile, PatternLibrary,
    PatternRelationship, PatternUsage,
};
pub use request::{
    handle_analogy, handle_graph, AnalogyRequest, GraphQueryType, GraphRequest, GraphResponse,
};
pub use scoring::{score, AbstractionLevel};
pub use slug::slugify;
