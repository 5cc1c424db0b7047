//! Pattern library: durable storage for cross-domain structural patterns.
//!
//! Each pattern abstracts how an unrelated source domain solves a class of
//! problems. The library is the candidate pool for analogy retrieval, and
//! the usage counter on each pattern is the reinforcement signal: patterns
//! that win retrieval with high confidence get strengthened.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mnemo_core::library::{NewPattern, PatternLibrary};
//!
//! let mut library = PatternLibrary::open("patterns.json");
//!
//! let id = library.add(
//!     NewPattern::new("beehive_foraging", "Scouts advertise, workers vote with visits")
//!         .with_feature("Scouts dance to advertise discovered sites"),
//! );
//! library.strengthen(&id);
//! ```

mod seed;
mod store;
mod types;

pub use seed::seed_patterns;
pub use store::PatternLibrary;
pub use types::{
    LibraryStats, NewPattern, Pattern, PatternFile, PatternRelationship, PatternUsage,
};
