//! Error types for mnemo-core.

use thiserror::Error;

/// Result type alias using mnemo-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during memory operations.
///
/// Only `Validation` propagates to external callers: storage problems are
/// recovered locally (seed fallback on read, logged-and-ignored on write)
/// and lookup misses are represented as empty results in the response
/// payloads, never as errors.
#[derive(Error, Debug)]
pub enum Error {
    /// A request record failed validation. `details` enumerates every
    /// violation found, not just the first.
    #[error("Invalid request: {}", details.join("; "))]
    Validation { details: Vec<String> },

    /// Pattern store I/O error
    #[error("Pattern storage error: {0}")]
    PatternStorage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error from a list of violations.
    pub fn validation(details: Vec<String>) -> Self {
        Self::Validation { details }
    }

    /// Create a pattern storage error.
    pub fn pattern_storage(message: impl Into<String>) -> Self {
        Self::PatternStorage(message.into())
    }
}
