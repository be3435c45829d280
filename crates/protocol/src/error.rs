//! Error types for the trellis-protocol crate.
//!
//! Engine operations never fail: addressing misses return their input
//! unchanged. Errors only surface when decoding identifiers, checking board
//! invariants, or converting state to and from JSON.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to serialize a protocol type to JSON.
    #[error("failed to serialize to JSON: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    /// A path key contained a segment that is not a non-negative integer.
    #[error("invalid path key {key:?}: segment {segment:?} is not an index")]
    InvalidPathKey {
        /// The full key that failed to decode.
        key: String,
        /// The offending segment.
        segment: String,
    },

    /// A drag identifier did not carry a known `card:` or `col:` prefix.
    #[error("invalid drag id: {0:?}")]
    InvalidDragId(String),

    /// A kanban board violates one of its structural invariants.
    #[error("broken board invariant: {0}")]
    BrokenInvariant(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
