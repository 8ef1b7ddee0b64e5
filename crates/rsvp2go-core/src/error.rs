//! Error types for the rsvp2go storage layer.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the key-value backends and the stores built on them.
///
/// A missing record is not an error: lookups return `Ok(None)`.
#[derive(Error, Debug)]
pub enum Error {
    /// Redis command or connection failure.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A record could not be serialized for writing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value exists but does not decode as the expected record.
    #[error("corrupt record at '{key}': {source}")]
    CorruptRecord {
        /// Store key of the undecodable value.
        key: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },

    /// Every generated event id was already taken.
    #[error("no free event id after {0} attempts")]
    IdAllocation(usize),

    /// Failure reported by a backend without a more specific type.
    #[error("storage backend error: {0}")]
    Backend(String),
}
