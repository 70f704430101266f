//! Cache fault type.
//!
//! Faults are raised by the store and always recovered by the facade.

use thiserror::Error;

// == Cache Fault Enum ==
/// Failure inside the cache layer.
#[derive(Error, Debug)]
pub enum CacheFault {
    /// Key exceeds the maximum length
    #[error("key exceeds maximum length of {max} bytes ({len} given)")]
    KeyTooLong { len: usize, max: usize },

    /// Serialized value exceeds the maximum size
    #[error("value exceeds maximum size of {max} bytes ({len} given)")]
    ValueTooLarge { len: usize, max: usize },

    /// Namespace is at capacity and no entry could be evicted
    #[error("namespace '{0}' is full and eviction failed")]
    NamespaceFull(String),

    /// Payload could not be encoded or decoded
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, CacheFault>;
