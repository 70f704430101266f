//! Cache Module
//!
//! Namespaced in-memory cache with per-entry TTL, size-bound eviction and
//! cross-namespace invalidation.

mod client;
mod entry;
mod fault;
mod invalidation;
mod keys;
mod namespace;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use client::{CacheClient, Generation, Lookup};
pub use entry::{current_timestamp_ms, CacheEntry};
pub use fault::CacheFault;
pub use invalidation::InvalidationPolicy;
pub use keys::{DistanceKey, HistoryKey, DISTANCE_NAMESPACE, HISTORY_NAMESPACE};
pub use namespace::Namespace;
pub use order::WriteOrder;
pub use stats::NamespaceStats;
pub use store::NamespacedStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
///
/// Large enough for a distance key built from two maximum-length addresses
/// of 4-byte characters.
pub const MAX_KEY_LENGTH: usize = 2048;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
