//! Namespaced Store Module
//!
//! Map of lazily created namespace partitions sharing one capacity and
//! default TTL configuration, plus the clear generation of each namespace.

use std::collections::{BTreeMap, HashMap};

use crate::cache::fault::Result;
use crate::cache::{Namespace, NamespaceStats};

// == Namespaced Store ==
/// Generic key-value store partitioned by namespace.
///
/// Namespaces are never declared up front: the first `set` creates one.
/// Each partition is bounded independently by `max_entries`.
#[derive(Debug)]
pub struct NamespacedStore {
    namespaces: HashMap<String, Namespace>,
    /// Number of times each namespace has been cleared. Tracked separately
    /// from `namespaces` so clearing a never-written namespace still counts.
    generations: HashMap<String, u64>,
    /// Per-namespace entry limit
    max_entries: usize,
    /// Default TTL in seconds for writes without an override
    default_ttl: u64,
}

impl NamespacedStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries per namespace
    /// * `default_ttl` - Default TTL in seconds for entries without explicit TTL
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            namespaces: HashMap::new(),
            generations: HashMap::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the value under `key` in `namespace`, if present and unexpired.
    ///
    /// Looking into a namespace that was never written creates nothing.
    pub fn get(&mut self, namespace: &str, key: &str) -> Option<String> {
        self.namespaces.get_mut(namespace)?.get(key)
    }

    // == Set ==
    /// Stores `value` under `key` in `namespace`, creating the namespace if needed.
    pub fn set(&mut self, namespace: &str, key: &str, value: String, ttl: Option<u64>) -> Result<()> {
        let (max_entries, default_ttl) = (self.max_entries, self.default_ttl);
        self.namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| Namespace::new(namespace, max_entries, default_ttl))
            .set(key, value, ttl)
    }

    // == Conditional Set ==
    /// Stores `value` only if `namespace` has not been cleared since
    /// `generation` was read.
    ///
    /// Returns `Ok(false)` when the write was dropped as stale.
    pub fn set_if_generation(
        &mut self,
        namespace: &str,
        key: &str,
        value: String,
        ttl: Option<u64>,
        generation: u64,
    ) -> Result<bool> {
        if self.generation(namespace) != generation {
            return Ok(false);
        }
        self.set(namespace, key, value, ttl).map(|()| true)
    }

    /// Current clear generation of `namespace` (0 if it was never cleared).
    pub fn generation(&self, namespace: &str) -> u64 {
        self.generations.get(namespace).copied().unwrap_or(0)
    }

    // == Delete ==
    /// Removes one key. Returns whether something was removed.
    pub fn delete(&mut self, namespace: &str, key: &str) -> bool {
        self.namespaces
            .get_mut(namespace)
            .map(|ns| ns.delete(key))
            .unwrap_or(false)
    }

    // == Clear Namespace ==
    /// Empties one namespace; it stays usable for later writes.
    ///
    /// Returns the number of entries dropped (0 for an unknown namespace).
    pub fn clear_namespace(&mut self, namespace: &str) -> usize {
        self.bump_generation(namespace);
        self.namespaces
            .get_mut(namespace)
            .map(Namespace::clear)
            .unwrap_or(0)
    }

    // == Clear All ==
    /// Empties every namespace, returning the total number of entries dropped.
    pub fn clear_all(&mut self) -> usize {
        let names: Vec<String> = self.namespaces.keys().cloned().collect();
        for name in &names {
            self.bump_generation(name);
        }
        for (name, generation) in self.generations.iter_mut() {
            if !self.namespaces.contains_key(name) {
                *generation += 1;
            }
        }
        self.namespaces.values_mut().map(Namespace::clear).sum()
    }

    // == Cleanup Expired ==
    /// Sweeps expired entries from every namespace.
    pub fn cleanup_expired(&mut self) -> usize {
        self.namespaces
            .values_mut()
            .map(Namespace::cleanup_expired)
            .sum()
    }

    // == Stats ==
    /// Returns counters for every namespace, ordered by name.
    pub fn stats(&self) -> BTreeMap<String, NamespaceStats> {
        self.namespaces
            .iter()
            .map(|(name, ns)| (name.clone(), ns.stats()))
            .collect()
    }

    /// Total number of entries across namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(Namespace::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.values().all(Namespace::is_empty)
    }

    fn bump_generation(&mut self, namespace: &str) {
        *self.generations.entry(namespace.to_string()).or_insert(0) += 1;
    }
}
