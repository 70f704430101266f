//! Cache Statistics Module
//!
//! Per-namespace counters for hits, misses, evictions and invalidations.

use serde::Serialize;

// == Namespace Stats ==
/// Performance counters for one namespace.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NamespaceStats {
    /// Number of successful reads
    pub hits: u64,
    /// Number of reads that found nothing or an expired entry
    pub misses: u64,
    /// Number of entries evicted to respect the size bound
    pub evictions: u64,
    /// Number of times the whole namespace was cleared
    pub clears: u64,
    /// Current number of entries
    pub total_entries: usize,
}

impl NamespaceStats {
    /// Creates a new NamespaceStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
