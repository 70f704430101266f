//! Namespace Module
//!
//! One bounded partition of the cache: key map, write-order tracker and
//! counters, with a default TTL applied to writes that don't override it.

use std::collections::HashMap;

use crate::cache::fault::{CacheFault, Result};
use crate::cache::{current_timestamp_ms, CacheEntry, NamespaceStats, WriteOrder};
use crate::cache::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Namespace ==
/// Bounded key-value partition with TTL expiry and least-recently-written eviction.
#[derive(Debug)]
pub struct Namespace {
    /// Partition name, used in fault messages
    name: String,
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Write recency tracker
    order: WriteOrder,
    /// Performance statistics
    stats: NamespaceStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in seconds for writes without an override
    default_ttl: u64,
}

impl Namespace {
    // == Constructor ==
    /// Creates an empty partition.
    pub fn new(name: impl Into<String>, max_entries: usize, default_ttl: u64) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
            order: WriteOrder::new(),
            stats: NamespaceStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry under `key`.
    ///
    /// `ttl` overrides the default for this entry only. A new key arriving at a
    /// full partition evicts the least recently written entry first.
    pub fn set(&mut self, key: &str, value: String, ttl: Option<u64>) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheFault::KeyTooLong {
                len: key.len(),
                max: MAX_KEY_LENGTH,
            });
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheFault::ValueTooLarge {
                len: value.len(),
                max: MAX_VALUE_SIZE,
            });
        }

        let is_overwrite = self.entries.contains_key(key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.order.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => return Err(CacheFault::NamespaceFull(self.name.clone())),
            }
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.to_string(), entry);
        self.order.record_write(key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// Expired entries are removed on the way out and counted as misses.
    /// Reads leave the eviction order untouched.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
        }
        self.stats.record_miss();
        None
    }

    // == Delete ==
    /// Removes an entry. Returns whether something was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Empties the partition. Counters other than the entry count are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.record_clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Cleanup Expired ==
    /// Removes every expired entry, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> NamespaceStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
            true
        } else {
            false
        }
    }
}
