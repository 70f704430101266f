//! Cache Facade Module
//!
//! Typed async handle over the shared namespaced store. Every fault is
//! logged and degraded to a miss or a no-op; callers never see cache errors.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::fault::{CacheFault, Result};
use crate::cache::{
    DistanceKey, HistoryKey, InvalidationPolicy, NamespaceStats, NamespacedStore,
    DISTANCE_NAMESPACE, HISTORY_NAMESPACE,
};
use crate::models::{DistanceResponse, HistoryListResponse};

// == Tracked Reads ==
/// Clear generation of a namespace, captured by a tracked read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Outcome of a tracked read.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Hit(T),
    /// The generation to hand back when populating the missed key
    Miss(Generation),
}

// == Cache Client ==
/// Cloneable handle shared by request handlers through application state.
#[derive(Clone, Debug)]
pub struct CacheClient {
    store: Arc<RwLock<NamespacedStore>>,
    policy: Arc<InvalidationPolicy>,
    /// Explicit TTL for history pages (None = store default)
    history_ttl: Option<u64>,
}

impl CacheClient {
    /// Wraps a store with the distance → history invalidation rule.
    pub fn new(store: NamespacedStore) -> Self {
        Self::with_policy(store, InvalidationPolicy::distance_history())
    }

    pub fn with_policy(store: NamespacedStore, policy: InvalidationPolicy) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            policy: Arc::new(policy),
            history_ttl: None,
        }
    }

    /// Sets the TTL used when caching history pages.
    pub fn with_history_ttl(mut self, ttl: u64) -> Self {
        self.history_ttl = Some(ttl);
        self
    }

    // == Generic Operations ==

    /// Reads and decodes a value. Missing, expired and undecodable entries are all `None`.
    pub async fn get<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> Option<T> {
        let raw = self.store.write().await.get(namespace, key);
        decode(namespace, key, raw)
    }

    /// Like [`get`](Self::get), but a miss carries the namespace generation
    /// seen at read time, for a later [`set_if_current`](Self::set_if_current).
    pub async fn get_tracked<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> Lookup<T> {
        let (raw, generation) = {
            let mut store = self.store.write().await;
            (store.get(namespace, key), Generation(store.generation(namespace)))
        };

        match decode(namespace, key, raw) {
            Some(value) => Lookup::Hit(value),
            None => Lookup::Miss(generation),
        }
    }

    /// Encodes and stores a value. `ttl` overrides the default for this entry only.
    pub async fn set<T: Serialize>(&self, namespace: &str, key: &str, value: &T, ttl: Option<u64>) {
        let result = match encode(value) {
            Ok(raw) => self.store.write().await.set(namespace, key, raw, ttl),
            Err(e) => Err(e),
        };
        log_write_fault(namespace, key, result);
    }

    /// Stores a value unless the namespace was cleared after `generation` was read.
    ///
    /// A value computed from data read before an invalidation is dropped
    /// instead of repopulating the namespace with a stale aggregate.
    pub async fn set_if_current<T: Serialize>(
        &self,
        namespace: &str,
        key: &str,
        value: &T,
        ttl: Option<u64>,
        generation: Generation,
    ) {
        let result = match encode(value) {
            Ok(raw) => self
                .store
                .write()
                .await
                .set_if_generation(namespace, key, raw, ttl, generation.0),
            Err(e) => Err(e),
        };

        match result {
            Ok(true) => {}
            Ok(false) => debug!(namespace, key, "namespace cleared since read, write dropped"),
            Err(e) => warn!(namespace, key, error = %e, "cache write skipped"),
        }
    }

    /// Stores a value, then clears every namespace the policy says depends on
    /// `namespace`, under a single lock acquisition.
    ///
    /// Dependents are cleared even when the write itself faults, because the
    /// underlying data changed regardless of whether it got cached.
    pub async fn set_and_invalidate<T: Serialize>(
        &self,
        namespace: &str,
        key: &str,
        value: &T,
        ttl: Option<u64>,
    ) {
        let encoded = encode(value);
        let mut store = self.store.write().await;

        let result = match encoded {
            Ok(raw) => store.set(namespace, key, raw, ttl),
            Err(e) => Err(e),
        };

        for dependent in self.policy.dependents_of(namespace) {
            let removed = store.clear_namespace(dependent);
            info!(
                written = namespace,
                invalidated = %dependent,
                removed,
                "invalidated dependent namespace"
            );
        }
        drop(store);

        log_write_fault(namespace, key, result);
    }

    /// Removes one key. No-op if absent.
    pub async fn delete(&self, namespace: &str, key: &str) {
        self.store.write().await.delete(namespace, key);
    }

    /// Empties one namespace. No-op if it was never written.
    pub async fn clear_namespace(&self, namespace: &str) -> usize {
        let removed = self.store.write().await.clear_namespace(namespace);
        info!(namespace, removed, "cleared cache namespace");
        removed
    }

    /// Empties every namespace.
    pub async fn clear_all(&self) -> usize {
        let removed = self.store.write().await.clear_all();
        info!(removed, "cleared all cache namespaces");
        removed
    }

    /// Sweeps expired entries from every namespace.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Per-namespace counters.
    pub async fn stats(&self) -> BTreeMap<String, NamespaceStats> {
        self.store.read().await.stats()
    }

    // == Distance ==

    pub async fn get_distance(&self, key: &DistanceKey) -> Option<DistanceResponse> {
        self.get(DISTANCE_NAMESPACE, key.as_str()).await
    }

    /// Caches a fresh distance result with the default TTL and invalidates history.
    pub async fn put_distance(&self, key: &DistanceKey, value: &DistanceResponse) {
        self.set_and_invalidate(DISTANCE_NAMESPACE, key.as_str(), value, None)
            .await;
    }

    // == History ==

    pub async fn get_history(&self, key: HistoryKey) -> Lookup<HistoryListResponse> {
        self.get_tracked(HISTORY_NAMESPACE, &key.to_key()).await
    }

    /// Caches a history page read after the miss that produced `generation`.
    pub async fn put_history(
        &self,
        key: HistoryKey,
        value: &HistoryListResponse,
        generation: Generation,
    ) {
        self.set_if_current(HISTORY_NAMESPACE, &key.to_key(), value, self.history_ttl, generation)
            .await;
    }
}

fn decode<T: DeserializeOwned>(namespace: &str, key: &str, raw: Option<String>) -> Option<T> {
    let Some(raw) = raw else {
        debug!(namespace, key, "cache miss");
        return None;
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(namespace, key, "cache hit");
            Some(value)
        }
        Err(e) => {
            warn!(namespace, key, error = %CacheFault::from(e), "cache read degraded to miss");
            None
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn log_write_fault(namespace: &str, key: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!(namespace, key, error = %e, "cache write skipped");
    }
}
