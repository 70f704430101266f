//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store and facade against arbitrary operation
//! sequences across several namespaces.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{
    CacheClient, HistoryKey, Lookup, NamespacedStore, DISTANCE_NAMESPACE, HISTORY_NAMESPACE,
};
use crate::models::{HistoryListResponse, PaginationInfo};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_DEFAULT_TTL: u64 = 300;

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,64}"
}

/// Generates cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

/// Picks one of a few namespaces, including the two the service uses
fn namespace_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(DISTANCE_NAMESPACE.to_string()),
        Just(HISTORY_NAMESPACE.to_string()),
        Just("geocode".to_string()),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { ns: String, key: String, value: String },
    Get { ns: String, key: String },
    Delete { ns: String, key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (namespace_strategy(), valid_key_strategy(), valid_value_strategy())
            .prop_map(|(ns, key, value)| CacheOp::Set { ns, key, value }),
        (namespace_strategy(), valid_key_strategy())
            .prop_map(|(ns, key)| CacheOp::Get { ns, key }),
        (namespace_strategy(), valid_key_strategy())
            .prop_map(|(ns, key)| CacheOp::Delete { ns, key }),
    ]
}

fn dedup(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The store agrees with a plain map-of-maps model for any operation
    // sequence that stays under capacity.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);
        let mut model: HashMap<(String, String), String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { ns, key, value } => {
                    store.set(&ns, &key, value.clone(), None).unwrap();
                    model.insert((ns, key), value);
                }
                CacheOp::Get { ns, key } => {
                    let expected = model.get(&(ns.clone(), key.clone())).cloned();
                    prop_assert_eq!(store.get(&ns, &key), expected);
                }
                CacheOp::Delete { ns, key } => {
                    store.delete(&ns, &key);
                    model.remove(&(ns, key));
                }
            }
        }

        prop_assert_eq!(store.len(), model.len());
    }

    // Set followed by an immediate get returns the stored value.
    #[test]
    fn prop_roundtrip_storage(
        ns in namespace_strategy(),
        key in valid_key_strategy(),
        value in valid_value_strategy()
    ) {
        let mut store = NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        store.set(&ns, &key, value.clone(), None).unwrap();

        prop_assert_eq!(store.get(&ns, &key), Some(value));
    }

    // Clearing one namespace leaves every other namespace readable with
    // its original values.
    #[test]
    fn prop_clear_namespace_isolation(
        entries in prop::collection::vec(
            (namespace_strategy(), valid_key_strategy(), valid_value_strategy()),
            1..40
        ),
        cleared in namespace_strategy()
    ) {
        let mut store = NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);
        let mut model: HashMap<(String, String), String> = HashMap::new();

        for (ns, key, value) in entries {
            store.set(&ns, &key, value.clone(), None).unwrap();
            model.insert((ns, key), value);
        }

        store.clear_namespace(&cleared);

        for ((ns, key), value) in model {
            if ns == cleared {
                prop_assert_eq!(store.get(&ns, &key), None);
            } else {
                prop_assert_eq!(store.get(&ns, &key), Some(value));
            }
        }
    }

    // After clear_all nothing is readable anywhere.
    #[test]
    fn prop_clear_all(
        entries in prop::collection::vec(
            (namespace_strategy(), valid_key_strategy(), valid_value_strategy()),
            1..40
        )
    ) {
        let mut store = NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        for (ns, key, value) in &entries {
            store.set(ns, key, value.clone(), None).unwrap();
        }

        store.clear_all();

        for (ns, key, _) in &entries {
            prop_assert_eq!(store.get(ns, key), None);
        }
        prop_assert!(store.is_empty());
    }

    // Overwriting a key returns the new value and keeps a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let mut store = NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        store.set(DISTANCE_NAMESPACE, &key, value1, None).unwrap();
        store.set(DISTANCE_NAMESPACE, &key, value2.clone(), None).unwrap();

        prop_assert_eq!(store.get(DISTANCE_NAMESPACE, &key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // No namespace ever holds more than its own limit.
    #[test]
    fn prop_capacity_per_namespace(
        entries in prop::collection::vec(
            (namespace_strategy(), valid_key_strategy(), valid_value_strategy()),
            1..200
        )
    ) {
        let max_entries = 20;
        let mut store = NamespacedStore::new(max_entries, TEST_DEFAULT_TTL);

        for (ns, key, value) in entries {
            store.set(&ns, &key, value, None).unwrap();
            for (name, stats) in store.stats() {
                prop_assert!(
                    stats.total_entries <= max_entries,
                    "Namespace {} holds {} entries, limit {}",
                    name,
                    stats.total_entries,
                    max_entries
                );
            }
        }
    }

    // At capacity, a new key evicts the least recently written entry even if
    // it was just read.
    #[test]
    fn prop_least_recently_written_eviction(
        initial_keys in prop::collection::vec(valid_key_strategy(), 2..10),
        new_key in valid_key_strategy(),
        new_value in valid_value_strategy()
    ) {
        let unique_keys = dedup(initial_keys);
        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut store = NamespacedStore::new(capacity, TEST_DEFAULT_TTL);

        for key in &unique_keys {
            store.set(HISTORY_NAMESPACE, key, format!("value_{}", key), None).unwrap();
        }

        let oldest_key = unique_keys[0].clone();
        prop_assert!(store.get(HISTORY_NAMESPACE, &oldest_key).is_some());

        store.set(HISTORY_NAMESPACE, &new_key, new_value, None).unwrap();

        prop_assert_eq!(store.len(), capacity);
        prop_assert_eq!(store.get(HISTORY_NAMESPACE, &oldest_key), None);
        prop_assert!(store.get(HISTORY_NAMESPACE, &new_key).is_some());
        for key in unique_keys.iter().skip(1) {
            prop_assert!(store.get(HISTORY_NAMESPACE, key).is_some(), "Key '{}' should remain", key);
        }
    }

    // A distance write through the facade leaves no history page readable.
    #[test]
    fn prop_distance_write_invalidates_history(
        pages in prop::collection::vec((1u32..50, 1u32..=100), 1..20),
        distance_key in valid_key_strategy(),
        km in 0u32..20_000
    ) {
        tokio_test::block_on(async {
            let cache = CacheClient::new(NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL));

            for (page, size) in &pages {
                let key = format!("page:{}:size:{}", page, size);
                cache.set(HISTORY_NAMESPACE, &key, &vec![*page, *size], None).await;
            }

            cache.set_and_invalidate(DISTANCE_NAMESPACE, &distance_key, &km, None).await;

            prop_assert_eq!(cache.get::<u32>(DISTANCE_NAMESPACE, &distance_key).await, Some(km));
            for (page, size) in &pages {
                let key = format!("page:{}:size:{}", page, size);
                prop_assert_eq!(cache.get::<Vec<u32>>(HISTORY_NAMESPACE, &key).await, None);
            }
            Ok(())
        })?;
    }

    // A history page whose miss happened before a distance write is never
    // stored, whatever pages were cached before.
    #[test]
    fn prop_history_populated_across_invalidation_is_dropped(
        pages in prop::collection::vec((1u32..50, 1u32..=100), 1..20),
        distance_key in valid_key_strategy()
    ) {
        tokio_test::block_on(async {
            let cache = CacheClient::new(NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL));

            let mut pending = Vec::new();
            for (page, size) in &pages {
                let key = HistoryKey::new(*page, *size);
                if let Lookup::Miss(generation) = cache.get_history(key).await {
                    pending.push((key, generation));
                }
            }

            cache.set_and_invalidate(DISTANCE_NAMESPACE, &distance_key, &1u32, None).await;

            let stale = HistoryListResponse {
                items: Vec::new(),
                pagination: PaginationInfo::new(0, 1, 10),
            };
            for (key, generation) in pending {
                cache.put_history(key, &stale, generation).await;
                prop_assert!(matches!(cache.get_history(key).await, Lookup::Miss(_)));
            }
            Ok(())
        })?;
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // An entry with a per-call TTL disappears once it elapses while a sibling
    // on the namespace default stays readable.
    #[test]
    fn prop_ttl_override_expires_independently(
        short_key in valid_key_strategy(),
        long_key in valid_key_strategy(),
        value in valid_value_strategy()
    ) {
        prop_assume!(short_key != long_key);
        let mut store = NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        store.set(DISTANCE_NAMESPACE, &short_key, value.clone(), Some(1)).unwrap();
        store.set(DISTANCE_NAMESPACE, &long_key, value.clone(), None).unwrap();

        prop_assert_eq!(store.get(DISTANCE_NAMESPACE, &short_key), Some(value.clone()));

        sleep(Duration::from_millis(1100));

        prop_assert_eq!(store.get(DISTANCE_NAMESPACE, &short_key), None);
        prop_assert_eq!(store.get(DISTANCE_NAMESPACE, &long_key), Some(value));
    }
}

// == Concurrent Operation Correctness ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Concurrent reads through the shared facade only ever observe a value
    // some writer stored in full.
    #[test]
    fn prop_concurrent_reads_see_complete_values(
        operations in prop::collection::vec(cache_op_strategy(), 10..50)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let cache = CacheClient::new(NamespacedStore::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL));

            let written: HashSet<(String, String, String)> = operations
                .iter()
                .filter_map(|op| match op {
                    CacheOp::Set { ns, key, value } => Some((ns.clone(), key.clone(), value.clone())),
                    _ => None,
                })
                .collect();

            let mut handles = vec![];
            for op in operations {
                let cache = cache.clone();
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Set { ns, key, value } => {
                            cache.set(&ns, &key, &value, None).await;
                            None
                        }
                        CacheOp::Get { ns, key } => cache
                            .get::<String>(&ns, &key)
                            .await
                            .map(|value| (ns, key, value)),
                        CacheOp::Delete { ns, key } => {
                            cache.delete(&ns, &key).await;
                            None
                        }
                    }
                }));
            }

            for handle in handles {
                if let Some(observed) = handle.await.expect("Task should not panic") {
                    prop_assert!(written.contains(&observed), "Read a value nobody wrote: {:?}", observed);
                }
            }

            for stats in cache.stats().await.values() {
                prop_assert!(stats.total_entries <= TEST_MAX_ENTRIES);
                let hit_rate = stats.hit_rate();
                prop_assert!((0.0..=1.0).contains(&hit_rate));
            }
            Ok(())
        })?;
    }
}
