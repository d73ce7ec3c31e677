//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the cache's structural guarantees over
//! arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use serde_json::json;

use crate::cache::TtlCache;

// == Test Configuration ==
const TEST_DEFAULT_TTL: u64 = 300;

// == Strategies ==
/// Generates cache keys in the shape the memoization layer derives
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}:page=[0-9]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Evict { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Evict { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations the entry count never exceeds
    // capacity once a mutating call has completed.
    #[test]
    fn prop_capacity_bound(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
    ) {
        let mut cache = TtlCache::new(capacity, TEST_DEFAULT_TTL);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, json!(value), None),
                CacheOp::Get { key } => { cache.get(&key); }
                CacheOp::Evict { key } => cache.evict(&key),
            }
            prop_assert!(cache.len() <= capacity, "Capacity exceeded");
        }
    }

    // Storing then retrieving a pair (well before expiry) returns the
    // stored value unchanged.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut cache = TtlCache::new(100, TEST_DEFAULT_TTL);

        cache.set(key.clone(), json!(value), None);

        prop_assert_eq!(cache.get(&key), Some(json!(value)), "Round-trip value mismatch");
    }

    // Storing V1 then V2 under the same key yields V2, with a single
    // entry and no eviction.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        let mut cache = TtlCache::new(100, TEST_DEFAULT_TTL);

        cache.set(key.clone(), json!(v1), None);
        cache.set(key.clone(), json!(v2), None);

        prop_assert_eq!(cache.get(&key), Some(json!(v2)));
        prop_assert_eq!(cache.len(), 1);
        prop_assert_eq!(cache.stats().evictions, 0);
    }

    // Filling a cache of capacity N with N+1 distinct keys (no reads in
    // between) evicts exactly the first key; all later keys survive.
    #[test]
    fn prop_lru_evicts_first_inserted(capacity in 1usize..10) {
        let mut cache = TtlCache::new(capacity, TEST_DEFAULT_TTL);

        let keys: Vec<String> = (0..=capacity).map(|i| format!("key-{}", i)).collect();
        for (i, key) in keys.iter().enumerate() {
            cache.set(key.clone(), json!(i), None);
        }

        prop_assert_eq!(cache.get(&keys[0]), None, "First key should be evicted");
        for (i, key) in keys.iter().enumerate().skip(1) {
            prop_assert_eq!(cache.get(key), Some(json!(i)), "Later key should survive");
        }
    }

    // A key touched by get is never the next eviction victim while
    // untouched older keys remain.
    #[test]
    fn prop_get_refreshes_recency(capacity in 2usize..8) {
        let mut cache = TtlCache::new(capacity, TEST_DEFAULT_TTL);

        for i in 0..capacity {
            cache.set(format!("key-{}", i), json!(i), None);
        }

        // Refresh the oldest key, then force one eviction
        cache.get("key-0").unwrap();
        cache.set("overflow".to_string(), json!("x"), None);

        prop_assert!(cache.get("key-0").is_some(), "Refreshed key must not be evicted");
        prop_assert_eq!(cache.get("key-1"), None, "Oldest untouched key is the victim");
    }

    // Hit/miss counters reflect exactly the get outcomes observed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut cache = TtlCache::new(100, TEST_DEFAULT_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, json!(value), None),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Evict { key } => cache.evict(&key),
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "Total entries mismatch");
    }

    // After any operation sequence the retrievable key set is exactly the
    // set of keys set and not since evicted (TTL far in the future).
    #[test]
    fn prop_live_keys_match_model(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let mut cache = TtlCache::new(1000, TEST_DEFAULT_TTL);
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key.clone(), json!(value), None);
                    model.insert(key);
                }
                CacheOp::Get { key } => { cache.get(&key); }
                CacheOp::Evict { key } => {
                    cache.evict(&key);
                    model.remove(&key);
                }
            }
        }

        prop_assert_eq!(cache.len(), model.len());
        for key in &model {
            prop_assert!(cache.get(key).is_some(), "Model key missing from cache");
        }
    }
}
