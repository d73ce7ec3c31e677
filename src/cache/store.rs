//! Cache Store Module
//!
//! The TTL-bounded LRU cache: HashMap storage combined with recency
//! tracking and lazy per-entry expiry.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == TTL Cache ==
/// Bounded, expiring key-value store with LRU eviction.
///
/// A miss is a normal outcome, not an error: `get` returns `None` and the
/// caller decides whether to refetch. Expiry is lazy; an expired entry is
/// removed the first time `get` sees it, never by a background task.
///
/// Invariants after every mutating call:
/// - `len() <= capacity`
/// - entries and the recency tracker hold exactly the same key set
/// - the tracker's oldest key is the least-recently-touched entry
#[derive(Debug)]
pub struct TtlCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
    /// TTL in seconds applied when `set` is given no explicit TTL
    default_ttl: u64,
}

impl TtlCache {
    // == Constructor ==
    /// Creates a new TtlCache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `default_ttl` - Default TTL in seconds for entries without explicit TTL
    pub fn new(capacity: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            default_ttl,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` when the key is absent or its entry has expired.
    /// Expired entries are removed on sight (lazy expiry) and counted as
    /// misses. A valid lookup refreshes the key's recency.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            debug!(key, "cache entry expired");
            self.evict(key);
            self.stats.record_miss();
            return None;
        }

        let value = entry.value.clone();
        self.stats.record_hit();
        self.lru.touch(key);
        Some(value)
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// Overwriting an existing key resets its value, TTL and recency but
    /// never triggers eviction. Inserting a new distinct key while at
    /// capacity evicts exactly one victim, the least recently used key.
    pub fn set(&mut self, key: String, value: Value, ttl: Option<u64>) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(victim) = self.lru.evict_oldest() {
                debug!(key = %victim, "evicting least recently used entry");
                self.entries.remove(&victim);
                self.stats.record_eviction();
            }
        }

        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value, effective_ttl);
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict ==
    /// Removes an entry and its recency record unconditionally.
    ///
    /// Idempotent: a no-op when the key is absent.
    pub fn evict(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Clear ==
    /// Removes all entries and resets the recency order.
    ///
    /// Used primarily for test isolation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
