//! LRU Tracker Module
//!
//! Tracks key recency for choosing eviction victims.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// The tracker exists only to pick eviction victims; the store owns the
/// entries themselves and keeps both structures on the same key set.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Order of keys by access time
    order: VecDeque<String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If the key is already tracked, its old record is removed first so
    /// each key appears exactly once.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op if the key is absent.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.back()
    }

    // == Clear ==
    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
