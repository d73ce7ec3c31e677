//! Cache Entry Module
//!
//! Defines the structure of a single cached upstream response with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A single cached value with its expiry metadata.
///
/// The payload is an opaque JSON value: the cache does not interpret what
/// it stores, it only bounds how long the value may be served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, immutable once stored
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired.
    ///
    /// An entry is valid while `now <= expires_at` and expired strictly
    /// afterwards. A TTL of zero is not rejected; it makes the entry stale
    /// as soon as the clock ticks past the store time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() > self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
