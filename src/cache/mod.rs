//! Cache Module
//!
//! In-memory caching of upstream responses with TTL expiration, LRU
//! eviction and an explicit memoization wrapper for async fetches.

mod entry;
mod lru;
mod memo;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memo::{memoized, CacheKey};
pub use stats::CacheStats;
pub use store::TtlCache;
