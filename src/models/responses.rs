//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

// == Page ==
/// Response envelope for a resource listing: total count plus the typed
/// records of the requested page.
///
/// Deserializes directly from an upstream page (extra upstream fields
/// like `next`/`previous` are dropped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of matching records upstream
    pub count: u64,
    /// Records of the requested page
    pub results: Vec<T>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Maps a raw upstream payload into a typed page.
    pub fn from_swapi(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|err| ApiError::Internal(format!("unexpected upstream payload: {}", err)))
    }
}

// == Health Response ==
/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Service identifier
    pub service: String,
    /// Crate version
    pub version: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response with the current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: "starwars-proxy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Stats Response ==
/// Response body for GET /api/v1/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Builds the response from cache statistics.
    pub fn from_stats(stats: &crate::cache::CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}
