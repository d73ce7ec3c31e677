//! Memoization Module
//!
//! Wraps asynchronous fetch operations with the shared TTL cache: consult
//! the cache first, invoke the operation only on a miss, store the result
//! on success.
//!
//! The key is always built explicitly from an operation name and its
//! semantic fields via [`CacheKey`]. No receiver, callable identity or
//! stringified argument tuple ever participates, so two owners making the
//! same logical call share one cache entry by construction.

use std::fmt::{Display, Write as _};
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::warn;

use crate::cache::TtlCache;

// == Cache Key ==
/// Deterministic cache key built from an operation name and typed fields.
///
/// Equal operation and equal fields always produce equal keys; distinct
/// field values produce distinct keys because every field is written as
/// `name=value` with fixed separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    // == Constructor ==
    /// Starts a key for the named operation (e.g. an upstream endpoint).
    pub fn new(operation: &str) -> Self {
        Self(operation.to_string())
    }

    // == Field ==
    /// Appends a `name=value` component.
    pub fn field(mut self, name: &str, value: impl Display) -> Self {
        // Infallible for String targets
        let _ = write!(self.0, ":{}={}", name, value);
        self
    }

    // == Optional Field ==
    /// Appends a `name=value` component when the value is present.
    ///
    /// An absent value contributes nothing, so `None` and an omitted field
    /// derive the same key.
    pub fn opt_field(mut self, name: &str, value: Option<&impl Display>) -> Self {
        if let Some(value) = value {
            self = self.field(name, value);
        }
        self
    }

    /// Returns the derived key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// == Memoized ==
/// Runs `fetch` through the shared cache.
///
/// On a hit the cached value is returned and `fetch` is never invoked; on
/// a miss `fetch` runs, its result is stored under `key` with the given
/// TTL (cache default when `None`) and returned. A failing `fetch`
/// propagates unchanged and caches nothing.
///
/// The cache lock is released before awaiting `fetch`, so cache calls stay
/// atomic while the fetch itself may interleave with other requests. Two
/// concurrent misses on the same key both fetch and both store; the last
/// write wins. That duplicate work is accepted, there is no coalescing.
pub async fn memoized<T, E, F, Fut>(
    cache: &Arc<RwLock<TtlCache>>,
    key: &CacheKey,
    ttl: Option<u64>,
    fetch: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    {
        let mut cache = cache.write().await;
        if let Some(value) = cache.get(key.as_str()) {
            match serde_json::from_value(value) {
                Ok(hit) => return Ok(hit),
                Err(err) => {
                    // Stale shape (e.g. entity changed between runs):
                    // treat as a miss rather than an error
                    warn!(key = %key, %err, "evicting cached value with unexpected shape");
                    cache.evict(key.as_str());
                }
            }
        }
    }

    let result = fetch().await?;

    match serde_json::to_value(&result) {
        Ok(value) => {
            let mut cache = cache.write().await;
            cache.set(key.as_str().to_string(), value, ttl);
        }
        Err(err) => {
            warn!(key = %key, %err, "result not serializable, skipping cache write");
        }
    }

    Ok(result)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn shared_cache(capacity: usize, default_ttl: u64) -> Arc<RwLock<TtlCache>> {
        Arc::new(RwLock::new(TtlCache::new(capacity, default_ttl)))
    }

    #[test]
    fn test_cache_key_determinism() {
        let a = CacheKey::new("people").field("page", 2).field("search", "luke");
        let b = CacheKey::new("people").field("page", 2).field("search", "luke");

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "people:page=2:search=luke");
    }

    #[test]
    fn test_cache_key_distinguishes_fields() {
        let a = CacheKey::new("people").field("page", 1);
        let b = CacheKey::new("people").field("page", 2);
        let c = CacheKey::new("planets").field("page", 1);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cache_key_opt_field() {
        let none = CacheKey::new("films").field("page", 1).opt_field("search", None::<&String>);
        let some = CacheKey::new("films")
            .field("page", 1)
            .opt_field("search", Some(&"hope".to_string()));

        assert_eq!(none.as_str(), "films:page=1");
        assert_eq!(some.as_str(), "films:page=1:search=hope");
    }

    #[tokio::test]
    async fn test_memoized_invokes_once_within_ttl() {
        let cache = shared_cache(16, 60);
        let key = CacheKey::new("op").field("page", 1);
        let calls = AtomicUsize::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("payload".to_string())
        };

        let first = memoized(&cache, &key, None, fetch).await.unwrap();
        let second = memoized(&cache, &key, None, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("different".to_string())
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_memoized_distinct_arguments_fetch_independently() {
        let cache = shared_cache(16, 60);
        let calls = AtomicUsize::new(0);

        for page in [1u32, 2] {
            let key = CacheKey::new("op").field("page", page);
            let got: String = memoized(&cache, &key, None, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(format!("page-{}", page))
            })
            .await
            .unwrap();
            assert_eq!(got, format!("page-{}", page));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_memoized_failure_is_not_cached() {
        let cache = shared_cache(16, 60);
        let key = CacheKey::new("op").field("page", 1);
        let calls = AtomicUsize::new(0);

        let failed: Result<String, String> = memoized(&cache, &key, None, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("upstream down".to_string())
        })
        .await;

        assert_eq!(failed, Err("upstream down".to_string()));
        assert!(cache.read().await.is_empty());

        // Subsequent call retries the operation
        let recovered: String = memoized(&cache, &key, None, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("recovered".to_string())
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(recovered, "recovered");
    }

    #[tokio::test]
    async fn test_memoized_refetches_after_expiry() {
        let cache = shared_cache(16, 60);
        let key = CacheKey::new("op").field("page", 1);
        let calls = AtomicUsize::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("payload".to_string())
        };

        memoized(&cache, &key, Some(1), fetch).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        memoized(&cache, &key, Some(1), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("payload".to_string())
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_memoized_mismatched_shape_treated_as_miss() {
        let cache = shared_cache(16, 60);
        let key = CacheKey::new("op").field("page", 1);

        // Seed the key with a value that cannot deserialize as u32
        cache
            .write()
            .await
            .set(key.as_str().to_string(), serde_json::json!("not a number"), None);

        let got: u32 = memoized(&cache, &key, None, || async { Ok::<_, String>(7u32) })
            .await
            .unwrap();

        assert_eq!(got, 7);
        // The bad entry was replaced by the fresh result
        assert_eq!(cache.write().await.get(key.as_str()), Some(serde_json::json!(7)));
    }
}
