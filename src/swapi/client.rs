//! SWAPI Client Module
//!
//! HTTP client for the upstream Star Wars API. Every fetch goes through
//! the shared cache via `memoized`, keyed on the endpoint name and the
//! filter fields.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{memoized, CacheKey, TtlCache};
use crate::error::{ApiError, Result};
use crate::swapi::SearchFilters;

/// Upstream request timeout.
const TIMEOUT: Duration = Duration::from_secs(10);

// == Resource ==
/// The four upstream resource endpoints this proxy serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    People,
    Planets,
    Films,
    Starships,
}

impl Resource {
    /// Upstream path for the resource.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::People => "/people/",
            Resource::Planets => "/planets/",
            Resource::Films => "/films/",
            Resource::Starships => "/starships/",
        }
    }

    /// Operation name used as the cache-key prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::People => "people",
            Resource::Planets => "planets",
            Resource::Films => "films",
            Resource::Starships => "starships",
        }
    }
}

// == SWAPI Client ==
/// Client for the upstream Star Wars API.
///
/// Holds a handle to the shared cache rather than owning one, so the
/// composition root controls cache lifetime and tests can inspect it.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<RwLock<TtlCache>>,
}

impl SwapiClient {
    // == Constructor ==
    /// Creates a client for the given upstream base URL.
    pub fn new(base_url: &str, cache: Arc<RwLock<TtlCache>>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(concat!("starwars-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    // == Resource Fetches ==
    /// Fetches characters, served from cache when possible.
    pub async fn get_characters(&self, filters: &SearchFilters) -> Result<Value> {
        self.fetch(Resource::People, filters).await
    }

    /// Fetches planets, served from cache when possible.
    pub async fn get_planets(&self, filters: &SearchFilters) -> Result<Value> {
        self.fetch(Resource::Planets, filters).await
    }

    /// Fetches films, served from cache when possible.
    pub async fn get_films(&self, filters: &SearchFilters) -> Result<Value> {
        self.fetch(Resource::Films, filters).await
    }

    /// Fetches starships, served from cache when possible.
    pub async fn get_starships(&self, filters: &SearchFilters) -> Result<Value> {
        self.fetch(Resource::Starships, filters).await
    }

    // == Fetch ==
    /// Memoized fetch of one upstream page.
    ///
    /// The cache key is derived from the resource name and the filter
    /// fields only. Failures (transport or non-2xx status) propagate to
    /// the caller and leave no cache entry behind.
    async fn fetch(&self, resource: Resource, filters: &SearchFilters) -> Result<Value> {
        let key = CacheKey::new(resource.name())
            .field("page", filters.page)
            .opt_field("search", filters.search.as_ref());

        memoized(&self.cache, &key, None, || async {
            let url = format!("{}{}", self.base_url, resource.path());
            debug!(%url, "fetching from upstream");

            let response = self
                .http
                .get(&url)
                .query(&filters.to_query_params())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::UpstreamStatus(status.as_u16()));
            }

            Ok(response.json::<Value>().await?)
        })
        .await
    }
}
