//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::api::sort::apply_ordering;
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Character, Film, HealthResponse, Page, Planet, Starship, StatsResponse};
use crate::swapi::{SearchFilters, SwapiClient};

// == App State ==
/// Application state shared across all handlers.
///
/// The composition root owns the single cache instance and hands it to
/// the upstream client by reference-counted handle. There is no global
/// cache; tests build as many independent states as they need.
#[derive(Clone)]
pub struct AppState {
    /// Shared TTL/LRU cache
    pub cache: Arc<RwLock<TtlCache>>,
    /// Upstream client (fetches through the cache)
    pub swapi: SwapiClient,
    /// Expected client API key
    pub api_key: Arc<String>,
}

impl AppState {
    /// Builds the state from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(RwLock::new(TtlCache::new(
            config.cache_max_entries,
            config.cache_ttl_seconds,
        )));
        let swapi = SwapiClient::new(&config.swapi_base_url, cache.clone())?;

        Ok(Self {
            cache,
            swapi,
            api_key: Arc::new(config.api_key.clone()),
        })
    }
}

// == Query Parameters ==
/// Query parameters accepted by every resource listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    /// Free-text search forwarded upstream
    pub search: Option<String>,
    /// Upstream page number (default 1)
    pub page: Option<u32>,
    /// Client-side ordering field, `-` prefix for descending
    pub ordering: Option<String>,
}

// == Resource Handlers ==

/// Handler for GET /api/v1/people
pub async fn characters_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Character>>> {
    let filters = SearchFilters::new(params.search, params.page);
    let raw = state.swapi.get_characters(&filters).await?;
    let page = Page::<Character>::from_swapi(raw)?;

    Ok(Json(apply_ordering(page, params.ordering.as_deref())))
}

/// Handler for GET /api/v1/planets
pub async fn planets_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Planet>>> {
    let filters = SearchFilters::new(params.search, params.page);
    let raw = state.swapi.get_planets(&filters).await?;
    let page = Page::<Planet>::from_swapi(raw)?;

    Ok(Json(apply_ordering(page, params.ordering.as_deref())))
}

/// Handler for GET /api/v1/films
pub async fn films_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Film>>> {
    let filters = SearchFilters::new(params.search, params.page);
    let raw = state.swapi.get_films(&filters).await?;
    let page = Page::<Film>::from_swapi(raw)?;

    Ok(Json(apply_ordering(page, params.ordering.as_deref())))
}

/// Handler for GET /api/v1/starships
pub async fn starships_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Starship>>> {
    let filters = SearchFilters::new(params.search, params.page);
    let raw = state.swapi.get_starships(&filters).await?;
    let page = Page::<Starship>::from_swapi(raw)?;

    Ok(Json(apply_ordering(page, params.ordering.as_deref())))
}

// == Service Handlers ==

/// Handler for GET /api/v1/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from_stats(&cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Star Wars API proxy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
