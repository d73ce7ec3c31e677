//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::require_api_key;
use super::handlers::{
    cache_stats_handler, characters_handler, films_handler, health_handler, planets_handler,
    root_handler, starships_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service banner
/// - `GET /health` - Health check endpoint
/// - `GET /api/v1/people` - Characters (auth required)
/// - `GET /api/v1/planets` - Planets (auth required)
/// - `GET /api/v1/films` - Films (auth required)
/// - `GET /api/v1/starships` - Starships (auth required)
/// - `GET /api/v1/cache/stats` - Cache counters (auth required)
///
/// Resource routes accept `search`, `page` and `ordering` query
/// parameters.
///
/// # Middleware
/// - API key check on everything under /api/v1
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/people", get(characters_handler))
        .route("/planets", get(planets_handler))
        .route("/films", get(films_handler))
        .route("/starships", get(starships_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
