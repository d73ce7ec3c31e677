//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.
//!
//! A cache miss is deliberately NOT represented here: misses are normal
//! control flow handled inside the cache layer. Upstream failures pass
//! through to the caller and are never cached.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid API key
    #[error("Invalid or missing API key")]
    Unauthorized,

    /// Transport-level failure talking to the upstream API
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(_) | ApiError::UpstreamStatus(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        if matches!(self, ApiError::Unauthorized) {
            return (status, [(header::WWW_AUTHENTICATE, "ApiKey")], body).into_response();
        }

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ApiError>;
