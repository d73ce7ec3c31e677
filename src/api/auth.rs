//! API Key Middleware
//!
//! Checks the `X-API-Key` header on the versioned resource routes.
//! Comparison is constant-time so response timing reveals nothing about
//! how much of a guessed key matched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::api::AppState;
use crate::error::{ApiError, Result};

/// Header carrying the client API key.
pub const API_KEY_HEADER: &str = "x-api-key";

// == Middleware ==
/// Rejects requests without a matching API key.
///
/// A missing header, non-UTF-8 value or mismatching key all produce the
/// same 401 response with a `WWW-Authenticate: ApiKey` challenge.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if keys_match(key, &state.api_key) => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Constant-time key equality.
fn keys_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
