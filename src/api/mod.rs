//! API Module
//!
//! HTTP surface of the proxy: routes, handlers, auth middleware and
//! result ordering.

mod auth;
mod handlers;
mod routes;
mod sort;

pub use auth::API_KEY_HEADER;
pub use handlers::{AppState, ListParams};
pub use routes::create_router;
