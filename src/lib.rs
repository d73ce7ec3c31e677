//! Star Wars API proxy
//!
//! A thin backend proxy over the public SWAPI with typed entity mapping,
//! client-side search/sort, and a TTL-bounded LRU cache in front of
//! every upstream call.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod swapi;

pub use api::{create_router, AppState};
pub use config::Config;
