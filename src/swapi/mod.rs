//! SWAPI Module
//!
//! Upstream collaborator: the HTTP client for the public Star Wars API
//! and the search filters forwarded to it.

mod client;
mod filters;

pub use client::{Resource, SwapiClient};
pub use filters::SearchFilters;
