//! Models Module
//!
//! Typed entity records and response DTOs.

mod entities;
mod responses;

pub use entities::{Character, Film, Planet, Starship};
pub use responses::{HealthResponse, Page, StatsResponse};
