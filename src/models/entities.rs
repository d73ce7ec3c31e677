//! Entity Records
//!
//! Typed records for the four Star Wars resources, deserialized from the
//! upstream JSON and reserialized to clients. SWAPI delivers most numeric
//! fields as strings (with values like "unknown" or "n/a"), so those stay
//! strings here; the sorting layer parses them when asked to order
//! numerically.

use serde::{Deserialize, Serialize};

// == Character ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    pub url: String,
}

// == Planet ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    pub url: String,
}

// == Film ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub episode_id: u32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub url: String,
}

// == Starship ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub hyperdrive_rating: String,
    pub starship_class: String,
    pub url: String,
}
