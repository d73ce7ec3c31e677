//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// API key required on the versioned resource routes
    pub api_key: String,
    /// Base URL of the upstream Star Wars API
    pub swapi_base_url: String,
    /// Maximum number of entries the cache can hold
    pub cache_max_entries: usize,
    /// Default TTL in seconds for cached upstream responses
    pub cache_ttl_seconds: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `API_KEY` - client API key (default: dev key, change in production)
    /// - `SWAPI_BASE_URL` - upstream base URL (default: https://swapi.dev/api)
    /// - `CACHE_MAX_ENTRIES` - maximum cache entries (default: 128)
    /// - `CACHE_TTL_SECONDS` - default cache TTL (default: 3600)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            api_key: env::var("API_KEY")
                .unwrap_or_else(|_| "dev-api-key-change-in-production".to_string()),
            swapi_base_url: env::var("SWAPI_BASE_URL")
                .unwrap_or_else(|_| "https://swapi.dev/api".to_string()),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(128),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            api_key: "dev-api-key-change-in-production".to_string(),
            swapi_base_url: "https://swapi.dev/api".to_string(),
            cache_max_entries: 128,
            cache_ttl_seconds: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cache_max_entries, 128);
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.swapi_base_url, "https://swapi.dev/api");
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("API_KEY");
        env::remove_var("SWAPI_BASE_URL");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("CACHE_TTL_SECONDS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cache_max_entries, 128);
        assert_eq!(config.cache_ttl_seconds, 3600);
    }
}
