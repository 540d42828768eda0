//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key-value store location: `memory` or a `redis://` URL
    pub store_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Expiration in seconds for the check-then-track cache
    pub cache_expiration: u64,
    /// Memory store cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Optional HTTP client timeout in seconds for page fetches
    pub fetch_timeout: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_URL` - Store backend (default: memory)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_EXPIRATION` - Check-then-track expiration in seconds (default: 10)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `FETCH_TIMEOUT` - Page fetch timeout in seconds (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store_url: env::var("STORE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.store_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_expiration: parse_var("CACHE_EXPIRATION")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cache_expiration),
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            fetch_timeout: parse_var("FETCH_TIMEOUT").filter(|secs| *secs > 0),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: "memory".to_string(),
            server_port: 3000,
            cache_expiration: 10,
            cleanup_interval: 1,
            fetch_timeout: None,
        }
    }
}
