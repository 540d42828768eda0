//! Response DTOs for the page cache API
//!
//! Defines the structure of outgoing JSON response bodies. Page text itself
//! is returned as plain text.

use serde::Serialize;

/// Response body for the count endpoint (GET /count)
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// The URL whose counter was read
    pub url: String,
    /// Value of `count:{url}`, 0 when the key does not exist
    pub count: i64,
}

impl CountResponse {
    pub fn new(url: impl Into<String>, count: i64) -> Self {
        Self {
            url: url.into(),
            count,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
