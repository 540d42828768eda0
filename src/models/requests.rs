//! Request DTOs for the page cache API
//!
//! Defines the query strings accepted by the HTTP endpoints.

use serde::Deserialize;

/// Query for the page and count endpoints (`?url=...`)
#[derive(Debug, Clone, Deserialize)]
pub struct UrlQuery {
    /// Absolute http(s) URL of the page
    pub url: String,
}

impl UrlQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("url cannot be empty".to_string());
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Some(format!(
                "url must start with http:// or https://, got '{}'",
                self.url
            ));
        }
        None
    }
}
