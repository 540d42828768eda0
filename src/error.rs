//! Error types for the page cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failures raised by a key-value store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Stored value cannot be incremented
    #[error("value at '{0}' is not an integer or out of range")]
    NotAnInteger(String),

    /// Argument rejected by the store
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unrecognised store URL
    #[error("unsupported store url: {0}")]
    UnsupportedUrl(String),

    /// Redis connection or command failure
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),
}

// == Fetch Error Enum ==
/// Failures raised by the wrapped fetch operation.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    #[error("transport error fetching {url}: {message}")]
    Transport { url: String, message: String },

    /// Request timed out
    #[error("timed out fetching {0}")]
    Timeout(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The HTTP client could not be configured
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

// == Error Enum ==
/// Unified error type for the page cache.
#[derive(Error, Debug)]
pub enum Error {
    /// The key-value store failed or is unreachable
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The wrapped fetch failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Cached bytes are not valid UTF-8
    #[error("cached value is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Store(StoreError::Redis(err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Fetch(_) => StatusCode::BAD_GATEWAY,
            Error::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the page cache.
pub type Result<T> = std::result::Result<T, Error>;
