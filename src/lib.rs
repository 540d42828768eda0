//! Page Cache - fetch page text over HTTP with short-lived caching
//!
//! Wraps a page fetcher in cache-and-track decorators that keep page text
//! and per-URL request counters in a key-value store (in-memory or Redis).

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod store;
pub mod tasks;
pub mod tracking;

pub use api::AppState;
pub use config::Config;
pub use error::{Error, FetchError, Result, StoreError};
pub use fetch::{Fetcher, HttpFetcher};
pub use store::{KeyValueStore, MemoryStore, RedisStore, StoreBackend};
pub use tasks::spawn_cleanup_task;
pub use tracking::{CheckThenTrack, CountThenServe, PerUrlLock};
