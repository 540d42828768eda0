//! Store Module
//!
//! The key-value store the cache decorators persist into: a narrow async
//! interface plus in-memory and Redis implementations.

mod backend;
mod entry;
mod memory;
mod redis_store;
mod stats;


use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use backend::StoreBackend;
pub use entry::StoreEntry;
pub use memory::{Keyspace, MemoryStore};
pub use redis_store::RedisStore;
pub use stats::StoreStats;

// == Key-Value Store ==
/// Operations the decorators need from a key-value store.
///
/// Each call touches a single key and is atomic on its own. Nothing here
/// groups several calls into a transaction.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` at `key` with no expiration, dropping any previous TTL.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Stores `value` at `key`, expiring it after `ttl_seconds`.
    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()>;

    /// Atomically adds one to the integer at `key` and returns the new value.
    /// An absent key starts from 0.
    async fn incr(&self, key: &str) -> Result<i64>;
}

// == TTL ==
/// Remaining lifetime of a key, as Redis TTL reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// No such key (TTL -2)
    Missing,
    /// Key exists without an expiration (TTL -1)
    Persistent,
    /// Seconds until the key expires
    Expires(u64),
}
