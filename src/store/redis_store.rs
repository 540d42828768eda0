//! Redis Store Module
//!
//! `KeyValueStore` backed by a Redis server through one multiplexed
//! connection shared by every caller.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::store::KeyValueStore;

// == Redis Store ==
/// Long-lived Redis client.
///
/// The multiplexed connection pipelines concurrent commands over a single
/// socket; cloning it is cheap and clones share that socket.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Opens a connection to the server at `url` (`redis://host:port/db`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Connected to redis at {}", url);
        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()> {
        if ttl_seconds == 0 {
            return Err(StoreError::InvalidArgument(format!(
                "invalid expire time for '{}'",
                key
            ))
            .into());
        }
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.incr(key, 1i64).await?;
        Ok(count)
    }
}
