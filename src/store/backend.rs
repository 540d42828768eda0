//! Store Backend
//!
//! Owns the process-wide store handle from startup to shutdown. Components
//! receive the store by construction through `shared()`.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::store::{KeyValueStore, MemoryStore, RedisStore};
use crate::tasks::spawn_cleanup_task;

// == Store Backend ==
/// A connected store and the resources that keep it running.
pub enum StoreBackend {
    /// In-process keyspace plus its expiry sweeper
    Memory {
        store: Arc<MemoryStore>,
        sweeper: JoinHandle<()>,
    },
    /// Remote Redis server
    Redis(Arc<RedisStore>),
}

impl StoreBackend {
    /// Connects to the store named by `url`.
    ///
    /// `memory` starts an in-process store whose expired keys are swept every
    /// `cleanup_interval`; `redis://` and `rediss://` URLs open a Redis
    /// connection.
    pub async fn connect(url: &str, cleanup_interval: Duration) -> Result<Self> {
        if url == "memory" {
            let store = Arc::new(MemoryStore::new());
            let sweeper = spawn_cleanup_task(store.clone(), cleanup_interval);
            info!("Using in-memory store");
            return Ok(StoreBackend::Memory { store, sweeper });
        }

        if url.starts_with("redis://") || url.starts_with("rediss://") {
            let store = RedisStore::connect(url).await?;
            return Ok(StoreBackend::Redis(Arc::new(store)));
        }

        Err(StoreError::UnsupportedUrl(url.to_string()).into())
    }

    /// The handle every component shares.
    pub fn shared(&self) -> Arc<dyn KeyValueStore> {
        match self {
            StoreBackend::Memory { store, .. } => store.clone() as Arc<dyn KeyValueStore>,
            StoreBackend::Redis(store) => store.clone() as Arc<dyn KeyValueStore>,
        }
    }

    /// The in-memory store, when that is the active backend.
    pub fn memory(&self) -> Option<&Arc<MemoryStore>> {
        match self {
            StoreBackend::Memory { store, .. } => Some(store),
            StoreBackend::Redis(_) => None,
        }
    }

    /// Stops background work and releases the connection.
    pub fn shutdown(self) {
        match self {
            StoreBackend::Memory { sweeper, .. } => {
                sweeper.abort();
                warn!("Cleanup task aborted");
            }
            StoreBackend::Redis(_) => info!("Redis connection released"),
        }
    }
}
