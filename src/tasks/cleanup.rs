//! TTL Cleanup Task
//!
//! Background task that periodically removes expired keys from the
//! in-memory store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically sweeps expired keys.
///
/// Reads already treat expired keys as absent; the sweep only keeps keys
/// that are never read again from piling up.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store = Arc::new(MemoryStore::new());
/// let cleanup_handle = spawn_cleanup_task(store.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(store: Arc<MemoryStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.cleanup_expired().await;

            if removed > 0 {
                let stats = store.stats().await;
                info!(
                    "TTL cleanup: removed {} expired keys, {} remain",
                    removed, stats.total_keys
                );
            } else {
                debug!("TTL cleanup: no expired keys found");
            }
        }
    })
}
