//! Per-URL serialization.
//!
//! Wrapping a caching decorator in [`PerUrlLock`] closes its check-then-act
//! window within one process: concurrent callers for the same URL queue up,
//! so only the first misses and the rest read what it cached. Other URLs are
//! not held up. Nothing is coordinated across processes sharing a store.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::fetch::Fetcher;

pub struct PerUrlLock<F> {
    inner: F,
    locks: Mutex<HashMap<String, Weak<Mutex<()>>>>,
}

impl<F: Fetcher> PerUrlLock<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Returns the lock for `url`, creating it if no caller holds one.
    async fn lock_for(&self, url: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        if let Some(lock) = locks.get(url).and_then(Weak::upgrade) {
            return lock;
        }

        // Drop entries whose callers have all finished
        locks.retain(|_, lock| lock.strong_count() > 0);

        let lock = Arc::new(Mutex::new(()));
        locks.insert(url.to_string(), Arc::downgrade(&lock));
        lock
    }

    /// Number of URLs with a caller currently inside or waiting.
    pub async fn in_flight(&self) -> usize {
        let locks = self.locks.lock().await;
        locks.values().filter(|lock| lock.strong_count() > 0).count()
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for PerUrlLock<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        let lock = self.lock_for(url).await;
        let _guard = lock.lock().await;
        self.inner.fetch(url).await
    }
}
