//! Check-then-track caching.
//!
//! A hit on `cached:{url}` returns straight away and touches nothing else.
//! A miss fetches, caches the text for the configured expiration and then
//! bumps `count:{url}`, which never expires and is never reset, so it counts
//! refetches over the lifetime of the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::store::KeyValueStore;
use crate::tracking::{cached_key, count_key};

/// Expiration used when none is configured.
pub const DEFAULT_EXPIRATION_SECS: u64 = 10;

/// Caching decorator that counts misses only.
///
/// Like [`CountThenServe`](super::CountThenServe) it takes no lock between
/// the cache check and the write.
pub struct CheckThenTrack<F> {
    store: Arc<dyn KeyValueStore>,
    inner: F,
    expiration_secs: u64,
}

impl<F: Fetcher> CheckThenTrack<F> {
    /// Wraps `inner`, caching its results for `expiration_secs`.
    ///
    /// The store rejects an expiration of 0 on the first miss.
    pub fn new(store: Arc<dyn KeyValueStore>, inner: F, expiration_secs: u64) -> Self {
        Self {
            store,
            inner,
            expiration_secs,
        }
    }

    pub fn with_default_expiration(store: Arc<dyn KeyValueStore>, inner: F) -> Self {
        Self::new(store, inner, DEFAULT_EXPIRATION_SECS)
    }

    pub fn expiration_secs(&self) -> u64 {
        self.expiration_secs
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CheckThenTrack<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        let cached_key = cached_key(url);

        if let Some(cached) = self.store.get(&cached_key).await? {
            debug!("Cache hit for {}", url);
            return Ok(String::from_utf8(cached)?);
        }

        let text = self.inner.fetch(url).await?;

        self.store
            .set_ex(&cached_key, text.as_bytes(), self.expiration_secs)
            .await?;
        let misses = self.store.incr(&count_key(url)).await?;
        debug!("Cache miss for {} (miss #{})", url, misses);

        Ok(text)
    }
}
