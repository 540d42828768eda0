//! Count-then-serve caching.
//!
//! Every call bumps `count:{url}` before the cache is read. A hit returns
//! `result:{url}`; a miss fetches, resets the counter to 0 and caches the
//! text for [`RESULT_TTL_SECS`]. The counter therefore reads as "requests
//! served from cache since the last refresh".

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::store::KeyValueStore;
use crate::tracking::{count_key, result_key};

/// Lifetime of a cached page in seconds.
pub const RESULT_TTL_SECS: u64 = 10;

/// Caching decorator that counts every request, hits included.
///
/// Check, fetch and write are separate store calls with no lock around them:
/// two concurrent misses for one URL both fetch, the later write wins, and a
/// counter reset can land after another caller's increment.
pub struct CountThenServe<F> {
    store: Arc<dyn KeyValueStore>,
    inner: F,
}

impl<F: Fetcher> CountThenServe<F> {
    pub fn new(store: Arc<dyn KeyValueStore>, inner: F) -> Self {
        Self { store, inner }
    }

    /// The wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CountThenServe<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        let count_key = count_key(url);
        let result_key = result_key(url);

        let count = self.store.incr(&count_key).await?;

        if let Some(cached) = self.store.get(&result_key).await? {
            debug!("Cache hit for {} ({} since refresh)", url, count);
            return Ok(String::from_utf8(cached)?);
        }

        debug!("Cache miss for {}", url);
        let text = self.inner.fetch(url).await?;

        self.store.set(&count_key, b"0").await?;
        self.store
            .set_ex(&result_key, text.as_bytes(), RESULT_TTL_SECS)
            .await?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FetchError, StoreError};
    use crate::store::{MemoryStore, Ttl};
    use crate::tracking::test_support::{StubFetcher, UnavailableStore};
    use std::time::Duration;
    use tokio::time::advance;

    const URL: &str = "http://example.com";

    async fn read(store: &MemoryStore, key: &str) -> Option<String> {
        store
            .get(key)
            .await
            .unwrap()
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_call_fetches_and_resets_count() {
        let store = Arc::new(MemoryStore::new());
        let page = CountThenServe::new(store.clone(), StubFetcher::ok("HELLO"));

        assert_eq!(page.fetch(URL).await.unwrap(), "HELLO");

        assert_eq!(page.inner().calls(), 1);
        assert_eq!(read(&store, "count:http://example.com").await.as_deref(), Some("0"));
        assert_eq!(
            read(&store, "result:http://example.com").await.as_deref(),
            Some("HELLO")
        );
        assert_eq!(
            store.ttl("result:http://example.com").await,
            Ttl::Expires(RESULT_TTL_SECS)
        );
        assert_eq!(store.ttl("count:http://example.com").await, Ttl::Persistent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_serves_cache_and_still_counts() {
        let store = Arc::new(MemoryStore::new());
        let page = CountThenServe::new(store.clone(), StubFetcher::ok("HELLO"));

        page.fetch(URL).await.unwrap();
        advance(Duration::from_secs(3)).await;

        assert_eq!(page.fetch(URL).await.unwrap(), "HELLO");
        assert_eq!(page.fetch(URL).await.unwrap(), "HELLO");

        assert_eq!(page.inner().calls(), 1);
        assert_eq!(read(&store, "count:http://example.com").await.as_deref(), Some("2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_refetched_and_count_reset() {
        let store = Arc::new(MemoryStore::new());
        let page = CountThenServe::new(store.clone(), StubFetcher::ok("HELLO"));

        page.fetch(URL).await.unwrap();
        page.fetch(URL).await.unwrap();
        page.fetch(URL).await.unwrap();
        assert_eq!(read(&store, "count:http://example.com").await.as_deref(), Some("2"));

        advance(Duration::from_secs(RESULT_TTL_SECS)).await;

        assert_eq!(page.fetch(URL).await.unwrap(), "HELLO");
        assert_eq!(page.inner().calls(), 2);
        assert_eq!(read(&store, "count:http://example.com").await.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_without_caching() {
        let store = Arc::new(MemoryStore::new());
        let page = CountThenServe::new(store.clone(), StubFetcher::failing());

        let result = page.fetch("http://bad.example").await;
        assert!(matches!(
            result,
            Err(Error::Fetch(FetchError::Status { status: 503, .. }))
        ));

        assert_eq!(read(&store, "result:http://bad.example").await, None);
        // The increment happens before the fetch and is not rolled back
        assert_eq!(read(&store, "count:http://bad.example").await.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_failure_after_hit_keeps_cached_text() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_ex("result:http://example.com", b"OLD", RESULT_TTL_SECS)
            .await
            .unwrap();
        let page = CountThenServe::new(store.clone(), StubFetcher::failing());

        assert_eq!(page.fetch(URL).await.unwrap(), "OLD");
        assert_eq!(page.inner().calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal() {
        let page = CountThenServe::new(Arc::new(UnavailableStore), StubFetcher::ok("HELLO"));

        let result = page.fetch(URL).await;
        assert!(matches!(result, Err(Error::Store(StoreError::Redis(_)))));
        assert_eq!(page.inner().calls(), 0, "no fallback fetch without a store");
    }

    #[tokio::test]
    async fn test_undecodable_cache_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_ex("result:http://example.com", &[0xff, 0xfe], RESULT_TTL_SECS)
            .await
            .unwrap();
        let page = CountThenServe::new(store.clone(), StubFetcher::ok("HELLO"));

        assert!(matches!(page.fetch(URL).await, Err(Error::Decode(_))));
        assert_eq!(page.inner().calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_page_is_cached() {
        let store = Arc::new(MemoryStore::new());
        let page = CountThenServe::new(store.clone(), StubFetcher::ok(""));

        assert_eq!(page.fetch(URL).await.unwrap(), "");
        assert_eq!(page.fetch(URL).await.unwrap(), "");
        assert_eq!(page.inner().calls(), 1);
        // Second call took the hit path, so the reset counter was bumped
        assert_eq!(read(&store, "count:http://example.com").await.as_deref(), Some("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_both_fetch() {
        let store = Arc::new(MemoryStore::new());
        let page = CountThenServe::new(
            store.clone(),
            StubFetcher::slow("HELLO", Duration::from_millis(50)),
        );

        let (a, b) = tokio::join!(page.fetch(URL), page.fetch(URL));
        assert_eq!(a.unwrap(), "HELLO");
        assert_eq!(b.unwrap(), "HELLO");

        assert_eq!(page.inner().calls(), 2);
        assert_eq!(read(&store, "count:http://example.com").await.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_urls_are_tracked_independently() {
        let store = Arc::new(MemoryStore::new());
        let page = CountThenServe::new(store.clone(), StubFetcher::ok("HELLO"));

        page.fetch("http://a.example").await.unwrap();
        page.fetch("http://a.example").await.unwrap();
        page.fetch("http://b.example").await.unwrap();

        assert_eq!(page.inner().calls(), 2);
        assert_eq!(read(&store, "count:http://a.example").await.as_deref(), Some("1"));
        assert_eq!(read(&store, "count:http://b.example").await.as_deref(), Some("0"));
    }
}
