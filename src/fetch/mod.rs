//! Fetch Module
//!
//! The operation the cache decorators wrap: turn a URL into page text.

mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use http::HttpFetcher;

// == Fetcher ==
/// Anything that can produce the text behind a URL.
///
/// Decorators implement this trait too, so they stack by construction:
/// `CountThenServe::new(store, HttpFetcher::new(None)?)` is itself a fetcher.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url).await
    }
}

#[async_trait]
impl<'a, F: Fetcher + ?Sized> Fetcher for &'a F {
    async fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url).await
    }
}
