//! API Handlers
//!
//! HTTP request handlers for each page cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::config::Config;
use crate::error::{Error, Result, StoreError};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::models::{CountResponse, HealthResponse, UrlQuery};
use crate::store::KeyValueStore;
use crate::tracking::{count_key, CheckThenTrack, CountThenServe};

/// Application state shared across all handlers.
///
/// Both caching policies wrap the same underlying fetcher and write into the
/// same store.
#[derive(Clone)]
pub struct AppState {
    /// Shared store handle
    pub store: Arc<dyn KeyValueStore>,
    /// Count-then-serve policy behind `/page`
    pub page: Arc<dyn Fetcher>,
    /// Check-then-track policy behind `/page/tracked`
    pub tracked: Arc<dyn Fetcher>,
}

impl AppState {
    /// Builds both policies around `fetcher`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn Fetcher>,
        expiration_secs: u64,
    ) -> Self {
        let page = CountThenServe::new(store.clone(), fetcher.clone());
        let tracked = CheckThenTrack::new(store.clone(), fetcher, expiration_secs);

        Self {
            store,
            page: Arc::new(page),
            tracked: Arc::new(tracked),
        }
    }

    /// Creates a new AppState from configuration, fetching over HTTP.
    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout.map(Duration::from_secs))?;
        Ok(Self::new(store, Arc::new(fetcher), config.cache_expiration))
    }
}

/// Query extraction result as the handlers receive it.
///
/// Taking the rejection instead of failing extraction keeps a missing or
/// malformed query on the JSON error path.
type UrlParam = std::result::Result<Query<UrlQuery>, QueryRejection>;

fn validated(query: UrlParam) -> Result<String> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    match query.validate() {
        Some(error_msg) => Err(Error::InvalidRequest(error_msg)),
        None => Ok(query.url),
    }
}

/// Handler for GET /page?url=...
///
/// Serves the page through the count-then-serve policy.
pub async fn page_handler(
    State(state): State<AppState>,
    query: UrlParam,
) -> Result<String> {
    let url = validated(query)?;
    state.page.fetch(&url).await
}

/// Handler for GET /page/tracked?url=...
///
/// Serves the page through the check-then-track policy.
pub async fn tracked_page_handler(
    State(state): State<AppState>,
    query: UrlParam,
) -> Result<String> {
    let url = validated(query)?;
    state.tracked.fetch(&url).await
}

/// Handler for GET /count?url=...
///
/// Reads the request counter for a URL.
pub async fn count_handler(
    State(state): State<AppState>,
    query: UrlParam,
) -> Result<Json<CountResponse>> {
    let url = validated(query)?;
    let key = count_key(&url);

    let count = match state.store.get(&key).await? {
        None => 0,
        Some(bytes) => std::str::from_utf8(&bytes)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or(StoreError::NotAnInteger(key))?,
    };

    Ok(Json(CountResponse::new(url, count)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
