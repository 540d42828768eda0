//! Store key naming.
//!
//! These literal formats are shared with anything else reading the store,
//! so they must not change.

/// Request counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

/// Cached page text written by [`CountThenServe`](super::CountThenServe).
pub fn result_key(url: &str) -> String {
    format!("result:{}", url)
}

/// Cached page text written by [`CheckThenTrack`](super::CheckThenTrack).
pub fn cached_key(url: &str) -> String {
    format!("cached:{}", url)
}
