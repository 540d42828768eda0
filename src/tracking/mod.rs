//! Tracking Module
//!
//! Cache-and-track decorators around a [`Fetcher`](crate::fetch::Fetcher).
//!
//! # Policies
//! - [`CountThenServe`]: counts every call, hits included, and resets the
//!   counter whenever the page is refetched. Cached for 10 seconds.
//! - [`CheckThenTrack`]: counts only refetches, never resets, with a
//!   configurable expiration.
//! - [`PerUrlLock`]: optional wrapper that lets one call per URL through at
//!   a time. The two policies above take no locks of their own.

mod check_then_track;
mod count_then_serve;
mod keys;
mod per_url_lock;

#[cfg(test)]
mod property_tests;

pub use check_then_track::{CheckThenTrack, DEFAULT_EXPIRATION_SECS};
pub use count_then_serve::{CountThenServe, RESULT_TTL_SECS};
pub use keys::{cached_key, count_key, result_key};
pub use per_url_lock::PerUrlLock;
