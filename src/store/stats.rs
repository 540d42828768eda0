//! Store Statistics Module
//!
//! Tracks keyspace metrics for the in-memory store: read hits and misses,
//! expired keys removed, and the live key count.

use serde::Serialize;

// == Store Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// GETs that found a live key
    pub hits: u64,
    /// GETs that found nothing (absent or expired)
    pub misses: u64,
    /// Keys removed because their TTL elapsed
    pub expired: u64,
    /// Current number of keys in the keyspace
    pub total_keys: usize,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn set_total_keys(&mut self, count: usize) {
        self.total_keys = count;
    }
}
