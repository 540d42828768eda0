//! Store Entry Module
//!
//! Defines the structure for individual keyspace entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Store Entry ==
/// A single stored value with its expiration metadata.
///
/// Times come from `tokio::time::Instant` so a paused test runtime can
/// move entries past their expiration without sleeping.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored bytes
    pub value: Vec<u8>,
    /// Creation time
    pub created_at: Instant,
    /// Expiration time, None = no expiration
    pub expires_at: Option<Instant>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// Returns None when the expiration cannot be represented as an instant.
    ///
    /// # Arguments
    /// * `value` - The bytes to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(value: Vec<u8>, ttl_seconds: Option<u64>) -> Option<Self> {
        let now = Instant::now();
        let expires_at = match ttl_seconds {
            Some(ttl) => Some(now.checked_add(Duration::from_secs(ttl))?),
            None => None,
        };

        Some(Self {
            value,
            created_at: now,
            expires_at,
        })
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time,
    /// so a key written with a 10 second TTL is gone at exactly +10s.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }

    /// Returns remaining TTL in whole seconds, rounded up.
    ///
    /// A freshly written 10 second entry reports 10, not 9.
    pub fn ttl_remaining_secs(&self) -> Option<u64> {
        self.ttl_remaining()
            .map(|remaining| (remaining.as_millis() as u64).div_ceil(1000))
    }

    /// Age of the entry since it was last written.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.created_at)
    }
}
