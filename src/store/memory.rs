//! Memory Store Module
//!
//! In-process key-value store with Redis-compatible GET, SET, SETEX and INCR
//! semantics. Every operation runs under one mutex, so each is atomic on its
//! own; nothing spans more than one call.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{Result, StoreError};
use crate::store::{KeyValueStore, StoreEntry, StoreStats, Ttl};

// == Keyspace ==
/// Key-to-entry map with lazy expiry.
///
/// Expired entries are treated as absent by every operation and removed when
/// touched; `cleanup_expired` sweeps the rest.
#[derive(Debug, Default)]
pub struct Keyspace {
    entries: HashMap<String, StoreEntry>,
    stats: StoreStats,
}

impl Keyspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn live(&mut self, key: &str) -> Option<&StoreEntry> {
        if self.entries.get(key).is_some_and(StoreEntry::is_expired) {
            self.entries.remove(key);
            self.stats.record_expired(1);
            self.stats.set_total_keys(self.entries.len());
        }
        self.entries.get(key)
    }

    // == Get ==
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.live(key).map(|entry| entry.value.clone()) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous value and TTL.
    ///
    /// Fails without touching the keyspace if the TTL is too large to track.
    pub fn set(
        &mut self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> std::result::Result<(), StoreError> {
        let entry = StoreEntry::new(value, ttl_seconds).ok_or_else(|| {
            StoreError::InvalidArgument(format!("invalid expire time for '{}'", key))
        })?;
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_keys(self.entries.len());
        Ok(())
    }

    // == Incr ==
    /// Adds one to the integer at `key`, treating an absent key as 0.
    ///
    /// The existing expiration, if any, is kept.
    pub fn incr(&mut self, key: &str) -> std::result::Result<i64, StoreError> {
        let current = match self.live(key) {
            Some(entry) => std::str::from_utf8(&entry.value)
                .ok()
                .and_then(|text| text.parse::<i64>().ok())
                .ok_or_else(|| StoreError::NotAnInteger(key.to_string()))?,
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::NotAnInteger(key.to_string()))?;

        match self.entries.get_mut(key) {
            Some(entry) => entry.value = next.to_string().into_bytes(),
            None => self.set(key, next.to_string().into_bytes(), None)?,
        }

        Ok(next)
    }

    // == TTL ==
    pub fn ttl(&mut self, key: &str) -> Ttl {
        match self.live(key) {
            None => Ttl::Missing,
            Some(entry) => match entry.ttl_remaining_secs() {
                Some(secs) => Ttl::Expires(secs),
                None => Ttl::Persistent,
            },
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_keys(self.entries.len());
        removed
    }

    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_keys(self.entries.len());
        stats
    }

    /// Number of keys held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Memory Store ==
/// Shareable in-memory store. Hand it out as `Arc<MemoryStore>`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keyspace: Mutex<Keyspace>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining lifetime of `key`, mirroring Redis TTL.
    pub async fn ttl(&self, key: &str) -> Ttl {
        self.keyspace.lock().await.ttl(key)
    }

    pub async fn cleanup_expired(&self) -> usize {
        self.keyspace.lock().await.cleanup_expired()
    }

    pub async fn stats(&self) -> StoreStats {
        self.keyspace.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.keyspace.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keyspace.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.keyspace.lock().await.get(key))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        Ok(self.keyspace.lock().await.set(key, value.to_vec(), None)?)
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()> {
        if ttl_seconds == 0 {
            return Err(StoreError::InvalidArgument(format!(
                "invalid expire time for '{}'",
                key
            ))
            .into());
        }
        Ok(self
            .keyspace
            .lock()
            .await
            .set(key, value.to_vec(), Some(ttl_seconds))?)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        Ok(self.keyspace.lock().await.incr(key)?)
    }
}
