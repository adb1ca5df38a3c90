//! The external store seam and its in-memory reference implementation.
//!
//! The cache core never talks to persistence directly; it goes through
//! [`Store`], an async get/set/delete contract over string keys. Production
//! deployments back this with whatever key-value mechanism they already run;
//! [`MemoryStore`] is the in-process implementation used by applications
//! without durable storage and by the test suite.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::cache::element::CacheEntry;
use crate::cache::error::CacheError;

/// Async key-value store contract consumed by the cache.
///
/// Per-key last-write-wins is the only ordering guarantee the cache relies
/// on; everything else (durability, timeouts, cancellation) belongs to the
/// implementation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Read the entry at `key`. Fails with [`CacheError::NotFound`] when the
    /// key is absent.
    async fn get(&self, key: &str) -> Result<CacheEntry, CacheError>;

    /// Write `entry` under `key`, replacing any previous entry wholesale.
    async fn set(&self, key: &str, entry: CacheEntry) -> Result<(), CacheError>;

    /// Remove the entry at `key`. Removing an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// In-process store over a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<CacheEntry, CacheError> {
        self.entries
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CacheError::not_found(key))
    }

    async fn set(&self, key: &str, entry: CacheEntry) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}
