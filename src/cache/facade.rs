//! Document cache facade.
//!
//! [`DocumentCache`] orchestrates ripper writes and assembler reads against
//! the injected [`Store`]. Saves stamp every produced element with the
//! write-time timestamp and return once all writes are acknowledged; reads
//! delegate to the assembler and propagate [`CacheError::NotFound`] to the
//! caller unchanged.

use futures::future;
use metrics::counter;
use time::OffsetDateTime;
use tracing::{debug, instrument};

use crate::cache::assembler;
use crate::cache::element::{CacheElement, CacheEntry};
use crate::cache::error::CacheError;
use crate::cache::keys;
use crate::cache::ripper;
use crate::cache::store::Store;
use crate::domain::collection::Collection;
use crate::domain::resource::Resource;
use crate::domain::wire::Document;
use crate::telemetry;

/// High-level entry point over a store.
///
/// The facade is stateless apart from the store handle; it can be shared
/// freely behind an `Arc` or constructed per use.
pub struct DocumentCache<S> {
    store: S,
}

impl<S: Store> DocumentCache<S> {
    pub fn new(store: S) -> Self {
        telemetry::describe_metrics();
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rip `resource` (plus `include` targets) and write all elements.
    ///
    /// The primary entry lands under the resource's own entity key, which is
    /// returned so callers can read it back without re-deriving it.
    #[instrument(skip_all, fields(kind = %resource.kind, id = %resource.id))]
    pub async fn save_resource(
        &self,
        resource: &Resource,
        include: &[&str],
    ) -> Result<String, CacheError> {
        let key = keys::key_for(resource);
        let elements = ripper::rip_resource(&key, resource, include);
        self.write_elements(elements).await?;
        Ok(key)
    }

    /// Rip `collection` under the caller's logical `key` and write all
    /// elements: the index entry, one entry per member, and the members'
    /// resolved includes.
    #[instrument(skip_all, fields(key = %key, members = collection.len()))]
    pub async fn save_collection(
        &self,
        key: &str,
        collection: &Collection,
        include: &[&str],
    ) -> Result<(), CacheError> {
        let elements = ripper::rip_collection(key, collection, include);
        self.write_elements(elements).await
    }

    /// Reconstruct a single-resource document from the entry at `key`.
    ///
    /// `key` is an entity key (`"books.5"`) or whatever logical key the
    /// primary was ripped under.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn get_resource(&self, key: &str, include: &[&str]) -> Result<Document, CacheError> {
        self.count_read(assembler::assemble_resource(&self.store, key, include).await)
    }

    /// Reconstruct a collection document from the index entry at `key`.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn get_collection(
        &self,
        key: &str,
        include: &[&str],
    ) -> Result<Document, CacheError> {
        self.count_read(assembler::assemble_collection(&self.store, key, include).await)
    }

    /// Drop the entry at the resource's entity key.
    ///
    /// Entries ripped as relationship targets of other saves are untouched;
    /// only the addressed entry is removed.
    pub async fn remove_resource(&self, resource: &Resource) -> Result<(), CacheError> {
        self.store.delete(&keys::key_for(resource)).await
    }

    /// Drop the index entry at `key`. Member entries are untouched.
    pub async fn remove_collection(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key).await
    }

    async fn write_elements(&self, elements: Vec<CacheElement>) -> Result<(), CacheError> {
        let stamp = unix_ms(OffsetDateTime::now_utc());
        let written = elements.len();

        let writes = elements.into_iter().map(|element| {
            let CacheElement { key, content } = element;
            async move {
                self.store
                    .set(
                        &key,
                        CacheEntry {
                            content,
                            updated_at: stamp,
                        },
                    )
                    .await
            }
        });
        future::try_join_all(writes).await?;

        counter!(telemetry::METRIC_CACHE_ELEMENTS_WRITTEN_TOTAL).increment(written as u64);
        debug!(elements = written, "cache elements written");
        Ok(())
    }

    fn count_read(&self, result: Result<Document, CacheError>) -> Result<Document, CacheError> {
        match &result {
            Ok(_) => {
                counter!(telemetry::METRIC_CACHE_HIT_TOTAL).increment(1);
            }
            Err(err) if err.is_not_found() => {
                counter!(telemetry::METRIC_CACHE_MISS_TOTAL).increment(1);
                debug!(outcome = "miss", "primary key absent from cache");
            }
            Err(_) => {}
        }
        result
    }
}

fn unix_ms(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}
