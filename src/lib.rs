//! Sfoglia
//!
//! A normalization cache for JSON:API-style documents: hierarchical
//! resource/relationship documents are *ripped* into flat, independently
//! cacheable entries, and reconstructed (with optional relationship
//! expansion) from those entries on demand.
//!
//! ## Usage
//!
//! ```no_run
//! use serde_json::json;
//! use sfoglia::{DocumentCache, MemoryStore, Related, Resource};
//!
//! # async fn demo() -> Result<(), sfoglia::CacheError> {
//! let cache = DocumentCache::new(MemoryStore::new());
//!
//! let mut book = Resource::new("books", "5");
//! book.set_attribute("title", json!("Fahrenheit 451"));
//! book.relate_one("author", Related::reference("authors", "2"));
//!
//! let key = cache.save_resource(&book, &[]).await?;
//! let document = cache.get_resource(&key, &["author"]).await?;
//! # let _ = document;
//! # Ok(())
//! # }
//! ```
//!
//! Persistence is pluggable: implement [`Store`] over any async key-value
//! mechanism, or use the in-process [`MemoryStore`].

pub mod cache;
pub mod domain;
pub mod telemetry;

pub use cache::{
    CacheElement, CacheEntry, CacheError, DocumentCache, ElementContent, MemoryStore, Store,
};
pub use domain::collection::Collection;
pub use domain::resource::{Linkage, Related, Resource};
pub use domain::wire::{
    Document, DocumentMeta, Identifier, LinkageData, PrimaryData, RelationshipObject,
    ResourceObject,
};
