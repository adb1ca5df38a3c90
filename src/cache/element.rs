//! Cache element and entry shapes.
//!
//! A [`CacheElement`] is one ripper output: a key plus the content to write
//! under it. The store holds a [`CacheEntry`], which pairs that content with
//! the timestamp stamped at write time. Entries are overwritten wholesale on
//! every save of the same key; there is no partial update.

use serde::{Deserialize, Serialize};

use crate::domain::wire::ResourceObject;

/// One unit of ripper output, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheElement {
    pub key: String,
    pub content: ElementContent,
}

/// The content stored under a cache key.
///
/// Either a wrapped resource document or a collection index carrying the
/// ordered member keys. Serializes to `{"data": ...}` or `{"keys": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementContent {
    Resource { data: ResourceObject },
    Index { keys: Vec<String> },
}

impl ElementContent {
    /// The wrapped resource, when this content holds one.
    pub fn as_resource(&self) -> Option<&ResourceObject> {
        match self {
            ElementContent::Resource { data } => Some(data),
            ElementContent::Index { .. } => None,
        }
    }
}

/// The record persisted in the store: content plus write timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content: ElementContent,
    /// Write time in epoch milliseconds; surfaced as `meta._cache_updated_at`.
    pub updated_at: i64,
}
