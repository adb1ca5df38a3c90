//! Assembly: reconstructing wire documents from flattened cache entries.
//!
//! Assembly is the inverse of ripping. The primary key must resolve (a miss
//! is the read path's only hard failure); everything reached from it is
//! best-effort. A referenced entity that was never ripped, or a collection
//! member that has gone missing, is skipped silently: the cache may simply
//! not hold it yet.
//!
//! Store lookups are independent and read-only, so they are issued
//! concurrently.

use std::collections::HashSet;

use futures::future;
use tracing::debug;

use crate::cache::element::ElementContent;
use crate::cache::error::CacheError;
use crate::cache::keys;
use crate::cache::store::Store;
use crate::domain::wire::{Document, DocumentMeta, Identifier, PrimaryData, ResourceObject};

/// Reconstruct a single-resource document from the entry at `key`.
///
/// `included` carries each include name's resolved targets, deduplicated by
/// `(type, id)` across all names in first-seen order, excluding the primary
/// itself. The document's freshness is the primary entry's write timestamp.
pub async fn assemble_resource<S: Store + ?Sized>(
    store: &S,
    key: &str,
    include: &[&str],
) -> Result<Document, CacheError> {
    let entry = store.get(key).await?;
    let ElementContent::Resource { data } = entry.content else {
        return Err(CacheError::malformed(
            key,
            "expected a resource entry, found a collection index",
        ));
    };

    let mut seen: HashSet<Identifier> = HashSet::new();
    seen.insert(data.identifier());
    let included = resolve_included(store, std::slice::from_ref(&data), include, &mut seen).await?;

    Ok(Document {
        data: PrimaryData::One(data),
        included,
        meta: DocumentMeta {
            cache_updated_at: entry.updated_at,
        },
    })
}

/// Reconstruct a collection document from the index entry at `key`.
///
/// Members are fetched in stored key order; a missing member is skipped
/// rather than failing the whole read. `included` is the union of per-member
/// include resolution, members in list order, include names in caller order
/// within a member. The document's freshness is the index entry's own write
/// timestamp, not its members'.
pub async fn assemble_collection<S: Store + ?Sized>(
    store: &S,
    key: &str,
    include: &[&str],
) -> Result<Document, CacheError> {
    let entry = store.get(key).await?;
    let ElementContent::Index { keys: member_keys } = entry.content else {
        return Err(CacheError::malformed(
            key,
            "expected a collection index, found a resource entry",
        ));
    };

    let lookups = member_keys.iter().map(|member_key| store.get(member_key));
    let results = future::join_all(lookups).await;

    let mut members: Vec<ResourceObject> = Vec::with_capacity(member_keys.len());
    for (member_key, result) in member_keys.iter().zip(results) {
        match result {
            Ok(member_entry) => match member_entry.content {
                ElementContent::Resource { data } => members.push(data),
                ElementContent::Index { .. } => {
                    debug!(key = %member_key, "skipping member with index-shaped entry");
                }
            },
            Err(CacheError::NotFound { .. }) => {
                debug!(key = %member_key, "skipping missing collection member");
            }
            Err(err) => return Err(err),
        }
    }

    let mut seen: HashSet<Identifier> = members.iter().map(ResourceObject::identifier).collect();
    let included = resolve_included(store, &members, include, &mut seen).await?;

    Ok(Document {
        data: PrimaryData::Many(members),
        included,
        meta: DocumentMeta {
            cache_updated_at: entry.updated_at,
        },
    })
}

/// Resolve the include set against `sources`, collecting found entities.
///
/// `seen` carries the identifiers already present in the document; every
/// identifier consumed here is added to it, so the result is deduplicated in
/// first-seen order across sources and include names.
async fn resolve_included<S: Store + ?Sized>(
    store: &S,
    sources: &[ResourceObject],
    include: &[&str],
    seen: &mut HashSet<Identifier>,
) -> Result<Vec<ResourceObject>, CacheError> {
    let mut pending: Vec<Identifier> = Vec::new();
    for source in sources {
        for name in include {
            let Some(relationship) = source.relationships.get(*name) else {
                continue;
            };
            for identifier in relationship.data.identifiers() {
                if seen.insert(identifier.clone()) {
                    pending.push(identifier.clone());
                }
            }
        }
    }

    let pending_keys: Vec<String> = pending.iter().map(keys::identifier_key).collect();
    let results = future::join_all(pending_keys.iter().map(|key| store.get(key))).await;

    let mut included = Vec::with_capacity(pending_keys.len());
    for (pending_key, result) in pending_keys.iter().zip(results) {
        match result {
            Ok(entry) => match entry.content {
                ElementContent::Resource { data } => included.push(data),
                ElementContent::Index { .. } => {
                    debug!(key = %pending_key, "skipping include target with index-shaped entry");
                }
            },
            Err(CacheError::NotFound { .. }) => {
                debug!(key = %pending_key, "skipping include target not present in cache");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(included)
}
