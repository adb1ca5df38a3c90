//! Ripping: flattening hierarchical documents into independent cache elements.
//!
//! Ripping walks a resource (or a collection of resources) plus a set of
//! relationship names to include, and produces the flat `{key, content}`
//! elements to write. Every emitted resource has its relationships reduced to
//! reference-only form; inlined related data is lifted into elements of its
//! own instead of travelling with its parent. Include resolution is one level
//! deep: the named relationship's targets are emitted, their own
//! relationships are not chased further.

use std::collections::{BTreeMap, HashSet};

use crate::cache::element::{CacheElement, ElementContent};
use crate::cache::keys;
use crate::domain::collection::Collection;
use crate::domain::resource::{Linkage, Resource};
use crate::domain::wire::{LinkageData, RelationshipObject, ResourceObject};

/// Rip a single resource into cache elements.
///
/// The primary element is keyed by `key` (the caller's choice: the resource's
/// own entity key, or any logical key); it is always first in the output.
/// Included elements follow, keyed by their entity keys, in include-name
/// order and then linkage order for to-many. Targets that appear more than
/// once are emitted once; targets carrying only a bare reference are omitted,
/// since there is no data to write for them.
pub fn rip_resource(key: &str, resource: &Resource, include: &[&str]) -> Vec<CacheElement> {
    let mut elements = vec![CacheElement {
        key: key.to_string(),
        content: ElementContent::Resource {
            data: to_resource_object(resource),
        },
    }];

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(key.to_string());
    append_included(resource, include, &mut elements, &mut seen);

    elements
}

/// Rip a collection into an index element plus per-member elements.
///
/// The index element is keyed by `key` and carries the member entity keys in
/// exact collection order (not sorted). Each member then gets its own
/// entity-keyed element so it stays independently fetchable, followed by its
/// resolved includes. Entities shared between members are emitted once.
pub fn rip_collection(key: &str, collection: &Collection, include: &[&str]) -> Vec<CacheElement> {
    let member_keys: Vec<String> = collection.iter().map(keys::key_for).collect();

    let mut elements = vec![CacheElement {
        key: key.to_string(),
        content: ElementContent::Index { keys: member_keys },
    }];

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(key.to_string());

    for member in collection.iter() {
        let member_key = keys::key_for(member);
        if seen.insert(member_key.clone()) {
            elements.push(CacheElement {
                key: member_key,
                content: ElementContent::Resource {
                    data: to_resource_object(member),
                },
            });
        }
        append_included(member, include, &mut elements, &mut seen);
    }

    elements
}

/// Emit one element per distinct resolvable include target of `resource`.
fn append_included(
    resource: &Resource,
    include: &[&str],
    elements: &mut Vec<CacheElement>,
    seen: &mut HashSet<String>,
) {
    for name in include {
        let Some(linkage) = resource.relationships.get(*name) else {
            continue;
        };
        for target in linkage.targets() {
            // Bare references have no data to rip; the target is expected to
            // be ripped independently elsewhere.
            let Some(related) = target.resource() else {
                continue;
            };
            let related_key = keys::key_for(related);
            if !seen.insert(related_key.clone()) {
                continue;
            }
            elements.push(CacheElement {
                key: related_key,
                content: ElementContent::Resource {
                    data: to_resource_object(related),
                },
            });
        }
    }
}

/// Project a resource into its wire shape, linkages reduced to references.
fn to_resource_object(resource: &Resource) -> ResourceObject {
    let relationships: BTreeMap<String, RelationshipObject> = resource
        .relationships
        .iter()
        .map(|(name, linkage)| {
            (
                name.clone(),
                RelationshipObject {
                    data: to_linkage_data(linkage),
                },
            )
        })
        .collect();

    ResourceObject {
        id: resource.id.clone(),
        kind: resource.kind.clone(),
        attributes: resource.attributes.clone(),
        relationships,
    }
}

fn to_linkage_data(linkage: &Linkage) -> LinkageData {
    match linkage {
        Linkage::Empty => LinkageData::Empty,
        Linkage::ToOne(target) => LinkageData::ToOne(target.identifier()),
        Linkage::ToMany(targets) => {
            LinkageData::ToMany(targets.iter().map(|t| t.identifier()).collect())
        }
    }
}
