//! Wire document shapes.
//!
//! The serde-serializable form shared by both sides of the cache: ripped
//! entries store resource objects, and assembly returns them wrapped in a
//! [`Document`]. Field names follow the JSON:API convention (`type`, `data`,
//! `included`, `meta`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bare `{id, type}` reference to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Identifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

/// A full resource object: `{id, type, attributes, relationships}`.
///
/// Relationship payloads are always reference-only at this layer; inlined
/// related data never crosses the cache boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Map<String, Value>,
    pub relationships: BTreeMap<String, RelationshipObject>,
}

impl ResourceObject {
    pub fn identifier(&self) -> Identifier {
        Identifier {
            id: self.id.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// A single relationship entry: `{data: null | {id, type} | [{id, type}, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
    pub data: LinkageData,
}

/// Reference-only linkage payload.
///
/// Serializes as `null`, an identifier object, or an identifier array. The
/// untagged variant order matters for deserialization: arrays first, then
/// objects, then null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkageData {
    ToMany(Vec<Identifier>),
    ToOne(Identifier),
    Empty,
}

impl LinkageData {
    /// Iterate the referenced identifiers, in linkage order.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        let references: &[Identifier] = match self {
            LinkageData::ToMany(references) => references,
            LinkageData::ToOne(reference) => std::slice::from_ref(reference),
            LinkageData::Empty => &[],
        };
        references.iter()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LinkageData::Empty)
    }
}

/// The reconstructed document returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub data: PrimaryData,
    pub included: Vec<ResourceObject>,
    pub meta: DocumentMeta,
}

/// Primary data: one resource or an ordered list of resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(ResourceObject),
    Many(Vec<ResourceObject>),
}

impl PrimaryData {
    /// The single primary resource, if this document carries one.
    pub fn as_one(&self) -> Option<&ResourceObject> {
        match self {
            PrimaryData::One(resource) => Some(resource),
            PrimaryData::Many(_) => None,
        }
    }

    /// The ordered primary list, if this document carries one.
    pub fn as_many(&self) -> Option<&[ResourceObject]> {
        match self {
            PrimaryData::One(_) => None,
            PrimaryData::Many(resources) => Some(resources),
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// When the backing cache entry was last written, in epoch milliseconds.
    #[serde(rename = "_cache_updated_at")]
    pub cache_updated_at: i64,
}
