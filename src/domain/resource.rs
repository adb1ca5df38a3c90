//! Caller-owned resources and their relationship linkages.
//!
//! A [`Resource`] is a read-only input to the ripping side of the cache. Its
//! relationship targets may carry the related resource's full data inlined
//! ([`Related::Inlined`]) or only a `{id, type}` reference
//! ([`Related::Reference`]); only inlined targets can be flattened into their
//! own cache entries.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::wire::Identifier;

/// One domain object: identifier, type, opaque attribute bag, relationships.
///
/// `(kind, id)` uniquely identifies a resource across the whole cache. The
/// attribute bag is never inspected by the cache, only passed through.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: String,
    /// Pluralized category name, e.g. `"books"`. Serialized as `type`.
    pub kind: String,
    pub attributes: Map<String, Value>,
    pub relationships: BTreeMap<String, Linkage>,
}

impl Resource {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            attributes: Map::new(),
            relationships: BTreeMap::new(),
        }
    }

    pub fn identifier(&self) -> Identifier {
        Identifier {
            id: self.id.clone(),
            kind: self.kind.clone(),
        }
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    /// Set a to-one relationship.
    pub fn relate_one(&mut self, name: impl Into<String>, related: Related) {
        self.relationships.insert(name.into(), Linkage::ToOne(related));
    }

    /// Set an empty (`data: null`) relationship.
    pub fn relate_none(&mut self, name: impl Into<String>) {
        self.relationships.insert(name.into(), Linkage::Empty);
    }

    /// Append a target to a to-many relationship, preserving insertion order.
    ///
    /// An existing to-one or empty linkage under `name` is replaced by a
    /// to-many linkage holding its prior target (if any) plus the new one.
    pub fn relate_many(&mut self, name: impl Into<String>, related: Related) {
        let linkage = self
            .relationships
            .entry(name.into())
            .or_insert(Linkage::ToMany(Vec::new()));
        match linkage {
            Linkage::ToMany(targets) => targets.push(related),
            other => {
                let mut targets = match std::mem::replace(other, Linkage::Empty) {
                    Linkage::ToOne(existing) => vec![existing],
                    _ => Vec::new(),
                };
                targets.push(related);
                *other = Linkage::ToMany(targets);
            }
        }
    }
}

/// A relationship payload: no target, one target, or an ordered target list.
///
/// To-many target order is preserved verbatim from the source; it is not
/// sorted or deduplicated at this layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Linkage {
    Empty,
    ToOne(Related),
    ToMany(Vec<Related>),
}

impl Linkage {
    /// Iterate the linkage targets, in linkage order.
    pub fn targets(&self) -> impl Iterator<Item = &Related> {
        let targets: &[Related] = match self {
            Linkage::ToMany(targets) => targets,
            Linkage::ToOne(target) => std::slice::from_ref(target),
            Linkage::Empty => &[],
        };
        targets.iter()
    }
}

/// A relationship target: a bare reference, or the related resource inlined.
#[derive(Debug, Clone, PartialEq)]
pub enum Related {
    Reference(Identifier),
    Inlined(Box<Resource>),
}

impl Related {
    pub fn reference(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Related::Reference(Identifier::new(kind, id))
    }

    pub fn inlined(resource: Resource) -> Self {
        Related::Inlined(Box::new(resource))
    }

    pub fn identifier(&self) -> Identifier {
        match self {
            Related::Reference(identifier) => identifier.clone(),
            Related::Inlined(resource) => resource.identifier(),
        }
    }

    /// The inlined resource, when this target carries one.
    pub fn resource(&self) -> Option<&Resource> {
        match self {
            Related::Reference(_) => None,
            Related::Inlined(resource) => Some(resource),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn relate_many_preserves_insertion_order() {
        let mut author = Resource::new("authors", "1");
        author.relate_many("books", Related::reference("books", "9"));
        author.relate_many("books", Related::reference("books", "1"));

        let ids: Vec<String> = author.relationships["books"]
            .targets()
            .map(|t| t.identifier().id)
            .collect();
        assert_eq!(ids, ["9", "1"]);
    }

    #[test]
    fn relate_many_upgrades_a_to_one_linkage() {
        let mut book = Resource::new("books", "5");
        book.relate_one("author", Related::reference("authors", "2"));
        book.relate_many("author", Related::reference("authors", "3"));

        let ids: Vec<String> = book.relationships["author"]
            .targets()
            .map(|t| t.identifier().id)
            .collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn inlined_target_exposes_its_resource_and_identifier() {
        let mut author = Resource::new("authors", "2");
        author.set_attribute("name", json!("Ray Bradbury"));

        let related = Related::inlined(author);
        assert_eq!(related.identifier(), Identifier::new("authors", "2"));
        assert_eq!(
            related.resource().expect("inlined data").attributes["name"],
            json!("Ray Bradbury")
        );

        let reference = Related::reference("authors", "2");
        assert!(reference.resource().is_none());
    }
}
