//! Cache key derivation.
//!
//! Entity keys are `"<type>.<id>"`, derived identically on the write path
//! (when the ripper emits a relationship target) and the read path (when the
//! assembler resolves one), so the two can never diverge. Caller-chosen
//! logical keys (routes, URLs) address collection entries and pass through
//! verbatim: no transformation, no escaping.

use crate::domain::resource::Resource;
use crate::domain::wire::Identifier;

/// Separates type from id in an entity key.
pub const KEY_SEPARATOR: char = '.';

/// Derive the entity cache key for a `(type, id)` pair.
///
/// Injective over valid pairs: types are pluralized category names and never
/// contain the separator.
pub fn resource_key(kind: &str, id: &str) -> String {
    format!("{kind}{KEY_SEPARATOR}{id}")
}

/// Derive the entity cache key for a resource.
pub fn key_for(resource: &Resource) -> String {
    resource_key(&resource.kind, &resource.id)
}

/// Derive the entity cache key for a bare reference.
pub fn identifier_key(identifier: &Identifier) -> String {
    resource_key(&identifier.kind, &identifier.id)
}
