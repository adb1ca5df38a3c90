//! End-to-end rip/assemble round-trips over the in-memory store.
//!
//! Exercises the public facade the way an application would: save a resource
//! or collection, read the document back, and check shape, ordering,
//! deduplication, and freshness.

use serde_json::json;
use sfoglia::{
    CacheError, Collection, DocumentCache, LinkageData, MemoryStore, Related, Resource,
};
use time::OffsetDateTime;

fn sample_author(id: &str, name: &str) -> Resource {
    let mut author = Resource::new("authors", id);
    author.set_attribute("name", json!(name));
    author
}

fn sample_book(id: &str, title: &str) -> Resource {
    let mut book = Resource::new("books", id);
    book.set_attribute("title", json!(title));
    book
}

fn now_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

// ============================================================================
// Resource round-trips
// ============================================================================

#[tokio::test]
async fn resource_without_relationships_roundtrips_structurally() {
    let cache = DocumentCache::new(MemoryStore::new());
    let book = sample_book("5", "Fahrenheit 451");

    let key = cache.save_resource(&book, &[]).await.expect("save");
    let document = cache.get_resource(&key, &[]).await.expect("get");

    let data = document.data.as_one().expect("single primary");
    assert_eq!(data.id, "5");
    assert_eq!(data.kind, "books");
    assert_eq!(data.attributes["title"], json!("Fahrenheit 451"));
    assert!(data.relationships.is_empty());
    assert!(document.included.is_empty());
}

#[tokio::test]
async fn inlined_relationships_are_stored_reference_only() {
    let cache = DocumentCache::new(MemoryStore::new());
    let mut book = sample_book("5", "Fahrenheit 451");
    book.relate_one(
        "author",
        Related::inlined(sample_author("2", "Ray Bradbury")),
    );

    let key = cache.save_resource(&book, &[]).await.expect("save");
    let document = cache.get_resource(&key, &[]).await.expect("get");

    let data = document.data.as_one().expect("single primary");
    let linkage = serde_json::to_value(&data.relationships["author"].data)
        .expect("serialize linkage");
    assert_eq!(linkage, json!({ "id": "2", "type": "authors" }));
}

#[tokio::test]
async fn include_expands_the_saved_target() {
    let cache = DocumentCache::new(MemoryStore::new());
    let mut book = sample_book("5", "Fahrenheit 451");
    book.relate_one(
        "author",
        Related::inlined(sample_author("2", "Ray Bradbury")),
    );

    let key = cache.save_resource(&book, &["author"]).await.expect("save");
    let document = cache.get_resource(&key, &["author"]).await.expect("get");

    assert_eq!(document.included.len(), 1);
    assert_eq!(document.included[0].id, "2");
    assert_eq!(document.included[0].kind, "authors");
    assert_eq!(document.included[0].attributes["name"], json!("Ray Bradbury"));
}

#[tokio::test]
async fn null_to_one_linkage_roundtrips_without_error() {
    let cache = DocumentCache::new(MemoryStore::new());
    let mut book = sample_book("5", "Fahrenheit 451");
    book.relate_none("author");

    let key = cache.save_resource(&book, &["author"]).await.expect("save");
    let document = cache.get_resource(&key, &["author"]).await.expect("get");

    assert!(document.included.is_empty());
    let data = document.data.as_one().expect("single primary");
    assert_eq!(data.relationships["author"].data, LinkageData::Empty);
}

#[tokio::test]
async fn fresh_resource_carries_a_recent_updated_at() {
    let cache = DocumentCache::new(MemoryStore::new());
    let key = cache
        .save_resource(&sample_book("5", "Fahrenheit 451"), &[])
        .await
        .expect("save");

    let document = cache.get_resource(&key, &[]).await.expect("get");

    let now = now_ms();
    assert!(document.meta.cache_updated_at >= now - 100);
    assert!(document.meta.cache_updated_at <= now);
}

#[tokio::test]
async fn unknown_resource_key_rejects_with_not_found() {
    let cache = DocumentCache::new(MemoryStore::new());
    let err = cache
        .get_resource("extrange_type.id", &[])
        .await
        .expect_err("absent key");
    assert!(matches!(err, CacheError::NotFound { .. }));
}

// ============================================================================
// Collection round-trips
// ============================================================================

fn sample_collection() -> Collection {
    // authors [2, 1]; author 1 wrote books [1, 2]; book 1 links back.
    let mut collection = Collection::new();
    collection.push(sample_author("2", "Aldous Huxley"));

    let mut author1 = sample_author("1", "Ray Bradbury");
    let mut book1 = sample_book("1", "The Martian Chronicles");
    book1.relate_one("author", Related::inlined(sample_author("1", "Ray Bradbury")));
    author1.relate_many("books", Related::inlined(book1));

    let mut book2 = sample_book("2", "The Illustrated Man");
    book2.relate_one("author", Related::reference("authors", "1"));
    author1.relate_many("books", Related::inlined(book2));

    collection.push(author1);
    collection
}

#[tokio::test]
async fn collection_data_preserves_insertion_order() {
    let cache = DocumentCache::new(MemoryStore::new());
    cache
        .save_collection("some/url", &sample_collection(), &[])
        .await
        .expect("save");

    let document = cache.get_collection("some/url", &[]).await.expect("get");

    let members = document.data.as_many().expect("primary list");
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].id, "2");
    assert_eq!(members[1].id, "1");
    assert_eq!(members[1].attributes["name"], json!("Ray Bradbury"));

    let linkage = serde_json::to_value(&members[1].relationships["books"].data)
        .expect("serialize linkage");
    assert_eq!(
        linkage,
        json!([
            { "id": "1", "type": "books" },
            { "id": "2", "type": "books" }
        ])
    );
}

#[tokio::test]
async fn collection_include_expands_member_relationships() {
    let cache = DocumentCache::new(MemoryStore::new());
    cache
        .save_collection("some/url/include", &sample_collection(), &["books"])
        .await
        .expect("save");

    let document = cache
        .get_collection("some/url/include", &["books"])
        .await
        .expect("get");

    assert_eq!(document.data.as_many().expect("primary list").len(), 2);
    assert_eq!(document.included.len(), 2);
    assert_eq!(document.included[0].id, "1");
    assert_eq!(document.included[1].id, "2");
    assert_eq!(document.included[1].kind, "books");

    let linkage = serde_json::to_value(&document.included[1].relationships["author"].data)
        .expect("serialize linkage");
    assert_eq!(linkage, json!({ "id": "1", "type": "authors" }));
}

#[tokio::test]
async fn members_stay_independently_fetchable() {
    let cache = DocumentCache::new(MemoryStore::new());
    cache
        .save_collection("some/url", &sample_collection(), &["books"])
        .await
        .expect("save");

    let document = cache.get_resource("authors.1", &["books"]).await.expect("get");
    assert_eq!(
        document.data.as_one().expect("single primary").id,
        "1"
    );
    assert_eq!(document.included.len(), 2);
}

#[tokio::test]
async fn shared_related_entity_is_written_once() {
    let cache = DocumentCache::new(MemoryStore::new());

    let shared = sample_author("7", "Ursula K. Le Guin");
    let mut book1 = sample_book("1", "A Wizard of Earthsea");
    book1.relate_one("author", Related::inlined(shared.clone()));
    let mut book2 = sample_book("2", "The Dispossessed");
    book2.relate_one("author", Related::inlined(shared));

    let mut collection = Collection::new();
    collection.push(book1);
    collection.push(book2);

    cache
        .save_collection("books/by-author", &collection, &["author"])
        .await
        .expect("save");

    let store = cache.store();
    // index + two members + one shared author
    assert_eq!(store.len(), 4);

    let document = cache
        .get_collection("books/by-author", &["author"])
        .await
        .expect("get");
    assert_eq!(document.included.len(), 1);
    assert_eq!(document.included[0].id, "7");
}

#[tokio::test]
async fn fresh_collection_carries_a_recent_updated_at() {
    let cache = DocumentCache::new(MemoryStore::new());
    cache
        .save_collection("some/url", &sample_collection(), &[])
        .await
        .expect("save");

    let document = cache.get_collection("some/url", &[]).await.expect("get");

    let now = now_ms();
    assert!(document.meta.cache_updated_at >= now - 100);
    assert!(document.meta.cache_updated_at <= now);
}

#[tokio::test]
async fn unknown_collection_url_rejects_with_not_found() {
    let cache = DocumentCache::new(MemoryStore::new());
    let err = cache
        .get_collection("some/bad/url", &[])
        .await
        .expect_err("absent key");
    assert!(matches!(err, CacheError::NotFound { .. }));
}
