//! Tests for document caching and query hashing.

use std::sync::Arc;

use wireql_parser::{ParserOptions, parse_document};

use crate::{
    DocumentCache, HashMapDocumentCache, QueryHasher, Sha256QueryHasher,
    parse_request,
};

// Well-known SHA-256 digests.
const EMPTY_SHA256_HEX: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const ABC_SHA256_HEX: &str =
    "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const EMPTY_SHA256_BASE64: &str = "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=";

#[test]
fn sha256_hasher_encodings() {
    let hex = Sha256QueryHasher::hex();
    assert_eq!(hex.compute_hash(b""), EMPTY_SHA256_HEX);
    assert_eq!(hex.compute_hash(b"abc"), ABC_SHA256_HEX);

    let base64 = Sha256QueryHasher::base64();
    assert_eq!(base64.compute_hash(b""), EMPTY_SHA256_BASE64);
}

#[test]
fn hashmap_cache_stores_and_returns_documents() {
    let cache = HashMapDocumentCache::new();
    assert!(cache.is_empty());
    assert!(cache.try_get("k").is_none());

    let document =
        Arc::new(parse_document("{ x }", ParserOptions::default()).unwrap());
    cache.insert("k", document.clone());
    assert_eq!(cache.len(), 1);
    assert!(Arc::ptr_eq(&cache.try_get("k").unwrap(), &document));
}

/// A cache hit reuses the stored AST: the returned document is
/// reference-identical to the cached one, and no re-parse occurs.
#[test]
fn cache_hit_reuses_the_stored_document() {
    let cache = HashMapDocumentCache::new();
    let hasher = Sha256QueryHasher::hex();

    let document =
        Arc::new(parse_document("{ x }", ParserOptions::default()).unwrap());
    let key = hasher.compute_hash(b"{ x }");
    cache.insert(key.clone(), document.clone());

    let requests = parse_request(
        br#"{"query": "{ x }"}"#,
        ParserOptions::default(),
        Some(&cache),
        Some(&hasher),
    )
    .unwrap();
    let request = &requests[0];
    assert!(Arc::ptr_eq(request.query.as_ref().unwrap(), &document));
    assert_eq!(request.query_hash.as_deref(), Some(key.as_str()));
}

/// An explicit client-supplied id takes precedence over hashing as the
/// cache key.
#[test]
fn explicit_id_overrides_the_computed_key() {
    let cache = HashMapDocumentCache::new();
    let hasher = Sha256QueryHasher::hex();

    let document =
        Arc::new(parse_document("{ y }", ParserOptions::default()).unwrap());
    cache.insert("client-key", document.clone());

    let requests = parse_request(
        br#"{"id": "client-key", "query": "{ x }"}"#,
        ParserOptions::default(),
        Some(&cache),
        Some(&hasher),
    )
    .unwrap();
    let request = &requests[0];
    assert!(Arc::ptr_eq(request.query.as_ref().unwrap(), &document));
    assert_eq!(request.query_hash.as_deref(), Some("client-key"));
}

/// On a miss the query is parsed fresh; the envelope parser never
/// populates the cache itself.
#[test]
fn cache_miss_parses_and_never_writes() {
    let cache = HashMapDocumentCache::new();
    let hasher = Sha256QueryHasher::hex();

    let requests = parse_request(
        br#"{"query": "{ x }"}"#,
        ParserOptions::default(),
        Some(&cache),
        Some(&hasher),
    )
    .unwrap();
    let request = &requests[0];
    assert!(request.query.is_some());
    assert_eq!(
        request.query_hash.as_deref(),
        Some(hasher.compute_hash(b"{ x }").as_str())
    );
    assert!(cache.is_empty());
}

/// The hash key is computed over the raw still-escaped query bytes.
#[test]
fn hash_covers_raw_escaped_bytes() {
    let cache = HashMapDocumentCache::new();
    let hasher = Sha256QueryHasher::hex();

    let requests = parse_request(
        br#"{"query": "{ f(a: \"v\") }"}"#,
        ParserOptions::default(),
        Some(&cache),
        Some(&hasher),
    )
    .unwrap();
    let expected = hasher.compute_hash(br#"{ f(a: \"v\") }"#);
    assert_eq!(requests[0].query_hash.as_deref(), Some(expected.as_str()));
}

/// A persisted-query reference resolves through the cache by id.
#[test]
fn id_only_request_resolves_through_the_cache() {
    let cache = HashMapDocumentCache::new();
    let hasher = Sha256QueryHasher::hex();

    let document =
        Arc::new(parse_document("{ z }", ParserOptions::default()).unwrap());
    cache.insert("persisted-1", document.clone());

    let requests = parse_request(
        br#"{"id": "persisted-1"}"#,
        ParserOptions::default(),
        Some(&cache),
        Some(&hasher),
    )
    .unwrap();
    let request = &requests[0];
    assert!(Arc::ptr_eq(request.query.as_ref().unwrap(), &document));
    assert_eq!(request.query_hash.as_deref(), Some("persisted-1"));
}
