//! Parsed-document caching for persisted and repeated queries.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use wireql_parser::Document;

/// A read-only view of a parsed-document cache, keyed by query id or
/// query hash.
///
/// The envelope parser only ever *reads* the cache: populating it after
/// a miss is the caller's responsibility. Implementations must support
/// concurrent lookups; the envelope parser provides no
/// at-most-once-parse guarantee per key, so two callers that miss on the
/// same key may both parse the same document.
pub trait DocumentCache {
    /// Looks up a previously parsed document by key.
    fn try_get(&self, key: &str) -> Option<Arc<Document>>;
}

/// A simple in-process cache over a `HashMap` behind a `RwLock`.
#[derive(Debug, Default)]
pub struct HashMapDocumentCache {
    inner: RwLock<HashMap<String, Arc<Document>>>,
}

impl HashMapDocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a parsed document under `key`.
    pub fn insert(&self, key: impl Into<String>, document: Arc<Document>) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.into(), document);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map_or(0, |map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentCache for HashMapDocumentCache {
    fn try_get(&self, key: &str) -> Option<Arc<Document>> {
        self.inner.read().ok()?.get(key).cloned()
    }
}
