//! Query hashing for cache keys.
//!
//! When a request carries no explicit query id, the envelope parser
//! derives a cache key by hashing the raw query bytes. The hash is
//! computed over the still-escaped bytes exactly as they appear in the
//! JSON payload, so the same literal query text always produces the
//! same key without paying for unescaping on cache hits.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Derives a cache key from raw query bytes.
pub trait QueryHasher {
    fn compute_hash(&self, query: &[u8]) -> String;
}

/// Output encoding for [`Sha256QueryHasher`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HashEncoding {
    /// Lowercase hex, 64 characters.
    #[default]
    Hex,
    /// Standard base64 with padding, 44 characters. Matches the
    /// persisted-query convention of transports that ship base64 hashes.
    Base64,
}

/// SHA-256 over the raw query bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256QueryHasher {
    encoding: HashEncoding,
}

impl Sha256QueryHasher {
    pub fn new(encoding: HashEncoding) -> Self {
        Self { encoding }
    }

    pub fn hex() -> Self {
        Self::new(HashEncoding::Hex)
    }

    pub fn base64() -> Self {
        Self::new(HashEncoding::Base64)
    }
}

impl QueryHasher for Sha256QueryHasher {
    fn compute_hash(&self, query: &[u8]) -> String {
        let digest = Sha256::digest(query);
        match self.encoding {
            HashEncoding::Hex => format!("{digest:x}"),
            HashEncoding::Base64 => STANDARD.encode(digest),
        }
    }
}
