//! GraphQL request-envelope parsing.
//!
//! Extracts GraphQL operations from JSON-shaped request payloads
//! (single or batched), resolves persisted queries through a pluggable
//! [`DocumentCache`] keyed by client-supplied id or computed
//! [`QueryHasher`] hash, and hands raw query text to `wireql-parser` on
//! cache misses. Also provides a generic positioned JSON parser and
//! subscription-transport socket framing.

mod cache;
mod envelope;
mod hash;
mod json;
mod socket;

pub use cache::{DocumentCache, HashMapDocumentCache};
pub use envelope::{GraphQLRequest, parse_request};
pub use hash::{HashEncoding, QueryHasher, Sha256QueryHasher};
pub use json::parse_json;
pub use socket::{SocketMessage, parse_socket_message};

#[cfg(test)]
mod tests;
