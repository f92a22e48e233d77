//! The request-envelope parser: extracts GraphQL operations from
//! JSON-shaped request payloads, single or batched.

use std::sync::Arc;

use serde_json::{Map, Value};
use wireql_parser::{
    Document, ParseError, ParserOptions, SyntaxError, UnescapeBuffer,
    parse_document, unescape_into,
};

use crate::cache::DocumentCache;
use crate::hash::QueryHasher;
use crate::json::JsonReader;

/// One GraphQL request extracted from a payload.
///
/// Immutable after construction; the execution layer consumes it as-is.
/// `query` is `None` when the request referenced a persisted query by id
/// and no configured cache held it (the id awaits a separate lookup).
#[derive(Clone, Debug)]
pub struct GraphQLRequest {
    pub operation_name: Option<String>,
    /// A named/persisted-query identifier supplied by the client.
    pub query_id: Option<String>,
    pub query: Option<Arc<Document>>,
    /// The cache key used (or that would be used) for this request:
    /// the explicit id if one was supplied, else the computed hash.
    /// Only populated when a cache and hasher are configured.
    pub query_hash: Option<String>,
    pub variables: Option<Map<String, Value>>,
    pub extensions: Option<Map<String, Value>>,
}

/// Parses a request payload into one or more [`GraphQLRequest`]s.
///
/// A `{...}` payload is a single request; a `[...]` payload is a batch.
/// With a cache and hasher configured, each request's document is looked
/// up by its explicit id (or, failing that, a hash of the raw query
/// bytes) before falling back to a full parse. The cache is never
/// written to here: populating it after a miss is the caller's job.
pub fn parse_request(
    payload: &[u8],
    options: ParserOptions,
    cache: Option<&dyn DocumentCache>,
    hasher: Option<&dyn QueryHasher>,
) -> Result<Vec<GraphQLRequest>, ParseError> {
    if payload.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut reader = JsonReader::new(payload);
    let requests = match reader.peek() {
        Some(b'{') => {
            vec![request_object(&mut reader, payload, options, cache, hasher)?]
        }
        Some(b'[') => {
            let mut requests = Vec::new();
            reader.expect(b'[')?;
            loop {
                requests.push(request_object(
                    &mut reader,
                    payload,
                    options,
                    cache,
                    hasher,
                )?);
                match reader.peek() {
                    Some(b',') => {
                        reader.expect(b',')?;
                    }
                    Some(b']') => {
                        reader.expect(b']')?;
                        break;
                    }
                    _ => {
                        return Err(reader
                            .error("expected `,` or `]` in batch")
                            .into());
                    }
                }
            }
            requests
        }
        _ => return Err(reader.error("unexpected request structure").into()),
    };
    reader.expect_end()?;
    Ok(requests)
}

/// The recognized request keys. Key bytes are compared raw, without
/// unescaping; the three id spellings share one slot, last one wins.
const KEY_OPERATION_NAME: &[u8] = b"operationName";
const KEY_QUERY: &[u8] = b"query";
const KEY_ID: &[u8] = b"id";
const KEY_QUERY_ID: &[u8] = b"queryId";
const KEY_DOCUMENT_ID: &[u8] = b"documentId";
const KEY_VARIABLES: &[u8] = b"variables";
const KEY_EXTENSIONS: &[u8] = b"extensions";

fn request_object(
    reader: &mut JsonReader<'_>,
    payload: &[u8],
    options: ParserOptions,
    cache: Option<&dyn DocumentCache>,
    hasher: Option<&dyn QueryHasher>,
) -> Result<GraphQLRequest, ParseError> {
    let object_start = reader.position();
    reader.expect(b'{')?;

    let mut operation_name: Option<String> = None;
    let mut query_id: Option<String> = None;
    let mut query_span: Option<(usize, usize)> = None;
    let mut variables: Option<Map<String, Value>> = None;
    let mut extensions: Option<Map<String, Value>> = None;

    if reader.peek() != Some(b'}') {
        loop {
            let (key_start, key_end) = reader.parse_string_raw()?;
            reader.expect(b':')?;

            let key = &payload[key_start..key_end];
            if key == KEY_OPERATION_NAME {
                operation_name = optional_string(reader, "operationName")?;
            } else if key == KEY_ID
                || key == KEY_QUERY_ID
                || key == KEY_DOCUMENT_ID
            {
                query_id = optional_string(reader, "query id")?;
            } else if key == KEY_QUERY {
                query_span = match reader.peek() {
                    Some(b'"') => Some(reader.parse_string_raw()?),
                    Some(b'n') => {
                        reader.skip_value()?;
                        None
                    }
                    _ => {
                        return Err(reader
                            .error("`query` must be a string or null")
                            .into());
                    }
                };
            } else if key == KEY_VARIABLES {
                variables = optional_object(reader, "variables")?;
            } else if key == KEY_EXTENSIONS {
                extensions = optional_object(reader, "extensions")?;
            } else {
                // Unrecognized keys are parsed to stay positioned, then
                // discarded.
                reader.skip_value()?;
            }

            match reader.peek() {
                Some(b',') => reader.expect(b',')?,
                Some(b'}') => break,
                _ => {
                    return Err(reader.error("expected `,` or `}`").into());
                }
            }
        }
    }
    reader.expect(b'}')?;

    if query_span.is_none() && query_id.is_none() {
        return Err(reader
            .error_at(
                object_start,
                "request provides neither a query nor a query id",
            )
            .into());
    }

    let (query, query_hash) = resolve_document(
        reader, payload, query_span, &query_id, options, cache, hasher,
    )?;

    Ok(GraphQLRequest {
        operation_name,
        query_id,
        query,
        query_hash,
        variables,
        extensions,
    })
}

/// Resolves the request's document: cache lookup by id/hash when a
/// cache and hasher are configured, else (or on miss) unescape and
/// parse the raw query bytes.
#[allow(clippy::too_many_arguments)]
fn resolve_document(
    reader: &JsonReader<'_>,
    payload: &[u8],
    query_span: Option<(usize, usize)>,
    query_id: &Option<String>,
    options: ParserOptions,
    cache: Option<&dyn DocumentCache>,
    hasher: Option<&dyn QueryHasher>,
) -> Result<(Option<Arc<Document>>, Option<String>), ParseError> {
    let Some((start, end)) = query_span else {
        // Persisted-query reference: resolve through the cache if
        // possible, else leave the document for a separate lookup.
        if let (Some(cache), Some(id)) = (cache, query_id) {
            return Ok((cache.try_get(id), Some(id.clone())));
        }
        return Ok((None, None));
    };

    let raw = &payload[start..end];
    let mut query_hash = None;
    if let (Some(cache), Some(hasher)) = (cache, hasher) {
        // The hash is computed over the raw still-escaped bytes.
        let key = match query_id {
            Some(id) => id.clone(),
            None => hasher.compute_hash(raw),
        };
        let cached = cache.try_get(&key);
        query_hash = Some(key);
        if cached.is_some() {
            return Ok((cached, query_hash));
        }
    }

    let source = decode_query(reader, raw, start)?;
    let document = parse_document(&source, options)?;
    Ok((Some(Arc::new(document)), query_hash))
}

/// Unescapes the raw JSON string bytes of the `query` value into
/// GraphQL source text.
fn decode_query(
    reader: &JsonReader<'_>,
    raw: &[u8],
    start: usize,
) -> Result<String, SyntaxError> {
    let mut out = UnescapeBuffer::new();
    unescape_into(raw, false, &mut out)
        .map_err(|e| reader.error_at(start, format!("invalid query: {e}")))?;
    String::from_utf8(out.into_vec())
        .map_err(|_| reader.error_at(start, "query is not valid UTF-8"))
}

/// A request value that must be a string or null.
fn optional_string(
    reader: &mut JsonReader<'_>,
    key: &str,
) -> Result<Option<String>, SyntaxError> {
    match reader.peek() {
        Some(b'"') => Ok(Some(reader.parse_string()?)),
        Some(b'n') => {
            reader.skip_value()?;
            Ok(None)
        }
        _ => Err(reader.error(format!("`{key}` must be a string or null"))),
    }
}

/// A request value that must be an object or null.
fn optional_object(
    reader: &mut JsonReader<'_>,
    key: &str,
) -> Result<Option<Map<String, Value>>, SyntaxError> {
    match reader.peek() {
        Some(b'{') => Ok(Some(reader.parse_object()?)),
        Some(b'n') => {
            reader.skip_value()?;
            Ok(None)
        }
        _ => Err(reader.error(format!("`{key}` must be an object or null"))),
    }
}
