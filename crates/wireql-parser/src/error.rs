//! Error types for the lexer, parser, and request-envelope layers.
//!
//! There is a single content-level error kind, [`SyntaxError`]: the first
//! grammar violation aborts the whole parse. There is no multi-error
//! collection and no partial AST. Zero-byte input is a caller usage error
//! and reported separately as [`ParseError::EmptyInput`].

/// Maximum number of source bytes included in a [`SyntaxError`] excerpt.
pub const MAX_EXCERPT_BYTES: usize = 512;

/// A syntax error raised by the lexer, the document parser, or the
/// request-envelope parser.
///
/// Carries the byte position, 1-indexed line and column, a human-readable
/// message, and a bounded excerpt of the surrounding source so callers can
/// render a caret without re-reading the input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at {line}:{column}: {message}")]
pub struct SyntaxError {
    /// Byte offset of the error in the full source (0-based).
    pub position: usize,
    /// 1-indexed line of the error.
    pub line: u32,
    /// 1-indexed column of the error.
    pub column: u32,
    /// What was expected vs. what was found.
    pub message: String,
    /// At most [`MAX_EXCERPT_BYTES`] of source text surrounding the error,
    /// centered on the error position when possible, else anchored to the
    /// start or end of the source.
    pub excerpt: String,
    /// Byte offset of the excerpt's first byte within the full source, so
    /// a caret can be positioned inside the (possibly truncated) excerpt.
    pub excerpt_offset: usize,
}

impl SyntaxError {
    /// Creates a syntax error, extracting the excerpt from `source`.
    pub fn new(
        message: impl Into<String>,
        source: &str,
        position: usize,
        line: u32,
        column: u32,
    ) -> Self {
        let (excerpt_offset, end) = excerpt_bounds(source.len(), position);
        let mut start = excerpt_offset;
        let mut end = end;
        // Clamp to char boundaries so the excerpt stays valid UTF-8.
        while start < source.len() && !source.is_char_boundary(start) {
            start += 1;
        }
        while end < source.len() && !source.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            position,
            line,
            column,
            message: message.into(),
            excerpt: source[start..end].to_string(),
            excerpt_offset: start,
        }
    }

    /// Creates a syntax error over a raw byte buffer (used by the request
    /// envelope, where the payload has not been validated as UTF-8).
    ///
    /// Non-UTF-8 bytes in the excerpt window are replaced with U+FFFD.
    pub fn at_bytes(
        message: impl Into<String>,
        payload: &[u8],
        position: usize,
        line: u32,
        column: u32,
    ) -> Self {
        let (start, end) = excerpt_bounds(payload.len(), position);
        Self {
            position,
            line,
            column,
            message: message.into(),
            excerpt: String::from_utf8_lossy(&payload[start..end]).into_owned(),
            excerpt_offset: start,
        }
    }
}

/// Computes the `[start, end)` byte window of the excerpt.
fn excerpt_bounds(len: usize, position: usize) -> (usize, usize) {
    if len <= MAX_EXCERPT_BYTES {
        return (0, len);
    }
    let half = MAX_EXCERPT_BYTES / 2;
    let start = if position <= half {
        0
    } else if position + half >= len {
        len - MAX_EXCERPT_BYTES
    } else {
        position - half
    };
    (start, start + MAX_EXCERPT_BYTES)
}

/// Top-level error for every public parse entry point.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input buffer was empty. Empty input is a caller usage error,
    /// not a content problem, so it is kept distinct from [`SyntaxError`].
    #[error("input is empty")]
    EmptyInput,

    /// The input violated the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
