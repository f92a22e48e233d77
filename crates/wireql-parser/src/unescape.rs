//! Byte-level string unescaping.
//!
//! Transforms the raw (still-escaped) bytes of a string literal into
//! unescaped UTF-8 in a single left-to-right pass. Escapes never grow the
//! output, so the result always fits in a buffer the size of the input;
//! inputs below 256 bytes stay on the stack via the `SmallVec` scratch
//! buffer.
//!
//! The `\uXXXX` path covers the full Basic Multilingual Plane and
//! combines UTF-16 surrogate pairs (two consecutive escapes) into one
//! supplementary code point, per
//! <https://spec.graphql.org/September2025/#sec-String-Value>.

use crate::tables::IS_ESCAPE;
use memchr::memchr;
use smallvec::SmallVec;

/// Inline capacity of the unescape scratch buffer. Values at or below
/// this length never touch the heap.
pub const INLINE_UNESCAPE_CAPACITY: usize = 256;

/// Scratch buffer for unescaped bytes.
pub type UnescapeBuffer = SmallVec<[u8; INLINE_UNESCAPE_CAPACITY]>;

/// Error raised while processing an escape sequence.
///
/// Offsets are relative to the raw string region handed to the engine;
/// callers rebase them onto document positions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    /// A backslash was followed by a byte that is not a recognized
    /// escape character.
    #[error("invalid escape sequence at byte {offset}")]
    InvalidEscape { offset: usize },

    /// The input ended in the middle of an escape sequence.
    #[error("incomplete escape sequence at byte {offset}")]
    IncompleteEscape { offset: usize },

    /// A `\uXXXX` escape contained a non-hex digit.
    #[error("invalid unicode escape at byte {offset}")]
    InvalidUnicode { offset: usize },

    /// A `\uXXXX` escape encoded a UTF-16 surrogate half that was not
    /// part of a valid high/low pair.
    #[error("unpaired surrogate escape at byte {offset}")]
    UnpairedSurrogate { offset: usize },
}

/// Unescapes `raw` into `out`, appending the unescaped bytes.
///
/// `raw` is the region between the string's delimiters. When
/// `block_string` is true, `\"""` is recognized and emitted as a literal
/// `"""` before the standard escape handling applies.
pub fn unescape_into(
    raw: &[u8],
    block_string: bool,
    out: &mut UnescapeBuffer,
) -> Result<(), EscapeError> {
    let mut i = 0;
    while i < raw.len() {
        // Copy the verbatim run up to the next backslash.
        let Some(next) = memchr(b'\\', &raw[i..]) else {
            out.extend_from_slice(&raw[i..]);
            break;
        };
        out.extend_from_slice(&raw[i..i + next]);
        i += next;

        let escape_at = i;
        if block_string && raw[i + 1..].starts_with(b"\"\"\"") {
            out.extend_from_slice(b"\"\"\"");
            i += 4;
            continue;
        }
        let Some(&code) = raw.get(i + 1) else {
            return Err(EscapeError::IncompleteEscape { offset: escape_at });
        };
        match code {
            b'"' | b'/' | b'\\' => out.push(code),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                i = unescape_unicode(raw, i, out)?;
                continue;
            }
            _ => return Err(EscapeError::InvalidEscape { offset: escape_at }),
        }
        i += 2;
    }
    Ok(())
}

/// Unescapes a raw string region into an owned `String`.
pub fn unescape(raw: &str, block_string: bool) -> Result<String, EscapeError> {
    let mut out = UnescapeBuffer::new();
    unescape_into(raw.as_bytes(), block_string, &mut out)?;
    // The input was valid UTF-8 and every escape emits valid UTF-8.
    Ok(String::from_utf8(out.into_vec())
        .expect("unescaped bytes are valid UTF-8"))
}

/// Handles a `\uXXXX` escape starting at `raw[i]` (the backslash).
/// Returns the offset just past the consumed escape(s).
fn unescape_unicode(
    raw: &[u8],
    i: usize,
    out: &mut UnescapeBuffer,
) -> Result<usize, EscapeError> {
    let unit = read_hex4(raw, i)?;
    if (0xDC00..=0xDFFF).contains(&unit) {
        // A low surrogate with no preceding high surrogate.
        return Err(EscapeError::UnpairedSurrogate { offset: i });
    }
    let (code_point, end) = if (0xD800..=0xDBFF).contains(&unit) {
        // High surrogate: the next escape must be the low half.
        let pair_at = i + 6;
        let has_second_escape = raw
            .get(pair_at..)
            .is_some_and(|rest| rest.starts_with(b"\\u"));
        if !has_second_escape {
            return Err(EscapeError::UnpairedSurrogate { offset: i });
        }
        let low = read_hex4(raw, pair_at)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(EscapeError::UnpairedSurrogate { offset: pair_at });
        }
        let combined =
            0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        (combined, pair_at + 6)
    } else {
        (unit, i + 6)
    };
    let ch = char::from_u32(code_point)
        .ok_or(EscapeError::InvalidUnicode { offset: i })?;
    let mut utf8 = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    Ok(end)
}

/// Reads the 4 hex digits of a `\uXXXX` escape whose backslash sits at
/// `raw[i]`.
fn read_hex4(raw: &[u8], i: usize) -> Result<u32, EscapeError> {
    let digits = raw
        .get(i + 2..i + 6)
        .ok_or(EscapeError::IncompleteEscape { offset: i })?;
    let mut value: u32 = 0;
    for &d in digits {
        let nibble = match d {
            b'0'..=b'9' => d - b'0',
            b'a'..=b'f' => d - b'a' + 10,
            b'A'..=b'F' => d - b'A' + 10,
            _ => return Err(EscapeError::InvalidUnicode { offset: i }),
        };
        value = (value << 4) | u32::from(nibble);
    }
    Ok(value)
}

/// Returns `true` if `byte` may follow a backslash in a single-line
/// string. Used by the lexer to validate escapes without unescaping.
#[inline]
pub(crate) fn is_escape_char(byte: u8) -> bool {
    IS_ESCAPE[byte as usize]
}
