//! Tests for the escape-processing engine.

use crate::unescape::{EscapeError, UnescapeBuffer, unescape, unescape_into};

#[test]
fn passes_plain_text_through() {
    assert_eq!(unescape("plain text", false).unwrap(), "plain text");
    assert_eq!(unescape("", false).unwrap(), "");
}

#[test]
fn handles_standard_escapes() {
    assert_eq!(unescape(r"a\nb\tc", false).unwrap(), "a\nb\tc");
    assert_eq!(unescape(r#"\""#, false).unwrap(), "\"");
    assert_eq!(unescape(r"\\", false).unwrap(), "\\");
    assert_eq!(unescape(r"\/", false).unwrap(), "/");
    assert_eq!(unescape(r"\r", false).unwrap(), "\r");
    assert_eq!(unescape(r"\b\f", false).unwrap(), "\u{8}\u{c}");
}

// =============================================================================
// Unicode escapes
// =============================================================================

/// `\uXXXX` must cover the full Basic Multilingual Plane, including code
/// points at and above U+0800 that need 3-byte UTF-8 encodings.
#[test]
fn decodes_unicode_escapes_across_the_bmp() {
    assert_eq!(unescape(r"\u0041", false).unwrap(), "A");
    assert_eq!(unescape(r"\u00E9", false).unwrap(), "\u{e9}");
    assert_eq!(unescape(r"\u07FF", false).unwrap(), "\u{7ff}");
    assert_eq!(unescape(r"\u0800", false).unwrap(), "\u{800}");
    assert_eq!(unescape(r"\u20AC", false).unwrap(), "\u{20ac}");
    assert_eq!(unescape(r"\uFFFD", false).unwrap(), "\u{fffd}");
}

/// Two consecutive escapes forming a UTF-16 surrogate pair combine into
/// one supplementary code point.
#[test]
fn combines_surrogate_pairs() {
    assert_eq!(unescape(r"\uD83D\uDE00", false).unwrap(), "\u{1F600}");
    assert_eq!(unescape(r"a\uD834\uDD1Eb", false).unwrap(), "a\u{1D11E}b");
}

#[test]
fn rejects_unpaired_surrogates() {
    assert_eq!(
        unescape(r"\uD800", false),
        Err(EscapeError::UnpairedSurrogate { offset: 0 })
    );
    // A high surrogate whose following escape is not a low surrogate.
    assert_eq!(
        unescape(r"\uD800\u0041", false),
        Err(EscapeError::UnpairedSurrogate { offset: 6 })
    );
    // A high surrogate followed by a plain character.
    assert_eq!(
        unescape(r"\uD800A", false),
        Err(EscapeError::UnpairedSurrogate { offset: 0 })
    );
    // A low surrogate with no preceding high half.
    assert_eq!(
        unescape(r"\uDC00", false),
        Err(EscapeError::UnpairedSurrogate { offset: 0 })
    );
}

#[test]
fn rejects_malformed_escapes() {
    assert_eq!(
        unescape(r"\u12G4", false),
        Err(EscapeError::InvalidUnicode { offset: 0 })
    );
    assert_eq!(
        unescape(r"\u12", false),
        Err(EscapeError::IncompleteEscape { offset: 0 })
    );
    assert_eq!(
        unescape("abc\\", false),
        Err(EscapeError::IncompleteEscape { offset: 3 })
    );
    assert_eq!(
        unescape(r"\q", false),
        Err(EscapeError::InvalidEscape { offset: 0 })
    );
}

// =============================================================================
// Block-string mode
// =============================================================================

#[test]
fn block_mode_unescapes_triple_quote() {
    assert_eq!(unescape(r#"a\"""b"#, true).unwrap(), "a\"\"\"b");
}

#[test]
fn block_mode_still_handles_standard_escapes() {
    assert_eq!(unescape(r"a\nb", true).unwrap(), "a\nb");
}

#[test]
fn single_line_mode_treats_triple_quote_escape_as_quote() {
    // Outside block mode `\"` unescapes and the remaining quotes pass
    // through verbatim.
    assert_eq!(unescape(r#"\""""#, false).unwrap(), "\"\"\"");
}

/// Inputs longer than the inline buffer capacity spill to the heap
/// without changing behavior.
#[test]
fn long_inputs_spill_to_heap() {
    let raw = format!("{}{}", "a".repeat(300), r"\n");
    let mut out = UnescapeBuffer::new();
    unescape_into(raw.as_bytes(), false, &mut out).unwrap();
    assert_eq!(out.len(), 301);
    assert_eq!(out[300], b'\n');
}
