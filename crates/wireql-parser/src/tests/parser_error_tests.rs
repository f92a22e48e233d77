//! Tests for syntax-error reporting: messages, positions, and source
//! excerpts.

use crate::tests::utils::parse_err;
use crate::{MAX_EXCERPT_BYTES, ParseError, ParserOptions, parse_document_bytes};

#[test]
fn names_the_expected_and_found_tokens() {
    let error = parse_err("query");
    assert_eq!(error.message, "expected `{`, found end of file");

    let error = parse_err("fragment 1 on T { x }");
    assert_eq!(error.message, "expected a name, found `1`");

    let error = parse_err("{ x");
    assert_eq!(error.message, "expected a name, found end of file");
}

#[test]
fn reports_error_line_and_column() {
    let error = parse_err("{ x &\n}");
    assert_eq!((error.line, error.column, error.position), (1, 5, 4));

    let error = parse_err("{\n  x\n  &\n}");
    assert_eq!((error.line, error.column), (3, 3));
}

#[test]
fn error_display_includes_position() {
    let error = parse_err("{ x &\n}");
    assert!(error.to_string().starts_with("syntax error at 1:5: "));
}

// =============================================================================
// Excerpts
// =============================================================================

/// Short sources are excerpted whole.
#[test]
fn short_source_excerpt_is_the_whole_source() {
    let error = parse_err("{ x & }");
    assert_eq!(error.excerpt, "{ x & }");
    assert_eq!(error.excerpt_offset, 0);
}

/// Long sources are excerpted to a bounded window containing the error
/// position.
#[test]
fn long_source_excerpt_is_bounded() {
    let source = format!("query q {{ {}%", "a ".repeat(600));
    let error = parse_err(&source);
    assert_eq!(error.excerpt.len(), MAX_EXCERPT_BYTES);
    assert!(error.position >= error.excerpt_offset);
    assert!(error.position < error.excerpt_offset + MAX_EXCERPT_BYTES);
    assert!(error.excerpt.contains('%'));
}

/// An error near the start anchors the window to the start.
#[test]
fn early_error_excerpt_is_start_anchored() {
    let source = format!("% {}", "a ".repeat(600));
    let error = parse_err(&source);
    assert_eq!(error.excerpt_offset, 0);
    assert_eq!(error.excerpt.len(), MAX_EXCERPT_BYTES);
}

// =============================================================================
// Byte-level entry point
// =============================================================================

#[test]
fn rejects_invalid_utf8() {
    let error = parse_document_bytes(b"query { \xFF }", ParserOptions::default());
    match error {
        Err(ParseError::Syntax(e)) => {
            assert!(e.message.contains("UTF-8"));
            assert_eq!(e.position, 8);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn parses_valid_utf8_bytes() {
    let document =
        parse_document_bytes(b"{ x }", ParserOptions::default()).unwrap();
    assert_eq!(document.definitions.len(), 1);
}
