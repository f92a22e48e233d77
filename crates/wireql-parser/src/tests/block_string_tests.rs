//! Tests for block-string dedenting and trimming.
//!
//! Per <https://spec.graphql.org/September2025/#BlockStringValue()>.

use crate::trim_block_string;

#[test]
fn strips_common_indentation() {
    let raw = "\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n";
    assert_eq!(
        trim_block_string(raw),
        "Hello,\n  World!\n\nYours,\n  GraphQL."
    );
}

/// The first line never participates in the common-indent computation
/// and is never stripped.
#[test]
fn first_line_is_exempt_from_dedenting() {
    assert_eq!(trim_block_string("Hello\n  World"), "Hello\nWorld");
}

#[test]
fn removes_leading_and_trailing_blank_lines() {
    assert_eq!(trim_block_string("  \nfoo\n  "), "foo");
    assert_eq!(trim_block_string("\n\nfoo\n\n\n"), "foo");
}

#[test]
fn no_common_indent_means_no_stripping() {
    assert_eq!(trim_block_string("a\nb"), "a\nb");
}

/// An interior blank line shorter than the common indent is reduced to
/// an empty line, not kept verbatim.
#[test]
fn short_blank_interior_lines_are_emptied() {
    assert_eq!(trim_block_string("a\n    b\n  \n    c"), "a\nb\n\nc");
}

#[test]
fn single_character_input_terminates() {
    assert_eq!(trim_block_string("a"), "a");
}

#[test]
fn all_blank_input_yields_empty_string() {
    assert_eq!(trim_block_string(" \n \n "), "");
    assert_eq!(trim_block_string(""), "");
}

#[test]
fn normalizes_line_break_styles() {
    assert_eq!(trim_block_string("a\r\nb\rc\nd"), "a\nb\nc\nd");
}
