//! Property-based tests over the lexer, unescape engine, and value
//! parser.

use crate::ast::Value;
use crate::tests::utils::lex;
use crate::{ParserOptions, TokenKind, parse_value_literal, trim_block_string};
use proptest::prelude::*;

/// Serializes `text` as the contents of a single-line GraphQL string
/// literal.
fn graphql_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\x7f' => {
                out.push('\\');
                out.push('u');
                out.push_str(&format!("{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

proptest! {
    /// Any well-formed name lexes to exactly one name token with the
    /// same value.
    #[test]
    fn names_lex_to_single_tokens(name in "[A-Za-z_][A-Za-z0-9_]{0,15}") {
        let tokens = lex(&name);
        prop_assert_eq!(tokens, vec![(TokenKind::Name, name.clone())]);
    }

    /// Integer literals keep their exact source text in the AST.
    #[test]
    fn integers_keep_raw_text(n in any::<i64>()) {
        let text = n.to_string();
        let value =
            parse_value_literal(&text, true, ParserOptions::default())
                .unwrap();
        match value {
            Value::Int(int) => prop_assert_eq!(int.value, text),
            other => prop_assert!(false, "expected an int, got {other:?}"),
        }
    }

    /// Escaping an arbitrary string and parsing it back yields the
    /// original value.
    #[test]
    fn string_literals_roundtrip(text in any::<String>()) {
        let literal = format!("\"{}\"", graphql_escape(&text));
        let value =
            parse_value_literal(&literal, true, ParserOptions::default())
                .unwrap();
        match value {
            Value::String(string) => prop_assert_eq!(string.value, text),
            other => prop_assert!(false, "expected a string, got {other:?}"),
        }
    }

    /// Trimmed block strings never carry a carriage return: every break
    /// style is normalized to `\n`.
    #[test]
    fn trimmed_block_strings_normalize_breaks(raw in any::<String>()) {
        prop_assert!(!trim_block_string(&raw).contains('\r'));
    }
}
