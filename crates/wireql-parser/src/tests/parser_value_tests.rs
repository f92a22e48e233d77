//! Tests for value literals, including the standalone value entry
//! points.

use crate::ast::Value;
use crate::tests::utils::value;
use crate::{ParseError, ParserOptions, parse_object_literal, parse_value_literal};

#[test]
fn parses_scalar_values() {
    match value("42") {
        Value::Int(int) => assert_eq!(int.value, "42"),
        other => panic!("expected an int, got {other:?}"),
    }
    match value("-1.5e3") {
        Value::Float(float) => assert_eq!(float.value, "-1.5e3"),
        other => panic!("expected a float, got {other:?}"),
    }
    match value("\"hi\"") {
        Value::String(string) => {
            assert_eq!(string.value, "hi");
            assert!(!string.block);
        }
        other => panic!("expected a string, got {other:?}"),
    }
}

#[test]
fn parses_keyword_values() {
    assert!(matches!(value("true"), Value::Boolean(b) if b.value));
    assert!(matches!(value("false"), Value::Boolean(b) if !b.value));
    assert!(matches!(value("null"), Value::Null(_)));
    // Any other name is an enum value.
    match value("RED") {
        Value::Enum(enum_value) => assert_eq!(enum_value.value, "RED"),
        other => panic!("expected an enum value, got {other:?}"),
    }
}

/// Block-string values are unescaped, dedented, and trimmed when
/// materialized.
#[test]
fn parses_block_string_values() {
    match value("\"\"\"\n  hi\n  there\n\"\"\"") {
        Value::String(string) => {
            assert_eq!(string.value, "hi\nthere");
            assert!(string.block);
        }
        other => panic!("expected a block string, got {other:?}"),
    }
}

#[test]
fn parses_list_values() {
    match value("[1, [true], \"x\"]") {
        Value::List(list) => {
            assert_eq!(list.values.len(), 3);
            assert!(matches!(&list.values[1], Value::List(inner)
                if inner.values.len() == 1));
        }
        other => panic!("expected a list, got {other:?}"),
    }
    assert!(matches!(value("[]"), Value::List(list) if list.values.is_empty()));
}

#[test]
fn parses_object_values() {
    match value("{ a: 1, b: [true] }") {
        Value::Object(object) => {
            assert_eq!(object.fields.len(), 2);
            assert_eq!(object.fields[0].name.value, "a");
            assert_eq!(object.fields[1].name.value, "b");
        }
        other => panic!("expected an object, got {other:?}"),
    }
}

#[test]
fn parse_object_literal_entry_point() {
    let object =
        parse_object_literal("{}", true, ParserOptions::default()).unwrap();
    assert!(object.fields.is_empty());

    // A non-object value is rejected at the opening token.
    assert!(parse_object_literal("[1]", true, ParserOptions::default()).is_err());
}

// =============================================================================
// Constant contexts
// =============================================================================

#[test]
fn variables_permitted_only_in_non_constant_context() {
    match value("$x") {
        Value::Variable(variable) => assert_eq!(variable.name.value, "x"),
        other => panic!("expected a variable, got {other:?}"),
    }

    let error = parse_value_literal("$x", true, ParserOptions::default());
    match error {
        Err(ParseError::Syntax(e)) => {
            assert!(e.message.contains("constant"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }

    // The constant flag propagates into nested values.
    assert!(
        parse_value_literal("[1, $x]", true, ParserOptions::default())
            .is_err()
    );
    assert!(
        parse_value_literal("{ a: $x }", true, ParserOptions::default())
            .is_err()
    );
}

#[test]
fn rejects_trailing_input_after_value() {
    let error = parse_value_literal("1 2", true, ParserOptions::default());
    match error {
        Err(ParseError::Syntax(e)) => {
            assert!(e.message.contains("end of file"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}
