//! Tests for selection sets: fields, aliases, arguments, fragment
//! spreads, and inline fragments.

use crate::ast::{Selection, Value};
use crate::tests::utils::{field_at, first_field, first_operation, parse, parse_err};
use crate::{ParserOptions, parse_field, parse_selection_set};

#[test]
fn parses_multiple_fields_in_order() {
    let document = parse("{ name age email }");
    let selection_set = &first_operation(&document).selection_set;
    assert_eq!(selection_set.selections.len(), 3);
    assert_eq!(field_at(selection_set, 0).name.value, "name");
    assert_eq!(field_at(selection_set, 1).name.value, "age");
    assert_eq!(field_at(selection_set, 2).name.value, "email");
}

#[test]
fn parses_aliased_field() {
    let document = parse("{ smallPic: profilePic(size: 64) }");
    let field = first_field(&first_operation(&document).selection_set);
    assert_eq!(field.alias.as_ref().unwrap().value, "smallPic");
    assert_eq!(field.name.value, "profilePic");
    assert_eq!(field.arguments.len(), 1);
}

#[test]
fn parses_field_arguments() {
    let document = parse("{ user(id: 4, name: \"mark\") { f } }");
    let field = first_field(&first_operation(&document).selection_set);
    assert_eq!(field.arguments.len(), 2);
    assert_eq!(field.arguments[0].name.value, "id");
    match &field.arguments[0].value {
        Value::Int(int) => assert_eq!(int.value, "4"),
        other => panic!("expected an int argument, got {other:?}"),
    }
    assert_eq!(field.arguments[1].name.value, "name");
}

#[test]
fn parses_field_directives_with_variable_arguments() {
    let document = parse("{ x @include(if: $cond) }");
    let field = first_field(&first_operation(&document).selection_set);
    assert_eq!(field.directives.len(), 1);
    let directive = &field.directives[0];
    assert_eq!(directive.name.value, "include");
    match &directive.arguments[0].value {
        Value::Variable(variable) => {
            assert_eq!(variable.name.value, "cond");
        }
        other => panic!("expected a variable argument, got {other:?}"),
    }
}

// =============================================================================
// Fragment selections
// =============================================================================

#[test]
fn parses_fragment_spread() {
    let document = parse("{ ...userFields @skip(if: true) }");
    let selection_set = &first_operation(&document).selection_set;
    match &selection_set.selections[0] {
        Selection::FragmentSpread(spread) => {
            assert_eq!(spread.name.value, "userFields");
            assert_eq!(spread.directives.len(), 1);
        }
        other => panic!("expected a fragment spread, got {other:?}"),
    }
}

#[test]
fn parses_inline_fragment_with_type_condition() {
    let document = parse("{ ... on User { name } }");
    let selection_set = &first_operation(&document).selection_set;
    match &selection_set.selections[0] {
        Selection::InlineFragment(inline) => {
            let condition = inline.type_condition.as_ref().unwrap();
            assert_eq!(condition.name.value, "User");
            assert_eq!(inline.selection_set.selections.len(), 1);
        }
        other => panic!("expected an inline fragment, got {other:?}"),
    }
}

/// `...` followed directly by directives or a brace is an inline
/// fragment with no type condition.
#[test]
fn parses_inline_fragment_without_type_condition() {
    for source in ["{ ... { name } }", "{ ... @defer { name } }"] {
        let document = parse(source);
        let selection_set = &first_operation(&document).selection_set;
        match &selection_set.selections[0] {
            Selection::InlineFragment(inline) => {
                assert!(inline.type_condition.is_none());
            }
            other => panic!("expected an inline fragment, got {other:?}"),
        }
    }
}

// =============================================================================
// Standalone entry points and errors
// =============================================================================

#[test]
fn parse_field_entry_point_consumes_whole_input() {
    let field =
        parse_field("pic: avatar(size: 2) { url }", ParserOptions::default())
            .unwrap();
    assert_eq!(field.alias.as_ref().unwrap().value, "pic");
    assert_eq!(field.name.value, "avatar");
    assert!(field.selection_set.is_some());

    assert!(parse_field("a b", ParserOptions::default()).is_err());
}

#[test]
fn parse_selection_set_entry_point() {
    let selection_set =
        parse_selection_set("{ a b }", ParserOptions::default()).unwrap();
    assert_eq!(selection_set.selections.len(), 2);
}

#[test]
fn rejects_empty_selection_set() {
    let error = parse_err("{}");
    assert!(error.message.contains("expected a name"));
}

#[test]
fn skips_comments_between_selections() {
    let document = parse("{\n  # leading comment\n  x # trailing\n}");
    let selection_set = &first_operation(&document).selection_set;
    assert_eq!(selection_set.selections.len(), 1);
    assert_eq!(first_field(selection_set).name.value, "x");
}
