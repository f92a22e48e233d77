//! Shared test helpers.

use crate::ast::{
    Definition, Document, Field, FragmentDefinition, OperationDefinition,
    Selection, SelectionSet, Value,
};
use crate::{
    ParseError, ParserOptions, SyntaxError, TokenKind, TokenReader,
    parse_document, parse_value_literal,
};

/// Parses a document with default options, panicking on failure.
pub fn parse(source: &str) -> Document {
    parse_document(source, ParserOptions::default())
        .unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"))
}

/// Parses a document expected to fail, returning the syntax error.
pub fn parse_err(source: &str) -> SyntaxError {
    match parse_document(source, ParserOptions::default()) {
        Err(ParseError::Syntax(e)) => e,
        other => {
            panic!("expected a syntax error for {source:?}, got {other:?}")
        }
    }
}

/// Parses a standalone value literal with default options.
pub fn value(source: &str) -> Value {
    parse_value_literal(source, false, ParserOptions::default())
        .unwrap_or_else(|e| panic!("value parse failed for {source:?}: {e}"))
}

/// Lexes the entire source, returning `(kind, value)` pairs.
pub fn lex(source: &str) -> Vec<(TokenKind, String)> {
    let mut reader = TokenReader::new(source);
    let mut tokens = Vec::new();
    while reader.read().unwrap_or_else(|e| {
        panic!("lex failed for {source:?}: {e}")
    }) {
        let token = reader.token();
        tokens.push((token.kind, token.value.to_string()));
    }
    tokens
}

/// Lexes source expected to fail, returning the syntax error.
pub fn lex_err(source: &str) -> SyntaxError {
    let mut reader = TokenReader::new(source);
    loop {
        match reader.read() {
            Ok(true) => {}
            Ok(false) => panic!("expected a lex error for {source:?}"),
            Err(e) => return e,
        }
    }
}

pub fn first_operation(document: &Document) -> &OperationDefinition {
    match &document.definitions[0] {
        Definition::Operation(operation) => operation,
        other => panic!("expected an operation, got {other:?}"),
    }
}

pub fn first_fragment(document: &Document) -> &FragmentDefinition {
    match &document.definitions[0] {
        Definition::Fragment(fragment) => fragment,
        other => panic!("expected a fragment, got {other:?}"),
    }
}

pub fn field_at(selection_set: &SelectionSet, index: usize) -> &Field {
    match &selection_set.selections[index] {
        Selection::Field(field) => field,
        other => panic!("expected a field at {index}, got {other:?}"),
    }
}

pub fn first_field(selection_set: &SelectionSet) -> &Field {
    field_at(selection_set, 0)
}
