//! A GraphQL document lexer and recursive-descent parser.
//!
//! Turns raw GraphQL source text (executable documents, schema definition
//! language, or a mix) into an immutable owned AST. Lexing is zero-copy:
//! token values borrow the source buffer, and string unescaping and
//! block-string dedenting happen lazily when the parser materializes an
//! AST node.
//!
//! The main entry point is [`parse_document`]; standalone entry points
//! exist for parsing a single [`Field`], [`SelectionSet`], value literal,
//! or object literal from a source fragment.

pub mod ast;
mod block_string;
mod error;
mod lexer;
mod options;
mod parser;
mod tables;
mod token;
mod unescape;

pub use ast::*;
pub use block_string::trim_block_string;
pub use error::{MAX_EXCERPT_BYTES, ParseError, SyntaxError};
pub use lexer::TokenReader;
pub use options::ParserOptions;
pub use parser::{
    MAX_RECURSION_DEPTH,
    Parser,
    parse_document,
    parse_document_bytes,
    parse_field,
    parse_object_literal,
    parse_selection_set,
    parse_value_literal,
};
pub use token::{Token, TokenKind};
pub use unescape::{
    EscapeError,
    INLINE_UNESCAPE_CAPACITY,
    UnescapeBuffer,
    unescape,
    unescape_into,
};

#[cfg(test)]
mod tests;
