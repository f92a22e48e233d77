//! The GraphQL abstract syntax tree.
//!
//! Nodes are owned, immutable once constructed, and form a strict tree:
//! the [`Document`] exclusively owns its entire subtree. Each node
//! category is a closed sum type ([`Definition`], [`Selection`],
//! [`Value`], [`Type`]) so exhaustiveness checking does useful work at
//! every consumer.

mod executable;
mod type_system;
mod types;
mod values;

pub use executable::*;
pub use type_system::*;
pub use types::*;
pub use values::*;

/// Source provenance of an AST node.
///
/// `start`/`end` are a half-open byte interval covering exactly the
/// source consumed while parsing the node; `line`/`column` are the
/// 1-indexed position of the node's first token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

/// A name/identifier node.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    pub loc: Option<Location>,
    pub value: String,
}

/// A parsed GraphQL document: an ordered sequence of definitions.
///
/// See [Document](https://spec.graphql.org/September2025/#sec-Document)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub loc: Option<Location>,
    pub definitions: Vec<Definition>,
}

/// A top-level definition within a document.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    TypeSystem(TypeSystemDefinition),
    Extension(TypeSystemExtension),
}
