//! Type reference nodes.

use crate::ast::{Location, Name};

/// A reference to a type: named, list, or non-null wrapped.
///
/// See
/// [Type References](https://spec.graphql.org/September2025/#sec-Type-References)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Named(NamedType),
    List(Box<ListType>),
    NonNull(Box<NonNullType>),
}

/// A plain named type (`String`, `User`, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub loc: Option<Location>,
    pub name: Name,
}

/// A list type (`[Inner]`).
#[derive(Clone, Debug, PartialEq)]
pub struct ListType {
    pub loc: Option<Location>,
    pub of_type: Type,
}

/// A non-null wrapper (`Inner!`). The inner type is always a named or
/// list type — the grammar does not produce `!!`.
#[derive(Clone, Debug, PartialEq)]
pub struct NonNullType {
    pub loc: Option<Location>,
    pub of_type: Type,
}
