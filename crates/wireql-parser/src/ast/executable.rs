//! Executable definitions: operations, fragments, and selections.

use crate::ast::{Location, Name, NamedType, StringValue, Type, Value};

/// The three operation types.
///
/// See
/// [Operations](https://spec.graphql.org/September2025/#sec-Language.Operations)
/// in the spec.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

/// An operation definition, named or shorthand.
///
/// A shorthand operation (`{ field }`) has `operation == Query` and no
/// name.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub operation: OperationType,
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

/// A named fragment definition.
///
/// `variable_definitions` is only populated under the experimental
/// fragment-variables grammar extension.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub variable_definitions: Vec<VariableDefinition>,
    pub type_condition: NamedType,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

/// A variable definition (`$name: Type = default @dir`).
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub loc: Option<Location>,
    pub variable: Variable,
    pub var_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

/// The `{ ... }` block listing selections at one level of a query.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub loc: Option<Location>,
    pub selections: Vec<Selection>,
}

/// A single entry in a selection set.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

/// A field selection, optionally aliased, with arguments, directives,
/// and a nested selection set.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub loc: Option<Location>,
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
}

/// A named argument (`name: value`).
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub loc: Option<Location>,
    pub name: Name,
    pub value: Value,
}

/// A named fragment spread (`...FragmentName`).
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub loc: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
}

/// An inline fragment (`... on Type { ... }` or `... { ... }`).
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub loc: Option<Location>,
    pub type_condition: Option<NamedType>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

/// A directive annotation (`@name(args)`).
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub loc: Option<Location>,
    pub name: Name,
    pub arguments: Vec<Argument>,
}

/// A variable reference (`$name`).
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub loc: Option<Location>,
    pub name: Name,
}
