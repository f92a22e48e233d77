//! Value literal nodes.

use crate::ast::{Location, Name, Variable};

/// An input value literal.
///
/// See
/// [Input Values](https://spec.graphql.org/September2025/#sec-Input-Values)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(Variable),
    Int(IntValue),
    Float(FloatValue),
    String(StringValue),
    Boolean(BooleanValue),
    Null(NullValue),
    Enum(EnumValue),
    List(ListValue),
    Object(ObjectValue),
}

/// An integer literal. Stores the raw source text (including an optional
/// `-`); numeric conversion is left to the consumer so arbitrary
/// precision is not lost at parse time.
#[derive(Clone, Debug, PartialEq)]
pub struct IntValue {
    pub loc: Option<Location>,
    pub value: String,
}

/// A float literal, stored as raw source text like [`IntValue`].
#[derive(Clone, Debug, PartialEq)]
pub struct FloatValue {
    pub loc: Option<Location>,
    pub value: String,
}

/// A string literal. The value is fully materialized: unescaped, and for
/// block strings also dedented and trimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct StringValue {
    pub loc: Option<Location>,
    pub value: String,
    /// `true` if this was written as a `"""block string"""`.
    pub block: bool,
}

/// A `true` or `false` literal.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanValue {
    pub loc: Option<Location>,
    pub value: bool,
}

/// A `null` literal.
#[derive(Clone, Debug, PartialEq)]
pub struct NullValue {
    pub loc: Option<Location>,
}

/// An enum value: a name that is not `true`, `false`, or `null`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub loc: Option<Location>,
    pub value: String,
}

/// A list literal (`[a, b, c]`).
#[derive(Clone, Debug, PartialEq)]
pub struct ListValue {
    pub loc: Option<Location>,
    pub values: Vec<Value>,
}

/// An input object literal (`{ a: 1, b: 2 }`).
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    pub loc: Option<Location>,
    pub fields: Vec<ObjectField>,
}

/// One `name: value` entry of an [`ObjectValue`].
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub loc: Option<Location>,
    pub name: Name,
    pub value: Value,
}
