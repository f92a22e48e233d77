//! Type-system (SDL) definitions and extensions.

use crate::ast::{
    Directive,
    Location,
    Name,
    NamedType,
    OperationType,
    StringValue,
    Type,
    Value,
};

/// A type-system definition.
///
/// See
/// [Type System](https://spec.graphql.org/September2025/#sec-Type-System)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSystemDefinition {
    Schema(SchemaDefinition),
    Type(TypeDefinition),
    Directive(DirectiveDefinition),
}

/// A type-system extension (`extend schema ...` / `extend type ...`).
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSystemExtension {
    Schema(SchemaExtension),
    Type(TypeExtension),
}

/// A `schema { query: ... }` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub directives: Vec<Directive>,
    pub operation_types: Vec<OperationTypeDefinition>,
}

/// One root-operation binding within a schema definition
/// (`query: QueryRoot`).
#[derive(Clone, Debug, PartialEq)]
pub struct OperationTypeDefinition {
    pub loc: Option<Location>,
    pub operation: OperationType,
    pub named_type: NamedType,
}

/// One of the six kinds of type definition.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub interfaces: Vec<NamedType>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub interfaces: Vec<NamedType>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub members: Vec<NamedType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
}

/// One value of an enum type definition.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
}

/// A field of an object or interface type definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub field_type: Type,
    pub directives: Vec<Directive>,
}

/// An input value: a field-definition argument or an input-object field.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub value_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

/// A `directive @name(...) on LOCATION | ...` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub loc: Option<Location>,
    pub description: Option<StringValue>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}

/// A valid directive location name.
///
/// See
/// [DirectiveLocations](https://spec.graphql.org/September2025/#DirectiveLocations)
/// in the spec.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DirectiveLocation {
    // Executable locations.
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    // Type-system locations.
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    pub fn from_str(name: &str) -> Option<Self> {
        Some(match name {
            "QUERY" => DirectiveLocation::Query,
            "MUTATION" => DirectiveLocation::Mutation,
            "SUBSCRIPTION" => DirectiveLocation::Subscription,
            "FIELD" => DirectiveLocation::Field,
            "FRAGMENT_DEFINITION" => DirectiveLocation::FragmentDefinition,
            "FRAGMENT_SPREAD" => DirectiveLocation::FragmentSpread,
            "INLINE_FRAGMENT" => DirectiveLocation::InlineFragment,
            "VARIABLE_DEFINITION" => DirectiveLocation::VariableDefinition,
            "SCHEMA" => DirectiveLocation::Schema,
            "SCALAR" => DirectiveLocation::Scalar,
            "OBJECT" => DirectiveLocation::Object,
            "FIELD_DEFINITION" => DirectiveLocation::FieldDefinition,
            "ARGUMENT_DEFINITION" => DirectiveLocation::ArgumentDefinition,
            "INTERFACE" => DirectiveLocation::Interface,
            "UNION" => DirectiveLocation::Union,
            "ENUM" => DirectiveLocation::Enum,
            "ENUM_VALUE" => DirectiveLocation::EnumValue,
            "INPUT_OBJECT" => DirectiveLocation::InputObject,
            "INPUT_FIELD_DEFINITION" => DirectiveLocation::InputFieldDefinition,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

/// An `extend schema` extension.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaExtension {
    pub loc: Option<Location>,
    pub directives: Vec<Directive>,
    pub operation_types: Vec<OperationTypeDefinition>,
}

/// One of the six kinds of type extension.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExtension {
    Scalar(ScalarTypeExtension),
    Object(ObjectTypeExtension),
    Interface(InterfaceTypeExtension),
    Union(UnionTypeExtension),
    Enum(EnumTypeExtension),
    InputObject(InputObjectTypeExtension),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeExtension {
    pub loc: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeExtension {
    pub loc: Option<Location>,
    pub name: Name,
    pub interfaces: Vec<NamedType>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeExtension {
    pub loc: Option<Location>,
    pub name: Name,
    pub interfaces: Vec<NamedType>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeExtension {
    pub loc: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub members: Vec<NamedType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeExtension {
    pub loc: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeExtension {
    pub loc: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
}
