//! The recursive-descent document parser.
//!
//! The grammar's call tree is the state machine: recursion depth mirrors
//! the nesting depth of the source, bounded by [`MAX_RECURSION_DEPTH`].
//! Every "expect token X" helper both validates the current token and
//! advances past it (skipping comment tokens), so trivia handling is
//! folded into every advance and never appears in grammar productions.
//!
//! The parser is fail-fast: the first grammar violation aborts the parse
//! with a [`SyntaxError`]; there is no recovery and no partial AST.

use crate::ast::{
    Argument,
    BooleanValue,
    Definition,
    Directive,
    DirectiveDefinition,
    DirectiveLocation,
    Document,
    EnumTypeDefinition,
    EnumTypeExtension,
    EnumValue,
    EnumValueDefinition,
    Field,
    FieldDefinition,
    FloatValue,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    InputObjectTypeDefinition,
    InputObjectTypeExtension,
    InputValueDefinition,
    IntValue,
    InterfaceTypeDefinition,
    InterfaceTypeExtension,
    ListType,
    ListValue,
    Location,
    Name,
    NamedType,
    NonNullType,
    NullValue,
    ObjectField,
    ObjectTypeDefinition,
    ObjectTypeExtension,
    ObjectValue,
    OperationDefinition,
    OperationType,
    OperationTypeDefinition,
    ScalarTypeDefinition,
    ScalarTypeExtension,
    SchemaDefinition,
    SchemaExtension,
    Selection,
    SelectionSet,
    StringValue,
    Type,
    TypeDefinition,
    TypeExtension,
    TypeSystemDefinition,
    TypeSystemExtension,
    UnionTypeDefinition,
    UnionTypeExtension,
    Value,
    Variable,
    VariableDefinition,
};
use crate::block_string::trim_block_string;
use crate::error::{ParseError, SyntaxError};
use crate::lexer::TokenReader;
use crate::options::ParserOptions;
use crate::token::{Token, TokenKind};
use crate::unescape::{EscapeError, unescape};

/// Hard ceiling on grammar recursion depth (nested selection sets, list
/// types, and list/object values all count). Deeply nested documents are
/// rejected rather than risking stack exhaustion.
pub const MAX_RECURSION_DEPTH: usize = 64;

// =============================================================================
// Entry points
// =============================================================================

/// Parses a complete GraphQL document (executable definitions, SDL, or a
/// mix) from source text.
///
/// An empty buffer is a caller usage error and reported as
/// [`ParseError::EmptyInput`] rather than a syntax error.
pub fn parse_document(
    source: &str,
    options: ParserOptions,
) -> Result<Document, ParseError> {
    let mut parser = start(source, options)?;
    Ok(parser.document()?)
}

/// Parses a complete GraphQL document from raw bytes, validating UTF-8
/// first.
pub fn parse_document_bytes(
    bytes: &[u8],
    options: ParserOptions,
) -> Result<Document, ParseError> {
    parse_document(utf8_source(bytes)?, options)
}

/// Parses a standalone field selection (`alias: name(args) @dir { ... }`)
/// from a source fragment. The entire input must be consumed.
pub fn parse_field(
    source: &str,
    options: ParserOptions,
) -> Result<Field, ParseError> {
    let mut parser = start(source, options)?;
    let field = parser.field()?;
    parser.expect_end()?;
    Ok(field)
}

/// Parses a standalone selection set (`{ ... }`) from a source fragment.
pub fn parse_selection_set(
    source: &str,
    options: ParserOptions,
) -> Result<SelectionSet, ParseError> {
    let mut parser = start(source, options)?;
    let selection_set = parser.selection_set()?;
    parser.expect_end()?;
    Ok(selection_set)
}

/// Parses a standalone value literal from a source fragment.
///
/// With `constant` set, variable references are rejected, as in
/// default-value and SDL contexts.
pub fn parse_value_literal(
    source: &str,
    constant: bool,
    options: ParserOptions,
) -> Result<Value, ParseError> {
    let mut parser = start(source, options)?;
    let value = parser.value(constant)?;
    parser.expect_end()?;
    Ok(value)
}

/// Parses a standalone object literal (`{ a: 1 }`) from a source
/// fragment.
pub fn parse_object_literal(
    source: &str,
    constant: bool,
    options: ParserOptions,
) -> Result<ObjectValue, ParseError> {
    let mut parser = start(source, options)?;
    let object = parser.object_value(constant)?;
    parser.expect_end()?;
    Ok(object)
}

/// Creates a parser over `source` and advances it to the first
/// significant token.
fn start(
    source: &str,
    options: ParserOptions,
) -> Result<Parser<'_>, ParseError> {
    if source.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut parser = Parser::new(source, options);
    parser.advance()?;
    Ok(parser)
}

/// Validates request/source bytes as UTF-8.
fn utf8_source(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let position = e.valid_up_to();
        let prefix = &bytes[..position];
        let line = 1 + prefix.iter().filter(|&&b| b == b'\n').count() as u32;
        let line_start = memchr::memrchr(b'\n', prefix).map_or(0, |at| at + 1);
        let column = (1 + position - line_start) as u32;
        ParseError::Syntax(SyntaxError::at_bytes(
            "source is not valid UTF-8",
            bytes,
            position,
            line,
            column,
        ))
    })
}

// =============================================================================
// Parser
// =============================================================================

/// Position of a node's first token, captured before the node's first
/// token is consumed and combined with the end of its last token once
/// the node is complete.
#[derive(Clone, Copy)]
struct Mark {
    start: usize,
    line: u32,
    column: u32,
}

/// A recursive-descent parser over a [`TokenReader`].
///
/// Use the free [`parse_document`]-family functions for whole-input
/// parses; construct a `Parser` directly (or via [`Parser::from_reader`])
/// to drive partial parses over an already-positioned reader.
pub struct Parser<'src> {
    reader: TokenReader<'src>,
    options: ParserOptions,
    /// Field selections parsed so far, checked against
    /// `options.max_fields` as each field starts.
    field_count: usize,
    /// Current grammar recursion depth.
    depth: usize,
    /// End offset of the last significant token consumed; the `end` of
    /// every completed node.
    prev_end: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser positioned before the first token. The caller
    /// must [`advance`](Self::advance) once before parsing.
    pub fn new(source: &'src str, options: ParserOptions) -> Self {
        Self::from_reader(TokenReader::new(source), options)
    }

    /// Wraps an existing reader, preserving its position.
    pub fn from_reader(
        reader: TokenReader<'src>,
        options: ParserOptions,
    ) -> Self {
        let prev_end = reader.token().end;
        Self {
            reader,
            options,
            field_count: 0,
            depth: 0,
            prev_end,
        }
    }

    /// Advances to the next significant token, skipping comments.
    pub fn advance(&mut self) -> Result<(), SyntaxError> {
        self.prev_end = self.reader.token().end;
        loop {
            self.reader.read()?;
            if self.reader.token().kind != TokenKind::Comment {
                return Ok(());
            }
        }
    }

    fn token(&self) -> Token<'src> {
        self.reader.token()
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn peek(&self, kind: TokenKind) -> bool {
        self.token().kind == kind
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        let token = self.token();
        token.kind == TokenKind::Name && token.value == keyword
    }

    /// Consumes the current token if it has the given kind.
    fn skip(&mut self, kind: TokenKind) -> Result<bool, SyntaxError> {
        if self.peek(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Validates the current token's kind, consumes it, and returns it.
    fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, SyntaxError> {
        let token = self.token();
        if token.kind != kind {
            return Err(self.unexpected(kind.description()));
        }
        self.advance()?;
        Ok(token)
    }

    fn expect_name(&mut self) -> Result<Name, SyntaxError> {
        let token = self.token();
        if token.kind != TokenKind::Name {
            return Err(self.unexpected("a name"));
        }
        self.advance()?;
        Ok(Name {
            loc: self.token_loc(token),
            value: token.value.to_string(),
        })
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), SyntaxError> {
        if !self.peek_keyword(keyword) {
            return Err(self.unexpected(&format!("`{keyword}`")));
        }
        self.advance()
    }

    /// Fails unless the reader has consumed the entire input.
    pub fn expect_end(&mut self) -> Result<(), SyntaxError> {
        if self.peek(TokenKind::EndOfFile) {
            Ok(())
        } else {
            Err(self.unexpected("end of file"))
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.token();
        self.error_at(
            token,
            format!("expected {expected}, found {}", token.describe()),
        )
    }

    fn error_at(&self, token: Token<'src>, message: String) -> SyntaxError {
        SyntaxError::new(
            message,
            self.reader.source(),
            token.start,
            token.line,
            token.column,
        )
    }

    // =========================================================================
    // Location and recursion bookkeeping
    // =========================================================================

    fn mark(&self) -> Mark {
        let token = self.token();
        Mark {
            start: token.start,
            line: token.line,
            column: token.column,
        }
    }

    /// Location spanning from `mark` through the last consumed token.
    fn loc(&self, mark: Mark) -> Option<Location> {
        if self.options.no_locations {
            return None;
        }
        Some(Location {
            start: mark.start as u32,
            end: self.prev_end as u32,
            line: mark.line,
            column: mark.column,
        })
    }

    /// Location covering exactly one token.
    fn token_loc(&self, token: Token<'src>) -> Option<Location> {
        if self.options.no_locations {
            return None;
        }
        Some(Location {
            start: token.start as u32,
            end: token.end as u32,
            line: token.line,
            column: token.column,
        })
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            let token = self.token();
            return Err(self.error_at(
                token,
                format!(
                    "document exceeds maximum nesting depth of \
                     {MAX_RECURSION_DEPTH}"
                ),
            ));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Documents and definitions
    // =========================================================================

    /// Parses the rest of the input as a document. At least one
    /// definition is required.
    pub fn document(&mut self) -> Result<Document, SyntaxError> {
        let mark = self.mark();
        let mut definitions = Vec::new();
        while !self.peek(TokenKind::EndOfFile) {
            definitions.push(self.definition()?);
        }
        if definitions.is_empty() {
            return Err(self.unexpected("a definition"));
        }
        Ok(Document {
            loc: self.loc(mark),
            definitions,
        })
    }

    fn definition(&mut self) -> Result<Definition, SyntaxError> {
        let mark = self.mark();

        // An optional leading string is the definition's description.
        let description = if self.peek(TokenKind::String)
            || self.peek(TokenKind::BlockString)
        {
            Some(self.string_literal()?)
        } else {
            None
        };

        let token = self.token();
        match token.kind {
            TokenKind::BraceOpen => {
                if description.is_some() {
                    return Err(self.error_at(
                        token,
                        "a shorthand operation cannot have a description"
                            .to_string(),
                    ));
                }
                let selection_set = self.selection_set()?;
                Ok(Definition::Operation(OperationDefinition {
                    loc: self.loc(mark),
                    description: None,
                    operation: OperationType::Query,
                    name: None,
                    variable_definitions: Vec::new(),
                    directives: Vec::new(),
                    selection_set,
                }))
            }
            TokenKind::Name => match token.value {
                "query" | "mutation" | "subscription" => {
                    self.operation_definition(mark, description)
                }
                "fragment" => self.fragment_definition(mark, description),
                "schema" => self.schema_definition(mark, description),
                "scalar" | "type" | "interface" | "union" | "enum"
                | "input" => self.type_definition(mark, description),
                "directive" => self.directive_definition(mark, description),
                "extend" => {
                    if description.is_some() {
                        return Err(self.error_at(
                            token,
                            "an extension cannot have a description"
                                .to_string(),
                        ));
                    }
                    self.type_system_extension(mark)
                }
                _ => Err(self.unexpected("a definition")),
            },
            _ => Err(self.unexpected("a definition")),
        }
    }

    // =========================================================================
    // Executable definitions
    // =========================================================================

    fn operation_definition(
        &mut self,
        mark: Mark,
        description: Option<StringValue>,
    ) -> Result<Definition, SyntaxError> {
        let operation = self.operation_type()?;
        let name = if self.peek(TokenKind::Name) {
            Some(self.expect_name()?)
        } else {
            None
        };
        let variable_definitions = self.variable_definitions()?;
        let directives = self.directives(false)?;
        let selection_set = self.selection_set()?;
        Ok(Definition::Operation(OperationDefinition {
            loc: self.loc(mark),
            description,
            operation,
            name,
            variable_definitions,
            directives,
            selection_set,
        }))
    }

    fn operation_type(&mut self) -> Result<OperationType, SyntaxError> {
        let token = self.token();
        let operation = match (token.kind, token.value) {
            (TokenKind::Name, "query") => OperationType::Query,
            (TokenKind::Name, "mutation") => OperationType::Mutation,
            (TokenKind::Name, "subscription") => OperationType::Subscription,
            _ => {
                return Err(self.unexpected(
                    "an operation type (`query`, `mutation`, or \
                     `subscription`)",
                ));
            }
        };
        self.advance()?;
        Ok(operation)
    }

    fn variable_definitions(
        &mut self,
    ) -> Result<Vec<VariableDefinition>, SyntaxError> {
        if !self.skip(TokenKind::ParenOpen)? {
            return Ok(Vec::new());
        }
        let mut definitions = Vec::new();
        loop {
            definitions.push(self.variable_definition()?);
            if self.skip(TokenKind::ParenClose)? {
                return Ok(definitions);
            }
        }
    }

    fn variable_definition(
        &mut self,
    ) -> Result<VariableDefinition, SyntaxError> {
        let mark = self.mark();
        let variable = self.variable()?;
        self.expect(TokenKind::Colon)?;
        let var_type = self.type_reference()?;
        let default_value = if self.skip(TokenKind::Equals)? {
            Some(self.value(true)?)
        } else {
            None
        };
        let directives = self.directives(true)?;
        Ok(VariableDefinition {
            loc: self.loc(mark),
            variable,
            var_type,
            default_value,
            directives,
        })
    }

    fn variable(&mut self) -> Result<Variable, SyntaxError> {
        let mark = self.mark();
        self.expect(TokenKind::Dollar)?;
        let name = self.expect_name()?;
        Ok(Variable {
            loc: self.loc(mark),
            name,
        })
    }

    /// Parses a `{ ... }` selection set; at least one selection is
    /// required.
    pub fn selection_set(&mut self) -> Result<SelectionSet, SyntaxError> {
        self.enter()?;
        let mark = self.mark();
        self.expect(TokenKind::BraceOpen)?;
        let mut selections = Vec::new();
        loop {
            selections.push(self.selection()?);
            if self.skip(TokenKind::BraceClose)? {
                break;
            }
        }
        self.exit();
        Ok(SelectionSet {
            loc: self.loc(mark),
            selections,
        })
    }

    fn selection(&mut self) -> Result<Selection, SyntaxError> {
        if self.peek(TokenKind::Spread) {
            self.fragment()
        } else {
            Ok(Selection::Field(self.field()?))
        }
    }

    /// Parses a field selection, charging it against the field ceiling.
    pub fn field(&mut self) -> Result<Field, SyntaxError> {
        self.field_count += 1;
        if let Some(max) = self.options.max_fields
            && self.field_count > max
        {
            let token = self.token();
            return Err(self.error_at(
                token,
                format!("document exceeds maximum of {max} fields"),
            ));
        }

        let mark = self.mark();
        let first = self.expect_name()?;
        let (alias, name) = if self.skip(TokenKind::Colon)? {
            (Some(first), self.expect_name()?)
        } else {
            (None, first)
        };
        let arguments = self.arguments(false)?;
        let directives = self.directives(false)?;
        let selection_set = if self.peek(TokenKind::BraceOpen) {
            Some(self.selection_set()?)
        } else {
            None
        };
        Ok(Field {
            loc: self.loc(mark),
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }

    fn arguments(
        &mut self,
        constant: bool,
    ) -> Result<Vec<Argument>, SyntaxError> {
        if !self.skip(TokenKind::ParenOpen)? {
            return Ok(Vec::new());
        }
        let mut arguments = Vec::new();
        loop {
            let mark = self.mark();
            let name = self.expect_name()?;
            self.expect(TokenKind::Colon)?;
            let value = self.value(constant)?;
            arguments.push(Argument {
                loc: self.loc(mark),
                name,
                value,
            });
            if self.skip(TokenKind::ParenClose)? {
                return Ok(arguments);
            }
        }
    }

    fn directives(
        &mut self,
        constant: bool,
    ) -> Result<Vec<Directive>, SyntaxError> {
        let mut directives = Vec::new();
        while self.peek(TokenKind::At) {
            let mark = self.mark();
            self.advance()?;
            let name = self.expect_name()?;
            let arguments = self.arguments(constant)?;
            directives.push(Directive {
                loc: self.loc(mark),
                name,
                arguments,
            });
        }
        Ok(directives)
    }

    /// Dispatches a `...` selection: `... on T`, `...name`, or a bare
    /// inline fragment.
    fn fragment(&mut self) -> Result<Selection, SyntaxError> {
        let mark = self.mark();
        self.expect(TokenKind::Spread)?;

        if self.peek(TokenKind::Name) && !self.peek_keyword("on") {
            let name = self.expect_name()?;
            let directives = self.directives(false)?;
            return Ok(Selection::FragmentSpread(FragmentSpread {
                loc: self.loc(mark),
                name,
                directives,
            }));
        }

        let type_condition = if self.peek_keyword("on") {
            self.advance()?;
            Some(self.named_type()?)
        } else {
            None
        };
        let directives = self.directives(false)?;
        let selection_set = self.selection_set()?;
        Ok(Selection::InlineFragment(InlineFragment {
            loc: self.loc(mark),
            type_condition,
            directives,
            selection_set,
        }))
    }

    fn fragment_definition(
        &mut self,
        mark: Mark,
        description: Option<StringValue>,
    ) -> Result<Definition, SyntaxError> {
        self.expect_keyword("fragment")?;
        let name_token = self.token();
        let name = self.expect_name()?;
        if name.value == "on" {
            return Err(self.error_at(
                name_token,
                "a fragment cannot be named `on`".to_string(),
            ));
        }
        let variable_definitions = if self.options.allow_fragment_variables {
            self.variable_definitions()?
        } else {
            Vec::new()
        };
        self.expect_keyword("on")?;
        let type_condition = self.named_type()?;
        let directives = self.directives(false)?;
        let selection_set = self.selection_set()?;
        Ok(Definition::Fragment(FragmentDefinition {
            loc: self.loc(mark),
            description,
            name,
            variable_definitions,
            type_condition,
            directives,
            selection_set,
        }))
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Parses a value literal. With `constant` set, variable references
    /// are rejected.
    pub fn value(&mut self, constant: bool) -> Result<Value, SyntaxError> {
        let token = self.token();
        match token.kind {
            TokenKind::BracketOpen => self.list_value(constant),
            TokenKind::BraceOpen => {
                Ok(Value::Object(self.object_value(constant)?))
            }
            TokenKind::Int => {
                self.advance()?;
                Ok(Value::Int(IntValue {
                    loc: self.token_loc(token),
                    value: token.value.to_string(),
                }))
            }
            TokenKind::Float => {
                self.advance()?;
                Ok(Value::Float(FloatValue {
                    loc: self.token_loc(token),
                    value: token.value.to_string(),
                }))
            }
            TokenKind::String | TokenKind::BlockString => {
                Ok(Value::String(self.string_literal()?))
            }
            TokenKind::Name => {
                self.advance()?;
                Ok(match token.value {
                    "true" | "false" => Value::Boolean(BooleanValue {
                        loc: self.token_loc(token),
                        value: token.value == "true",
                    }),
                    "null" => Value::Null(NullValue {
                        loc: self.token_loc(token),
                    }),
                    _ => Value::Enum(EnumValue {
                        loc: self.token_loc(token),
                        value: token.value.to_string(),
                    }),
                })
            }
            TokenKind::Dollar => {
                if constant {
                    return Err(self.error_at(
                        token,
                        "variables are not allowed in constant values"
                            .to_string(),
                    ));
                }
                Ok(Value::Variable(self.variable()?))
            }
            _ => Err(self.unexpected("a value")),
        }
    }

    fn list_value(&mut self, constant: bool) -> Result<Value, SyntaxError> {
        self.enter()?;
        let mark = self.mark();
        self.expect(TokenKind::BracketOpen)?;
        let mut values = Vec::new();
        while !self.skip(TokenKind::BracketClose)? {
            values.push(self.value(constant)?);
        }
        self.exit();
        Ok(Value::List(ListValue {
            loc: self.loc(mark),
            values,
        }))
    }

    /// Parses an object literal (`{ a: 1 }`). Empty objects are valid.
    pub fn object_value(
        &mut self,
        constant: bool,
    ) -> Result<ObjectValue, SyntaxError> {
        self.enter()?;
        let mark = self.mark();
        self.expect(TokenKind::BraceOpen)?;
        let mut fields = Vec::new();
        while !self.skip(TokenKind::BraceClose)? {
            let field_mark = self.mark();
            let name = self.expect_name()?;
            self.expect(TokenKind::Colon)?;
            let value = self.value(constant)?;
            fields.push(ObjectField {
                loc: self.loc(field_mark),
                name,
                value,
            });
        }
        self.exit();
        Ok(ObjectValue {
            loc: self.loc(mark),
            fields,
        })
    }

    /// Materializes the current string token: unescapes it and, for
    /// block strings, dedents and trims the result.
    fn string_literal(&mut self) -> Result<StringValue, SyntaxError> {
        let token = self.token();
        let block = match token.kind {
            TokenKind::String => false,
            TokenKind::BlockString => true,
            _ => return Err(self.unexpected("a string")),
        };
        let unescaped = unescape(token.value, block)
            .map_err(|e| self.escape_error(token, block, e))?;
        let value = if block {
            trim_block_string(&unescaped)
        } else {
            unescaped
        };
        self.advance()?;
        Ok(StringValue {
            loc: self.token_loc(token),
            value,
            block,
        })
    }

    /// Rebases an [`EscapeError`]'s region-relative offset onto the
    /// document.
    fn escape_error(
        &self,
        token: Token<'src>,
        block: bool,
        error: EscapeError,
    ) -> SyntaxError {
        let offset = match error {
            EscapeError::InvalidEscape { offset }
            | EscapeError::IncompleteEscape { offset }
            | EscapeError::InvalidUnicode { offset }
            | EscapeError::UnpairedSurrogate { offset } => offset,
        };
        let delimiter = if block { 3 } else { 1 };
        SyntaxError::new(
            format!("invalid string literal: {error}"),
            self.reader.source(),
            token.start + delimiter + offset,
            token.line,
            token.column,
        )
    }

    // =========================================================================
    // Type references
    // =========================================================================

    /// Parses a type reference: `Name`, `[Type]`, with an optional
    /// trailing `!`.
    fn type_reference(&mut self) -> Result<Type, SyntaxError> {
        self.enter()?;
        let mark = self.mark();
        let inner = if self.skip(TokenKind::BracketOpen)? {
            let of_type = self.type_reference()?;
            self.expect(TokenKind::BracketClose)?;
            Type::List(Box::new(ListType {
                loc: self.loc(mark),
                of_type,
            }))
        } else {
            Type::Named(self.named_type()?)
        };
        self.exit();
        if self.skip(TokenKind::Bang)? {
            Ok(Type::NonNull(Box::new(NonNullType {
                loc: self.loc(mark),
                of_type: inner,
            })))
        } else {
            Ok(inner)
        }
    }

    fn named_type(&mut self) -> Result<NamedType, SyntaxError> {
        let name = self.expect_name()?;
        Ok(NamedType {
            loc: name.loc,
            name,
        })
    }

    // =========================================================================
    // Type-system definitions
    // =========================================================================

    fn schema_definition(
        &mut self,
        mark: Mark,
        description: Option<StringValue>,
    ) -> Result<Definition, SyntaxError> {
        self.expect_keyword("schema")?;
        let directives = self.directives(true)?;
        let operation_types = self.operation_type_definitions(true)?;
        Ok(Definition::TypeSystem(TypeSystemDefinition::Schema(
            SchemaDefinition {
                loc: self.loc(mark),
                description,
                directives,
                operation_types,
            },
        )))
    }

    /// Parses the `{ query: Root ... }` block of a schema definition or
    /// extension. When `required`, a missing block is an error.
    fn operation_type_definitions(
        &mut self,
        required: bool,
    ) -> Result<Vec<OperationTypeDefinition>, SyntaxError> {
        if !self.peek(TokenKind::BraceOpen) {
            if required {
                return Err(self.unexpected("`{`"));
            }
            return Ok(Vec::new());
        }
        self.advance()?;
        let mut operation_types = Vec::new();
        loop {
            let mark = self.mark();
            let operation = self.operation_type()?;
            self.expect(TokenKind::Colon)?;
            let named_type = self.named_type()?;
            operation_types.push(OperationTypeDefinition {
                loc: self.loc(mark),
                operation,
                named_type,
            });
            if self.skip(TokenKind::BraceClose)? {
                return Ok(operation_types);
            }
        }
    }

    fn type_definition(
        &mut self,
        mark: Mark,
        description: Option<StringValue>,
    ) -> Result<Definition, SyntaxError> {
        let keyword = self.token().value;
        self.advance()?;
        let name = self.expect_name()?;
        let definition = match keyword {
            "scalar" => {
                let directives = self.directives(true)?;
                TypeDefinition::Scalar(ScalarTypeDefinition {
                    loc: self.loc(mark),
                    description,
                    name,
                    directives,
                })
            }
            "type" => {
                let interfaces = self.implements_interfaces()?;
                let directives = self.directives(true)?;
                let fields = self.field_definitions()?;
                TypeDefinition::Object(ObjectTypeDefinition {
                    loc: self.loc(mark),
                    description,
                    name,
                    interfaces,
                    directives,
                    fields,
                })
            }
            "interface" => {
                let interfaces = self.implements_interfaces()?;
                let directives = self.directives(true)?;
                let fields = self.field_definitions()?;
                TypeDefinition::Interface(InterfaceTypeDefinition {
                    loc: self.loc(mark),
                    description,
                    name,
                    interfaces,
                    directives,
                    fields,
                })
            }
            "union" => {
                let directives = self.directives(true)?;
                let members = self.union_members()?;
                TypeDefinition::Union(UnionTypeDefinition {
                    loc: self.loc(mark),
                    description,
                    name,
                    directives,
                    members,
                })
            }
            "enum" => {
                let directives = self.directives(true)?;
                let values = self.enum_value_definitions()?;
                TypeDefinition::Enum(EnumTypeDefinition {
                    loc: self.loc(mark),
                    description,
                    name,
                    directives,
                    values,
                })
            }
            "input" => {
                let directives = self.directives(true)?;
                let fields = self.input_value_definitions_block()?;
                TypeDefinition::InputObject(InputObjectTypeDefinition {
                    loc: self.loc(mark),
                    description,
                    name,
                    directives,
                    fields,
                })
            }
            _ => unreachable!("definition() dispatched `{keyword}`"),
        };
        Ok(Definition::TypeSystem(TypeSystemDefinition::Type(definition)))
    }

    /// Parses an optional `implements A & B` list. A leading `&` after
    /// the keyword is permitted.
    fn implements_interfaces(
        &mut self,
    ) -> Result<Vec<NamedType>, SyntaxError> {
        if !self.peek_keyword("implements") {
            return Ok(Vec::new());
        }
        self.advance()?;
        self.skip(TokenKind::Amp)?;
        let mut interfaces = vec![self.named_type()?];
        while self.skip(TokenKind::Amp)? {
            interfaces.push(self.named_type()?);
        }
        Ok(interfaces)
    }

    /// Parses an optional `{ field: Type ... }` block. SDL permits a
    /// type with no fields block at all, but a present block must be
    /// non-empty.
    fn field_definitions(
        &mut self,
    ) -> Result<Vec<FieldDefinition>, SyntaxError> {
        if !self.skip(TokenKind::BraceOpen)? {
            return Ok(Vec::new());
        }
        let mut fields = Vec::new();
        loop {
            fields.push(self.field_definition()?);
            if self.skip(TokenKind::BraceClose)? {
                return Ok(fields);
            }
        }
    }

    fn field_definition(&mut self) -> Result<FieldDefinition, SyntaxError> {
        let mark = self.mark();
        let description = self.description()?;
        let name = self.expect_name()?;
        let arguments = self.arguments_definition()?;
        self.expect(TokenKind::Colon)?;
        let field_type = self.type_reference()?;
        let directives = self.directives(true)?;
        Ok(FieldDefinition {
            loc: self.loc(mark),
            description,
            name,
            arguments,
            field_type,
            directives,
        })
    }

    /// Parses an optional `(arg: Type = default ...)` block.
    fn arguments_definition(
        &mut self,
    ) -> Result<Vec<InputValueDefinition>, SyntaxError> {
        if !self.skip(TokenKind::ParenOpen)? {
            return Ok(Vec::new());
        }
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.input_value_definition()?);
            if self.skip(TokenKind::ParenClose)? {
                return Ok(arguments);
            }
        }
    }

    fn input_value_definitions_block(
        &mut self,
    ) -> Result<Vec<InputValueDefinition>, SyntaxError> {
        if !self.skip(TokenKind::BraceOpen)? {
            return Ok(Vec::new());
        }
        let mut fields = Vec::new();
        loop {
            fields.push(self.input_value_definition()?);
            if self.skip(TokenKind::BraceClose)? {
                return Ok(fields);
            }
        }
    }

    fn input_value_definition(
        &mut self,
    ) -> Result<InputValueDefinition, SyntaxError> {
        let mark = self.mark();
        let description = self.description()?;
        let name = self.expect_name()?;
        self.expect(TokenKind::Colon)?;
        let value_type = self.type_reference()?;
        let default_value = if self.skip(TokenKind::Equals)? {
            Some(self.value(true)?)
        } else {
            None
        };
        let directives = self.directives(true)?;
        Ok(InputValueDefinition {
            loc: self.loc(mark),
            description,
            name,
            value_type,
            default_value,
            directives,
        })
    }

    /// Parses an optional `= A | B` member list. A leading `|` after the
    /// `=` is permitted.
    fn union_members(&mut self) -> Result<Vec<NamedType>, SyntaxError> {
        if !self.skip(TokenKind::Equals)? {
            return Ok(Vec::new());
        }
        self.skip(TokenKind::Pipe)?;
        let mut members = vec![self.named_type()?];
        while self.skip(TokenKind::Pipe)? {
            members.push(self.named_type()?);
        }
        Ok(members)
    }

    fn enum_value_definitions(
        &mut self,
    ) -> Result<Vec<EnumValueDefinition>, SyntaxError> {
        if !self.skip(TokenKind::BraceOpen)? {
            return Ok(Vec::new());
        }
        let mut values = Vec::new();
        loop {
            let mark = self.mark();
            let description = self.description()?;
            let name_token = self.token();
            let name = self.expect_name()?;
            if matches!(name.value.as_str(), "true" | "false" | "null") {
                return Err(self.error_at(
                    name_token,
                    format!(
                        "an enum value cannot be named `{}`",
                        name.value
                    ),
                ));
            }
            let directives = self.directives(true)?;
            values.push(EnumValueDefinition {
                loc: self.loc(mark),
                description,
                name,
                directives,
            });
            if self.skip(TokenKind::BraceClose)? {
                return Ok(values);
            }
        }
    }

    /// An optional description string preceding an SDL element.
    fn description(&mut self) -> Result<Option<StringValue>, SyntaxError> {
        if self.peek(TokenKind::String) || self.peek(TokenKind::BlockString) {
            Ok(Some(self.string_literal()?))
        } else {
            Ok(None)
        }
    }

    fn directive_definition(
        &mut self,
        mark: Mark,
        description: Option<StringValue>,
    ) -> Result<Definition, SyntaxError> {
        self.expect_keyword("directive")?;
        self.expect(TokenKind::At)?;
        let name = self.expect_name()?;
        let arguments = self.arguments_definition()?;
        let repeatable = if self.peek_keyword("repeatable") {
            self.advance()?;
            true
        } else {
            false
        };
        self.expect_keyword("on")?;
        let locations = self.directive_locations()?;
        Ok(Definition::TypeSystem(TypeSystemDefinition::Directive(
            DirectiveDefinition {
                loc: self.loc(mark),
                description,
                name,
                arguments,
                repeatable,
                locations,
            },
        )))
    }

    /// A pipe-delimited list of directive locations; each name is
    /// validated against the fixed location set.
    fn directive_locations(
        &mut self,
    ) -> Result<Vec<DirectiveLocation>, SyntaxError> {
        self.skip(TokenKind::Pipe)?;
        let mut locations = vec![self.directive_location()?];
        while self.skip(TokenKind::Pipe)? {
            locations.push(self.directive_location()?);
        }
        Ok(locations)
    }

    fn directive_location(
        &mut self,
    ) -> Result<DirectiveLocation, SyntaxError> {
        let token = self.token();
        if token.kind != TokenKind::Name {
            return Err(self.unexpected("a directive location"));
        }
        let Some(location) = DirectiveLocation::from_str(token.value) else {
            return Err(self.error_at(
                token,
                format!("unknown directive location `{}`", token.value),
            ));
        };
        self.advance()?;
        Ok(location)
    }

    // =========================================================================
    // Type-system extensions
    // =========================================================================

    fn type_system_extension(
        &mut self,
        mark: Mark,
    ) -> Result<Definition, SyntaxError> {
        self.expect_keyword("extend")?;
        let keyword_token = self.token();
        if keyword_token.kind != TokenKind::Name {
            return Err(self.unexpected("an extendable keyword"));
        }
        let extension = match keyword_token.value {
            "schema" => {
                self.advance()?;
                let directives = self.directives(true)?;
                let operation_types = self.operation_type_definitions(false)?;
                if directives.is_empty() && operation_types.is_empty() {
                    return Err(self.unexpected(
                        "directives or a root-operation block on the \
                         schema extension",
                    ));
                }
                TypeSystemExtension::Schema(SchemaExtension {
                    loc: self.loc(mark),
                    directives,
                    operation_types,
                })
            }
            "scalar" | "type" | "interface" | "union" | "enum" | "input" => {
                TypeSystemExtension::Type(
                    self.type_extension(mark, keyword_token.value)?,
                )
            }
            _ => return Err(self.unexpected("an extendable keyword")),
        };
        Ok(Definition::Extension(extension))
    }

    fn type_extension(
        &mut self,
        mark: Mark,
        keyword: &str,
    ) -> Result<TypeExtension, SyntaxError> {
        self.advance()?;
        let name = self.expect_name()?;
        match keyword {
            "scalar" => {
                let directives = self.directives(true)?;
                if directives.is_empty() {
                    return Err(self.unexpected(
                        "directives on the scalar extension",
                    ));
                }
                Ok(TypeExtension::Scalar(ScalarTypeExtension {
                    loc: self.loc(mark),
                    name,
                    directives,
                }))
            }
            "type" => {
                let interfaces = self.implements_interfaces()?;
                let directives = self.directives(true)?;
                let fields = self.field_definitions()?;
                self.require_extension_body(
                    interfaces.is_empty()
                        && directives.is_empty()
                        && fields.is_empty(),
                )?;
                Ok(TypeExtension::Object(ObjectTypeExtension {
                    loc: self.loc(mark),
                    name,
                    interfaces,
                    directives,
                    fields,
                }))
            }
            "interface" => {
                let interfaces = self.implements_interfaces()?;
                let directives = self.directives(true)?;
                let fields = self.field_definitions()?;
                self.require_extension_body(
                    interfaces.is_empty()
                        && directives.is_empty()
                        && fields.is_empty(),
                )?;
                Ok(TypeExtension::Interface(InterfaceTypeExtension {
                    loc: self.loc(mark),
                    name,
                    interfaces,
                    directives,
                    fields,
                }))
            }
            "union" => {
                let directives = self.directives(true)?;
                let members = self.union_members()?;
                self.require_extension_body(
                    directives.is_empty() && members.is_empty(),
                )?;
                Ok(TypeExtension::Union(UnionTypeExtension {
                    loc: self.loc(mark),
                    name,
                    directives,
                    members,
                }))
            }
            "enum" => {
                let directives = self.directives(true)?;
                let values = self.enum_value_definitions()?;
                self.require_extension_body(
                    directives.is_empty() && values.is_empty(),
                )?;
                Ok(TypeExtension::Enum(EnumTypeExtension {
                    loc: self.loc(mark),
                    name,
                    directives,
                    values,
                }))
            }
            "input" => {
                let directives = self.directives(true)?;
                let fields = self.input_value_definitions_block()?;
                self.require_extension_body(
                    directives.is_empty() && fields.is_empty(),
                )?;
                Ok(TypeExtension::InputObject(InputObjectTypeExtension {
                    loc: self.loc(mark),
                    name,
                    directives,
                    fields,
                }))
            }
            _ => unreachable!("type_system_extension dispatched `{keyword}`"),
        }
    }

    /// A type extension that adds nothing is a syntax error.
    fn require_extension_body(
        &self,
        is_empty: bool,
    ) -> Result<(), SyntaxError> {
        if is_empty {
            Err(self.unexpected("at least one addition on the extension"))
        } else {
            Ok(())
        }
    }
}
