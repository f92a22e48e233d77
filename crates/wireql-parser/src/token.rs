//! Token kinds and the transient token produced by [`TokenReader`].
//!
//! [`TokenReader`]: crate::TokenReader

/// The kind of a lexed token.
///
/// One variant per punctuator, plus name/number/string/comment tokens and
/// the start/end-of-file sentinels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// The state of a reader before the first `read()`.
    StartOfFile,
    /// End of input.
    EndOfFile,

    /// A name or keyword: `/[_A-Za-z][_0-9A-Za-z]*/`.
    Name,
    /// An integer literal (raw text, including an optional `-`).
    Int,
    /// A float literal (raw text, including sign/fraction/exponent).
    Float,
    /// A single-line string literal. The token value is the raw
    /// (still-escaped) text between the quotes.
    String,
    /// A triple-quoted block string. The token value is the raw text
    /// between the `"""` delimiters, neither unescaped nor dedented.
    BlockString,
    /// A `#` comment. The token value is the comment body with leading
    /// `#`, spaces, and tabs trimmed from the front only.
    Comment,

    /// `!`
    Bang,
    /// `$`
    Dollar,
    /// `&`
    Amp,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `@`
    At,
    /// `[`
    BracketOpen,
    /// `]`
    BracketClose,
    /// `{`
    BraceOpen,
    /// `}`
    BraceClose,
    /// `|`
    Pipe,
    /// `...`
    Spread,
}

impl TokenKind {
    /// A short human-readable description, used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::StartOfFile => "start of file",
            TokenKind::EndOfFile => "end of file",
            TokenKind::Name => "name",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::BlockString => "block string",
            TokenKind::Comment => "comment",
            TokenKind::Bang => "`!`",
            TokenKind::Dollar => "`$`",
            TokenKind::Amp => "`&`",
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Equals => "`=`",
            TokenKind::At => "`@`",
            TokenKind::BracketOpen => "`[`",
            TokenKind::BracketClose => "`]`",
            TokenKind::BraceOpen => "`{`",
            TokenKind::BraceClose => "`}`",
            TokenKind::Pipe => "`|`",
            TokenKind::Spread => "`...`",
        }
    }
}

/// A single lexed token.
///
/// Tokens are transient: the reader overwrites its token on every
/// `read()`, and `value` borrows from the source buffer. Conversion to an
/// owned string happens only when the parser materializes an AST node.
#[derive(Clone, Copy, Debug)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Byte offset of the token's first byte (0-based, inclusive).
    pub start: usize,
    /// Byte offset one past the token's last byte (exclusive).
    pub end: usize,
    /// 1-indexed line of the token's first byte.
    pub line: u32,
    /// 1-indexed column of the token's first byte.
    pub column: u32,
    /// Raw value slice for name/number/string/comment tokens; empty for
    /// punctuators and sentinels.
    pub value: &'src str,
}

impl<'src> Token<'src> {
    pub(crate) fn start_of_file() -> Self {
        Token {
            kind: TokenKind::StartOfFile,
            start: 0,
            end: 0,
            line: 1,
            column: 1,
            value: "",
        }
    }

    /// A short description of this token for error messages: the kind,
    /// plus the value for name/number tokens.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Name | TokenKind::Int | TokenKind::Float => {
                format!("`{}`", self.value)
            }
            kind => kind.description().to_string(),
        }
    }
}
