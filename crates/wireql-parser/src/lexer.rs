//! The token reader: a byte cursor over GraphQL source text producing one
//! token per `read()` call.
//!
//! The reader dispatches on the first significant byte using the
//! compile-time tables in [`crate::tables`]. Token values are borrowed
//! slices of the source; nothing is unescaped or allocated during lexing.
//! Comments are real tokens — `read()` does not skip them — so callers
//! that only want significant tokens loop over comment kinds themselves.

use crate::error::SyntaxError;
use crate::tables::{
    IS_CONTROL, IS_DIGIT, IS_DIGIT_OR_MINUS, IS_NAME_CONTINUE,
    IS_NAME_START, IS_PUNCTUATOR,
};
use crate::token::{Token, TokenKind};
use crate::unescape::is_escape_char;
use memchr::memchr2;

/// UTF-8 encoding of U+FEFF, treated as whitespace anywhere and skipped
/// once as a file preamble at offset 0.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// A cursor over a source buffer producing one [`Token`] at a time.
///
/// Invariant: `column == 1 + position - line_start` after any read, where
/// both line and column are 1-indexed.
pub struct TokenReader<'src> {
    source: &'src str,
    /// Byte offset of the cursor.
    position: usize,
    /// 1-indexed current line.
    line: u32,
    /// Byte offset of the current line's first byte.
    line_start: usize,
    /// Newlines consumed by a just-closed block string, applied on the
    /// next whitespace skip so column bookkeeping resumes correctly.
    pending_newlines: u32,
    /// Line-start offset that accompanies `pending_newlines`.
    pending_line_start: usize,
    token: Token<'src>,
}

impl<'src> TokenReader<'src> {
    /// Creates a reader positioned before the first token.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            line_start: 0,
            pending_newlines: 0,
            pending_line_start: 0,
            token: Token::start_of_file(),
        }
    }

    /// The full source buffer this reader lexes from.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// The most recently read token.
    pub fn token(&self) -> Token<'src> {
        self.token
    }

    /// Advances to the next token.
    ///
    /// Returns `false` (and sets the token kind to `EndOfFile`) once the
    /// cursor is at or past the end of input, `true` otherwise.
    pub fn read(&mut self) -> Result<bool, SyntaxError> {
        self.skip_ignored();

        let bytes = self.source.as_bytes();
        if self.position >= bytes.len() {
            self.token = Token {
                kind: TokenKind::EndOfFile,
                start: self.position,
                end: self.position,
                line: self.line,
                column: self.column(),
                value: "",
            };
            return Ok(false);
        }

        let byte = bytes[self.position];
        if IS_NAME_START[byte as usize] {
            self.read_name();
        } else if IS_PUNCTUATOR[byte as usize] {
            self.read_punctuator(byte);
        } else if IS_DIGIT_OR_MINUS[byte as usize] {
            self.read_number()?;
        } else if byte == b'#' {
            self.read_comment();
        } else if byte == b'"' {
            if bytes[self.position..].starts_with(b"\"\"\"") {
                self.read_block_string()?;
            } else {
                self.read_string()?;
            }
        } else if byte == b'.' {
            self.read_spread()?;
        } else {
            let ch = self.source[self.position..]
                .chars()
                .next()
                .unwrap_or('\u{FFFD}');
            return Err(self.error_here(format!(
                "unexpected character `{ch}` (0x{byte:02X})"
            )));
        }
        Ok(true)
    }

    // =========================================================================
    // Whitespace and position bookkeeping
    // =========================================================================

    /// Skips whitespace, commas, and BOMs before the next token, first
    /// applying any newline count deferred by a block string.
    fn skip_ignored(&mut self) {
        if self.pending_newlines > 0 {
            self.line += self.pending_newlines;
            self.line_start = self.pending_line_start;
            self.pending_newlines = 0;
        }

        let bytes = self.source.as_bytes();
        while self.position < bytes.len() {
            match bytes[self.position] {
                b' ' | b'\t' | b',' => self.position += 1,
                b'\r' => {
                    self.position += 1;
                    if bytes.get(self.position) == Some(&b'\n') {
                        self.position += 1;
                    }
                    self.new_line();
                }
                b'\n' => {
                    self.position += 1;
                    if bytes.get(self.position) == Some(&b'\r') {
                        self.position += 1;
                    }
                    self.new_line();
                }
                0xEF if bytes[self.position..].starts_with(BOM) => {
                    self.position += BOM.len();
                }
                _ => break,
            }
        }
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.line_start = self.position;
    }

    fn column(&self) -> u32 {
        (1 + self.position - self.line_start) as u32
    }

    fn column_at(&self, position: usize) -> u32 {
        (1 + position - self.line_start) as u32
    }

    fn error_here(&self, message: String) -> SyntaxError {
        SyntaxError::new(
            message,
            self.source,
            self.position,
            self.line,
            self.column(),
        )
    }

    fn set_token(&mut self, kind: TokenKind, start: usize, value: &'src str) {
        self.token = Token {
            kind,
            start,
            end: self.position,
            line: self.line,
            column: self.column_at(start),
            value,
        };
    }

    // =========================================================================
    // Token scanners
    // =========================================================================

    fn read_name(&mut self) {
        let bytes = self.source.as_bytes();
        let start = self.position;
        self.position += 1;
        while self.position < bytes.len()
            && IS_NAME_CONTINUE[bytes[self.position] as usize]
        {
            self.position += 1;
        }
        self.set_token(TokenKind::Name, start, &self.source[start..self.position]);
    }

    fn read_punctuator(&mut self, byte: u8) {
        let kind = match byte {
            b'!' => TokenKind::Bang,
            b'$' => TokenKind::Dollar,
            b'&' => TokenKind::Amp,
            b'(' => TokenKind::ParenOpen,
            b')' => TokenKind::ParenClose,
            b':' => TokenKind::Colon,
            b'=' => TokenKind::Equals,
            b'@' => TokenKind::At,
            b'[' => TokenKind::BracketOpen,
            b']' => TokenKind::BracketClose,
            b'{' => TokenKind::BraceOpen,
            b'}' => TokenKind::BraceClose,
            b'|' => TokenKind::Pipe,
            _ => unreachable!("IS_PUNCTUATOR admitted 0x{byte:02X}"),
        };
        let start = self.position;
        self.position += 1;
        self.set_token(kind, start, "");
    }

    /// `.` is only valid as the start of the three-byte spread `...`.
    fn read_spread(&mut self) -> Result<(), SyntaxError> {
        let bytes = self.source.as_bytes();
        if !bytes[self.position..].starts_with(b"...") {
            return Err(self.error_here("expected `...` (spread)".to_string()));
        }
        let start = self.position;
        self.position += 3;
        self.set_token(TokenKind::Spread, start, "");
        Ok(())
    }

    fn read_number(&mut self) -> Result<(), SyntaxError> {
        let bytes = self.source.as_bytes();
        let start = self.position;
        let mut is_float = false;

        if bytes[self.position] == b'-' {
            self.position += 1;
        }

        // Integer part: `0` (with no digit following) or [1-9][0-9]*.
        match bytes.get(self.position) {
            Some(b'0') => {
                self.position += 1;
                if let Some(&next) = bytes.get(self.position)
                    && IS_DIGIT[next as usize]
                {
                    return Err(self.error_here(format!(
                        "invalid number: unexpected digit `{}` after leading zero",
                        next as char
                    )));
                }
            }
            Some(&d) if IS_DIGIT[d as usize] => self.scan_digits(),
            found => return Err(self.number_digit_error("`-`", found)),
        }

        // Fraction.
        if bytes.get(self.position) == Some(&b'.') {
            self.position += 1;
            is_float = true;
            match bytes.get(self.position) {
                Some(&d) if IS_DIGIT[d as usize] => self.scan_digits(),
                found => return Err(self.number_digit_error("`.`", found)),
            }
        }

        // Exponent.
        if matches!(bytes.get(self.position), Some(b'e' | b'E')) {
            self.position += 1;
            is_float = true;
            if matches!(bytes.get(self.position), Some(b'+' | b'-')) {
                self.position += 1;
            }
            match bytes.get(self.position) {
                Some(&d) if IS_DIGIT[d as usize] => self.scan_digits(),
                found => return Err(self.number_digit_error("exponent", found)),
            }
        }

        let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
        self.set_token(kind, start, &self.source[start..self.position]);
        Ok(())
    }

    fn scan_digits(&mut self) {
        let bytes = self.source.as_bytes();
        while self.position < bytes.len()
            && IS_DIGIT[bytes[self.position] as usize]
        {
            self.position += 1;
        }
    }

    fn number_digit_error(
        &self,
        after: &str,
        found: Option<&u8>,
    ) -> SyntaxError {
        let found = match found {
            Some(&b) => format!("`{}`", b as char),
            None => "end of file".to_string(),
        };
        self.error_here(format!(
            "invalid number: expected digit after {after}, found {found}"
        ))
    }

    fn read_comment(&mut self) {
        let bytes = self.source.as_bytes();
        let start = self.position;
        let end = match memchr2(b'\r', b'\n', &bytes[start..]) {
            Some(offset) => start + offset,
            None => bytes.len(),
        };
        self.position = end;
        // Trim `#`, spaces, and tabs from the front only.
        let body = self.source[start..end]
            .trim_start_matches(['#', ' ', '\t']);
        self.set_token(TokenKind::Comment, start, body);
    }

    fn read_string(&mut self) -> Result<(), SyntaxError> {
        let bytes = self.source.as_bytes();
        let start = self.position;
        self.position += 1; // opening quote
        let value_start = self.position;

        loop {
            let Some(&byte) = bytes.get(self.position) else {
                return Err(self.error_here(
                    "unterminated string: missing closing `\"`".to_string(),
                ));
            };
            match byte {
                b'"' => {
                    let value = &self.source[value_start..self.position];
                    self.position += 1;
                    self.set_token(TokenKind::String, start, value);
                    return Ok(());
                }
                b'\\' => {
                    match bytes.get(self.position + 1) {
                        Some(&next) if is_escape_char(next) => {
                            self.position += 2;
                        }
                        Some(&next) => {
                            self.position += 1;
                            return Err(self.error_here(format!(
                                "invalid escape sequence `\\{}`",
                                next as char
                            )));
                        }
                        None => {
                            return Err(self.error_here(
                                "unterminated string: missing closing `\"`"
                                    .to_string(),
                            ));
                        }
                    }
                }
                b'\r' | b'\n' => {
                    return Err(self.error_here(
                        "unterminated string: unescaped line break".to_string(),
                    ));
                }
                _ if IS_CONTROL[byte as usize] => {
                    return Err(self.error_here(format!(
                        "invalid control character 0x{byte:02X} within string"
                    )));
                }
                _ => self.position += 1,
            }
        }
    }

    /// Scans a block string. Line-break accounting is deferred: the
    /// newline count is stashed in `pending_newlines` and applied on the
    /// next whitespace skip.
    fn read_block_string(&mut self) -> Result<(), SyntaxError> {
        let bytes = self.source.as_bytes();
        let start = self.position;
        self.position += 3; // opening """
        let value_start = self.position;
        let mut newlines: u32 = 0;
        let mut last_line_start = self.line_start;

        loop {
            let Some(&byte) = bytes.get(self.position) else {
                // Apply the counted newlines so the error points at the
                // right line.
                self.line += newlines;
                self.line_start = last_line_start;
                return Err(self.error_here(
                    "unterminated block string: missing closing `\"\"\"`"
                        .to_string(),
                ));
            };
            match byte {
                b'"' if bytes[self.position..].starts_with(b"\"\"\"") => {
                    let value = &self.source[value_start..self.position];
                    self.position += 3;
                    self.set_token(TokenKind::BlockString, start, value);
                    self.pending_newlines = newlines;
                    self.pending_line_start = last_line_start;
                    return Ok(());
                }
                b'\\' if bytes[self.position..].starts_with(b"\\\"\"\"") => {
                    self.position += 4;
                }
                b'\r' => {
                    self.position += 1;
                    if bytes.get(self.position) == Some(&b'\n') {
                        self.position += 1;
                    }
                    newlines += 1;
                    last_line_start = self.position;
                }
                b'\n' => {
                    self.position += 1;
                    if bytes.get(self.position) == Some(&b'\r') {
                        self.position += 1;
                    }
                    newlines += 1;
                    last_line_start = self.position;
                }
                _ => self.position += 1,
            }
        }
    }
}
