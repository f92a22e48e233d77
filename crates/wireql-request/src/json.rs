//! A positioned JSON reader over raw request bytes.
//!
//! The request envelope needs two things `serde_json`'s deserializer
//! cannot provide: the raw (still-escaped) byte span of the `query`
//! value, and byte-offset/line/column error positions into the original
//! payload. So the envelope drives this small byte-level reader, which
//! still produces standard [`serde_json::Value`] trees for the generic
//! parts (`variables`, `extensions`, discarded unknown keys).

use serde_json::{Map, Number, Value};
use wireql_parser::{
    MAX_RECURSION_DEPTH, ParseError, SyntaxError, UnescapeBuffer,
    unescape_into,
};

/// Parses an entire byte buffer as one JSON value.
///
/// The whole buffer must be consumed; trailing content is an error.
pub fn parse_json(payload: &[u8]) -> Result<Value, ParseError> {
    if payload.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut reader = JsonReader::new(payload);
    let value = reader.parse_value()?;
    reader.expect_end()?;
    Ok(value)
}

/// A cursor over a JSON payload tracking byte offset, line, and column.
pub(crate) struct JsonReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    line_start: usize,
    depth: usize,
}

impl<'a> JsonReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
            line_start: 0,
            depth: 0,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Skips whitespace and peeks the next significant byte.
    pub(crate) fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            match byte {
                b' ' | b'\t' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    if self.bytes.get(self.pos) == Some(&b'\r') {
                        self.pos += 1;
                    }
                    self.new_line();
                }
                b'\r' => {
                    self.pos += 1;
                    if self.bytes.get(self.pos) == Some(&b'\n') {
                        self.pos += 1;
                    }
                    self.new_line();
                }
                _ => break,
            }
        }
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.line_start = self.pos;
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        self.error_at(self.pos, message)
    }

    pub(crate) fn error_at(
        &self,
        position: usize,
        message: impl Into<String>,
    ) -> SyntaxError {
        SyntaxError::at_bytes(
            message,
            self.bytes,
            position,
            self.line,
            (1 + position.saturating_sub(self.line_start)) as u32,
        )
    }

    pub(crate) fn expect_end(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            None => Ok(()),
            Some(_) => {
                Err(self.error("unexpected trailing content after value"))
            }
        }
    }

    /// Consumes `byte` or fails.
    pub(crate) fn expect(&mut self, byte: u8) -> Result<(), SyntaxError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", byte as char)))
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Parses any JSON value into a dynamic value tree.
    pub(crate) fn parse_value(&mut self) -> Result<Value, SyntaxError> {
        match self.peek() {
            Some(b'{') => Ok(Value::Object(self.parse_object()?)),
            Some(b'[') => self.parse_array(),
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b't') => self.parse_literal(b"true", Value::Bool(true)),
            Some(b'f') => self.parse_literal(b"false", Value::Bool(false)),
            Some(b'n') => self.parse_literal(b"null", Value::Null),
            Some(b'-' | b'0'..=b'9') => {
                Ok(Value::Number(self.parse_number()?))
            }
            Some(byte) => Err(self.error(format!(
                "unexpected character `{}` in value",
                byte as char
            ))),
            None => Err(self.error("unexpected end of payload")),
        }
    }

    /// Parses and discards a value; used for unrecognized request keys,
    /// which must still be consumed to stay positioned.
    pub(crate) fn skip_value(&mut self) -> Result<(), SyntaxError> {
        self.parse_value().map(drop)
    }

    pub(crate) fn parse_object(
        &mut self,
    ) -> Result<Map<String, Value>, SyntaxError> {
        self.enter()?;
        self.expect(b'{')?;
        let mut map = Map::new();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.exit();
            return Ok(map);
        }
        loop {
            let key = self.parse_string()?;
            self.expect(b':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    self.exit();
                    return Ok(map);
                }
                _ => return Err(self.error("expected `,` or `}`")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, SyntaxError> {
        self.enter()?;
        self.expect(b'[')?;
        let mut values = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.exit();
            return Ok(Value::Array(values));
        }
        loop {
            values.push(self.parse_value()?);
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    self.exit();
                    return Ok(Value::Array(values));
                }
                _ => return Err(self.error("expected `,` or `]`")),
            }
        }
    }

    fn parse_literal(
        &mut self,
        literal: &[u8],
        value: Value,
    ) -> Result<Value, SyntaxError> {
        if self.bytes[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(self.error("unexpected characters in value"))
        }
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Scans a string token, validating escapes without decoding them.
    /// Returns the byte span of the raw contents between the quotes.
    pub(crate) fn parse_string_raw(
        &mut self,
    ) -> Result<(usize, usize), SyntaxError> {
        self.expect(b'"')?;
        let start = self.pos;
        loop {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Err(self.error("unterminated string"));
            };
            match byte {
                b'"' => {
                    let end = self.pos;
                    self.pos += 1;
                    return Ok((start, end));
                }
                b'\\' => self.scan_escape()?,
                0x00..=0x1F => {
                    return Err(self.error(format!(
                        "invalid control character 0x{byte:02X} in string"
                    )));
                }
                _ => self.pos += 1,
            }
        }
    }

    fn scan_escape(&mut self) -> Result<(), SyntaxError> {
        match self.bytes.get(self.pos + 1) {
            Some(
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't',
            ) => {
                self.pos += 2;
                Ok(())
            }
            Some(b'u') => {
                let digits = self
                    .bytes
                    .get(self.pos + 2..self.pos + 6)
                    .ok_or_else(|| self.error("incomplete unicode escape"))?;
                if !digits.iter().all(u8::is_ascii_hexdigit) {
                    return Err(self.error("invalid unicode escape"));
                }
                self.pos += 6;
                Ok(())
            }
            Some(_) => Err(self.error("invalid escape sequence")),
            None => Err(self.error("unterminated string")),
        }
    }

    /// Scans and fully decodes a string.
    pub(crate) fn parse_string(&mut self) -> Result<String, SyntaxError> {
        let (start, end) = self.parse_string_raw()?;
        self.decode_string(start, end)
    }

    /// Decodes a previously scanned raw string span. JSON's escape set
    /// matches GraphQL's single-line string escapes, so the same engine
    /// applies.
    pub(crate) fn decode_string(
        &self,
        start: usize,
        end: usize,
    ) -> Result<String, SyntaxError> {
        let mut out = UnescapeBuffer::new();
        unescape_into(&self.bytes[start..end], false, &mut out)
            .map_err(|e| self.error_at(start, format!("invalid string: {e}")))?;
        String::from_utf8(out.into_vec())
            .map_err(|_| self.error_at(start, "string is not valid UTF-8"))
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Numbers without a fraction or exponent that fit an `i64` stay
    /// integers; everything else becomes a double.
    fn parse_number(&mut self) -> Result<Number, SyntaxError> {
        let start = self.pos;
        if self.bytes.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        match self.bytes.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                if self
                    .bytes
                    .get(self.pos)
                    .is_some_and(u8::is_ascii_digit)
                {
                    return Err(self.error("leading zero in number"));
                }
            }
            Some(b'1'..=b'9') => self.scan_digits(),
            _ => return Err(self.error("expected a digit")),
        }

        let mut is_float = false;
        if self.bytes.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            is_float = true;
            self.require_digit()?;
            self.scan_digits();
        }
        if matches!(self.bytes.get(self.pos), Some(b'e' | b'E')) {
            self.pos += 1;
            is_float = true;
            if matches!(self.bytes.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.require_digit()?;
            self.scan_digits();
        }

        // The scanned slice is all ASCII.
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.error_at(start, "malformed number"))?;
        if !is_float && let Ok(integer) = text.parse::<i64>() {
            return Ok(Number::from(integer));
        }
        let float: f64 = text
            .parse()
            .map_err(|_| self.error_at(start, "malformed number"))?;
        Number::from_f64(float)
            .ok_or_else(|| self.error_at(start, "number out of range"))
    }

    fn require_digit(&self) -> Result<(), SyntaxError> {
        if self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            Ok(())
        } else {
            Err(self.error("expected a digit"))
        }
    }

    fn scan_digits(&mut self) {
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            return Err(self.error(format!(
                "payload exceeds maximum nesting depth of \
                 {MAX_RECURSION_DEPTH}"
            )));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }
}
