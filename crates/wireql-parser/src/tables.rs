//! Compile-time byte classification tables.
//!
//! The lexer dispatches on single bytes, so each character class is a
//! 256-entry `bool` table built by a `const fn` and baked into the binary.
//! Nothing here is ever recomputed at runtime.

/// Marks every byte in `bytes` as `true`.
const fn table_of(bytes: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = true;
        i += 1;
    }
    table
}

/// Marks the inclusive byte range `[lo, hi]` as `true` in `table`.
const fn mark_range(mut table: [bool; 256], lo: u8, hi: u8) -> [bool; 256] {
    let mut b = lo;
    while b <= hi {
        table[b as usize] = true;
        b += 1;
    }
    table
}

const fn name_start_table() -> [bool; 256] {
    let table = table_of(b"_");
    let table = mark_range(table, b'A', b'Z');
    mark_range(table, b'a', b'z')
}

const fn name_continue_table() -> [bool; 256] {
    mark_range(name_start_table(), b'0', b'9')
}

const fn control_table() -> [bool; 256] {
    // C0 controls except tab/CR/LF (those are handled as whitespace or
    // line terminators), plus DEL.
    let mut table = mark_range([false; 256], 0x00, 0x1F);
    table[b'\t' as usize] = false;
    table[b'\r' as usize] = false;
    table[b'\n' as usize] = false;
    table[0x7F] = true;
    table
}

/// Single-byte punctuators. `.` is excluded: it is only valid as part of
/// the three-byte spread token `...`.
pub(crate) static IS_PUNCTUATOR: [bool; 256] = table_of(b"!$&():=@[]{|}");

/// Bytes that may start a name: letters and underscore.
pub(crate) static IS_NAME_START: [bool; 256] = name_start_table();

/// Bytes that may continue a name: letters, digits, underscore.
pub(crate) static IS_NAME_CONTINUE: [bool; 256] = name_continue_table();

/// ASCII digits.
pub(crate) static IS_DIGIT: [bool; 256] = mark_range([false; 256], b'0', b'9');

/// Bytes that may start a number token: digits and `-`.
pub(crate) static IS_DIGIT_OR_MINUS: [bool; 256] =
    mark_range(table_of(b"-"), b'0', b'9');

/// Control bytes that are never valid inside a single-line string.
pub(crate) static IS_CONTROL: [bool; 256] = control_table();

/// Bytes that may follow a backslash in a single-line string:
/// the eight standard escapes plus `u` (unicode escape introducer).
pub(crate) static IS_ESCAPE: [bool; 256] = table_of(b"\"/\\bfnrtu");
