//! Block-string dedenting and trimming.
//!
//! Applied when a block string's value is materialized, after escape
//! processing. Implements the common-indent stripping algorithm from
//! <https://spec.graphql.org/September2025/#BlockStringValue()>:
//! strip the minimum indentation shared by all non-blank lines after the
//! first, drop leading and trailing blank lines, and normalize every
//! line-break style to `\n`.

/// Dedents and trims a block string's raw value.
pub fn trim_block_string(raw: &str) -> String {
    let lines = split_lines(raw);

    // Minimum leading whitespace over non-blank lines after the first.
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !is_blank(line))
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    // Non-blank lines always have at least `common_indent` bytes of
    // leading whitespace; shorter lines are all-whitespace, so the byte
    // slice below stays on ASCII boundaries either way.
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            kept.push(line);
        } else {
            kept.push(&line[common_indent.min(line.len())..]);
        }
    }

    let mut first = 0;
    while first < kept.len() && is_blank(kept[first]) {
        first += 1;
    }
    let mut last = kept.len();
    while last > first && is_blank(kept[last - 1]) {
        last -= 1;
    }

    kept[first..last].join("\n")
}

/// Splits on `\n`, `\r`, and `\r\n`, treating `\r\n` as one break.
fn split_lines(raw: &str) -> Vec<&str> {
    let bytes = raw.as_bytes();
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&raw[line_start..i]);
                i += 1;
                line_start = i;
            }
            b'\r' => {
                lines.push(&raw[line_start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                line_start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&raw[line_start..]);
    lines
}

fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b == b' ' || b == b'\t')
}

fn leading_whitespace(line: &str) -> usize {
    line.bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count()
}
