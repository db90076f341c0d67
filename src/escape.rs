//! Quoting primitives for flow scalars.
//!
//! The parser hands the content between the quotes (delimiters already
//! stripped) to [`unescape_double_quoted`] or [`unescape_single_quoted`].
//! The dumper asks [`requires_double_quoting`] and [`requires_single_quoting`]
//! which style a string needs and then escapes it.
//!
//! ```rust
//! use yaml_inline::escape;
//!
//! assert_eq!(escape::unescape_double_quoted(r"a\tb\x41").unwrap(), "a\tbA");
//! assert_eq!(escape::unescape_single_quoted("it''s"), "it's");
//! assert_eq!(escape::escape_with_double_quotes("a\nb"), r#""a\nb""#);
//! assert_eq!(escape::escape_with_single_quotes("it's"), "'it''s'");
//! ```

use crate::error::{ParseError, Result};

/// Unescapes the content of a double-quoted scalar.
///
/// Accepts the YAML escapes `\0 \a \b \t \n \v \f \r \e \<space> \" \/ \\
/// \N \_ \L \P`, a backslash before a literal tab, and the numeric forms
/// `\xXX`, `\uXXXX` and `\UXXXXXXXX`. Anything else is an
/// [`ParseError::InvalidEscape`].
pub fn unescape_double_quoted(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let escaped = chars
            .next()
            .ok_or_else(|| ParseError::invalid_escape("\\"))?;
        match escaped {
            '0' => result.push('\0'),
            'a' => result.push('\u{07}'),
            'b' => result.push('\u{08}'),
            't' | '\t' => result.push('\t'),
            'n' => result.push('\n'),
            'v' => result.push('\u{0B}'),
            'f' => result.push('\u{0C}'),
            'r' => result.push('\r'),
            'e' => result.push('\u{1B}'),
            ' ' => result.push(' '),
            '"' => result.push('"'),
            '/' => result.push('/'),
            '\\' => result.push('\\'),
            'N' => result.push('\u{85}'),
            '_' => result.push('\u{A0}'),
            'L' => result.push('\u{2028}'),
            'P' => result.push('\u{2029}'),
            'x' => result.push(unescape_code_point(&mut chars, 'x', 2)?),
            'u' => result.push(unescape_code_point(&mut chars, 'u', 4)?),
            'U' => result.push(unescape_code_point(&mut chars, 'U', 8)?),
            other => return Err(ParseError::invalid_escape(&format!("\\{}", other))),
        }
    }

    Ok(result)
}

fn unescape_code_point(chars: &mut std::str::Chars<'_>, marker: char, width: usize) -> Result<char> {
    let mut hex = String::with_capacity(width);
    for _ in 0..width {
        match chars.next() {
            Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
            _ => return Err(ParseError::invalid_escape(&format!("\\{}{}", marker, hex))),
        }
    }

    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| ParseError::invalid_escape(&format!("\\{}{}", marker, hex)))
}

/// Unescapes the content of a single-quoted scalar (`''` becomes `'`).
pub fn unescape_single_quoted(content: &str) -> String {
    content.replace("''", "'")
}

#[inline]
fn needs_escape(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{1F}' | '\u{85}' | '\u{A0}' | '\u{2028}' | '\u{2029}')
}

/// Returns `true` if the string contains characters only a double-quoted
/// scalar can carry (control characters, NEL, NBSP, line/paragraph separators).
pub fn requires_double_quoting(value: &str) -> bool {
    value.chars().any(needs_escape)
}

/// Wraps the string in double quotes, escaping what needs escaping.
pub fn escape_with_double_quotes(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    output.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\0' => output.push_str("\\0"),
            '\u{07}' => output.push_str("\\a"),
            '\u{08}' => output.push_str("\\b"),
            '\t' => output.push_str("\\t"),
            '\n' => output.push_str("\\n"),
            '\u{0B}' => output.push_str("\\v"),
            '\u{0C}' => output.push_str("\\f"),
            '\r' => output.push_str("\\r"),
            '\u{1B}' => output.push_str("\\e"),
            '\u{85}' => output.push_str("\\N"),
            '\u{A0}' => output.push_str("\\_"),
            '\u{2028}' => output.push_str("\\L"),
            '\u{2029}' => output.push_str("\\P"),
            c if needs_escape(c) => output.push_str(&format!("\\x{:02x}", c as u32)),
            c => output.push(c),
        }
    }
    output.push('"');
    output
}

const SINGLE_QUOTED_WORDS: [&str; 10] = [
    "null", "~", "true", "false", "y", "n", "yes", "no", "on", "off",
];

/// Returns `true` if the string must be single-quoted to survive a reparse:
/// reserved words, whitespace, flow indicators anywhere, or an indicator
/// character in first position.
pub fn requires_single_quoting(value: &str) -> bool {
    let lower = value.to_lowercase();
    if SINGLE_QUOTED_WORDS.contains(&lower.as_str()) {
        return true;
    }

    if value.chars().any(|ch| {
        ch.is_whitespace()
            || matches!(
                ch,
                '\'' | '"' | ':' | '{' | '}' | '[' | ']' | ',' | '&' | '*' | '#' | '?'
            )
    }) {
        return true;
    }

    matches!(
        value.chars().next(),
        Some('-' | '?' | '|' | '<' | '>' | '=' | '!' | '%' | '@' | '`')
    )
}

/// Wraps the string in single quotes, doubling embedded quotes.
pub fn escape_with_single_quotes(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
