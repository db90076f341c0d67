//! Scalar tags: recognizing plain text and constructing typed values.
//!
//! Each [`Tag`] knows two things about a scalar:
//!
//! - whether the text looks like its type ([`Tag::recognize`]), used for
//!   implicit resolution of plain scalars
//! - how to build a [`Value`] from the text ([`Tag::construct`])
//!
//! | Tag | Recognizes | Produces |
//! |-----|------------|----------|
//! | `null` | empty text, `~`, `null` in any case | [`Value::Null`] |
//! | `bool` | `true`/`false` in any case | [`Value::Bool`] |
//! | `int` | decimal, `0x` hex, `0o` and leading-zero octal, `_` separators | [`Number::Integer`] or [`Value::BigInt`] |
//! | `float` | numeric text with `,`/`_` separators, `.inf`, `.nan` | a float [`Number`] |
//! | `timestamp` | `YYYY-MM-DD` with optional time and zone | epoch seconds or [`Value::Date`] |
//! | `str` | anything | [`Value::String`] |
//! | `binary` | explicit only | [`Value::Binary`] |
//! | non-specific (`!`) | explicit only | leading integer of the text |
//!
//! ## Examples
//!
//! ```rust
//! use yaml_inline::{Number, Tag, Value};
//!
//! assert!(Tag::Int.recognize("0x1A"));
//! assert_eq!(
//!     Tag::Int.construct("0x1A", true).unwrap(),
//!     Value::Number(Number::Integer(26))
//! );
//! assert!(Tag::Float.construct("abc", false).is_err());
//! ```

use crate::error::TagError;
use crate::{Number, Value};
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use num_bigint::BigInt;
use regex::Regex;
use std::sync::OnceLock;

/// Prefix shared by every canonical core-schema tag.
pub const TAG_PREFIX: &str = "tag:yaml.org,2002:";

const BINARY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A scalar type the resolver can apply to text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Binary,
    /// `use_datetime` selects [`Value::Date`] over epoch seconds.
    Timestamp { use_datetime: bool },
    /// The bare `!` tag.
    NonSpecific,
}

impl Tag {
    /// Short name of the tag (`"int"`, `"str"`, ...). Empty for [`Tag::NonSpecific`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Bool => "bool",
            Tag::Int => "int",
            Tag::Float => "float",
            Tag::Str => "str",
            Tag::Binary => "binary",
            Tag::Timestamp { .. } => "timestamp",
            Tag::NonSpecific => "",
        }
    }

    /// Canonical tag string, e.g. `tag:yaml.org,2002:int`.
    ///
    /// ```rust
    /// use yaml_inline::Tag;
    ///
    /// assert_eq!(Tag::Bool.canonical_name(), "tag:yaml.org,2002:bool");
    /// assert_eq!(Tag::NonSpecific.canonical_name(), "");
    /// ```
    #[must_use]
    pub fn canonical_name(&self) -> String {
        match self {
            Tag::NonSpecific => String::new(),
            tag => format!("{}{}", TAG_PREFIX, tag.name()),
        }
    }

    /// Returns `true` if the tag takes part in implicit resolution.
    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        !matches!(self, Tag::Binary | Tag::NonSpecific)
    }

    /// Returns `true` if `text` has the lexical form of this tag's type.
    #[must_use]
    pub fn recognize(&self, text: &str) -> bool {
        match self {
            Tag::Null => text.is_empty() || text == "~" || text.eq_ignore_ascii_case("null"),
            Tag::Bool => text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false"),
            Tag::Int => recognize_int(text),
            Tag::Float => recognize_float(text),
            Tag::Timestamp { .. } => recognize_timestamp(text),
            Tag::Str | Tag::Binary | Tag::NonSpecific => true,
        }
    }

    /// Builds a value from `text`.
    ///
    /// With `implicit` set the caller has already checked [`Tag::recognize`].
    /// Otherwise the tag was given explicitly and text it does not recognize
    /// is a [`TagError::TypeMismatch`].
    pub fn construct(&self, text: &str, implicit: bool) -> Result<Value, TagError> {
        if !implicit && !self.recognize(text) {
            return Err(TagError::type_mismatch(self.name(), text));
        }

        match self {
            Tag::Null => Ok(Value::Null),
            Tag::Bool => Ok(Value::Bool(text.starts_with(['t', 'T']))),
            Tag::Int => construct_int(text),
            Tag::Float => construct_float(text),
            Tag::Str => Ok(Value::String(text.to_string())),
            Tag::Binary => construct_binary(text),
            Tag::Timestamp { use_datetime } => {
                construct_timestamp(text, *use_datetime, implicit)
            }
            Tag::NonSpecific => Ok(Value::Number(Number::Integer(leading_integer(text)))),
        }
    }
}

fn recognize_int(text: &str) -> bool {
    if let Some(digits) = text.strip_prefix("0o") {
        return has_digits(digits, |c| matches!(c, '0'..='7'));
    }
    if let Some(digits) = text.strip_prefix("0x") {
        return has_digits(digits, |c| c.is_ascii_hexdigit());
    }

    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    unsigned.starts_with(|c: char| c.is_ascii_digit())
        && has_digits(unsigned, |c| c.is_ascii_digit())
}

/// At least one digit, and nothing but digits and `_`.
fn has_digits(text: &str, is_digit: impl Fn(char) -> bool) -> bool {
    text.chars().any(&is_digit) && text.chars().all(|c| c == '_' || is_digit(c))
}

fn construct_int(text: &str) -> Result<Value, TagError> {
    let cleaned = text.replace('_', "");
    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };

    let (digits, radix) = if let Some(hex) = unsigned.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(octal) = unsigned.strip_prefix("0o") {
        (octal, 8)
    } else if unsigned.len() > 1
        && unsigned.starts_with('0')
        && unsigned.bytes().all(|b| matches!(b, b'0'..=b'7'))
    {
        (&unsigned[1..], 8)
    } else {
        (unsigned, 10)
    };

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    let value = match i64::from_str_radix(&signed, radix) {
        Ok(n) => Value::Number(Number::Integer(n)),
        Err(_) => match BigInt::parse_bytes(signed.as_bytes(), radix) {
            Some(big) => Value::BigInt(big),
            None => return Err(TagError::type_mismatch("int", text)),
        },
    };

    // Decimal text must print back unchanged; `+12` or `089` stay strings.
    if radix == 10 {
        let printed = match &value {
            Value::Number(Number::Integer(n)) => n.to_string(),
            Value::BigInt(big) => big.to_string(),
            _ => String::new(),
        };
        if printed != cleaned {
            return Ok(Value::String(cleaned));
        }
    }
    Ok(value)
}

fn recognize_float(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    if unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return is_numeric(&unsigned.replace([',', '_'], ""));
    }
    unsigned.eq_ignore_ascii_case(".inf") || unsigned.eq_ignore_ascii_case(".nan")
}

fn construct_float(text: &str) -> Result<Value, TagError> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    if unsigned.eq_ignore_ascii_case(".inf") {
        let number = if negative {
            Number::NegativeInfinity
        } else {
            Number::Infinity
        };
        return Ok(Value::Number(number));
    }
    if unsigned.eq_ignore_ascii_case(".nan") {
        return Ok(Value::Number(Number::NaN));
    }

    text.replace([',', '_'], "")
        .trim()
        .parse::<f64>()
        .map(|f| Value::Number(Number::from(f)))
        .map_err(|_| TagError::type_mismatch("float", text))
}

/// Numeric-string test: optional surrounding whitespace, an optional sign,
/// digits with at most one decimal point and an optional exponent.
pub(crate) fn is_numeric(text: &str) -> bool {
    let bytes = text
        .trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'))
        .as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let integer_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut has_digits = i > integer_start;

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let fraction_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        has_digits |= i > fraction_start;
    }
    if !has_digits {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exponent_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exponent_start {
            return false;
        }
    }

    i == bytes.len()
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?x)^
            (?P<year>[0-9]{4})
            -(?P<month>[0-9]{1,2})
            -(?P<day>[0-9]{1,2})
            (?:
                (?:[Tt]|[\x20\t]+)
                (?P<hour>[0-9]{1,2})
                :(?P<minute>[0-9]{2})
                :(?P<second>[0-9]{2})
                (?:\.(?P<fraction>[0-9]*))?
                (?:[\x20\t]*(?P<tz>Z|(?P<tz_sign>[-+])(?P<tz_hour>[0-9]{1,2})(?::(?P<tz_minute>[0-9]{2}))?))?
            )?
            $",
        )
        .expect("timestamp pattern is valid")
    })
}

fn recognize_timestamp(text: &str) -> bool {
    text.len() >= 8
        && text.bytes().take(4).all(|b| b.is_ascii_digit())
        && timestamp_pattern().is_match(text)
}

/// Builds the instant for a timestamp.
///
/// With `lenient` set, day and time-of-day overflow roll forward
/// (`2001-02-30` is 2001-03-02, second 60 is the next minute). Otherwise
/// fields that name no real instant are an error.
fn construct_timestamp(text: &str, use_datetime: bool, lenient: bool) -> Result<Value, TagError> {
    let caps = timestamp_pattern()
        .captures(text)
        .ok_or_else(|| TagError::type_mismatch("timestamp", text))?;
    let invalid = || TagError::InvalidTimestamp(text.to_string());
    let field = |name: &str| -> u32 {
        caps.name(name)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    let year = i32::try_from(field("year")).map_err(|_| invalid())?;
    let nanos: u32 = caps.name("fraction").map_or(0, |m| {
        let mut digits: String = m.as_str().chars().take(9).collect();
        while digits.len() < 9 {
            digits.push('0');
        }
        digits.parse().unwrap_or(0)
    });

    let local = if lenient {
        let months = i64::from(year) * 12 + i64::from(field("month")) - 1;
        let first = NaiveDate::from_ymd_opt(
            i32::try_from(months.div_euclid(12)).map_err(|_| invalid())?,
            u32::try_from(months.rem_euclid(12) + 1).map_err(|_| invalid())?,
            1,
        )
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
        let elapsed = Duration::days(i64::from(field("day")) - 1)
            + Duration::seconds(
                i64::from(field("hour")) * 3600
                    + i64::from(field("minute")) * 60
                    + i64::from(field("second")),
            )
            + Duration::nanoseconds(i64::from(nanos));
        first.checked_add_signed(elapsed).ok_or_else(invalid)?
    } else {
        let date =
            NaiveDate::from_ymd_opt(year, field("month"), field("day")).ok_or_else(invalid)?;
        let time =
            NaiveTime::from_hms_nano_opt(field("hour"), field("minute"), field("second"), nanos)
                .ok_or_else(invalid)?;
        date.and_time(time)
    };

    let mut offset = i64::from(field("tz_hour")) * 3600 + i64::from(field("tz_minute")) * 60;
    if caps.name("tz_sign").map(|m| m.as_str()) == Some("-") {
        offset = -offset;
    }

    let utc = local
        .checked_sub_signed(Duration::seconds(offset))
        .ok_or_else(invalid)?;
    let datetime = Utc.from_utc_datetime(&utc);

    if use_datetime {
        Ok(Value::Date(datetime))
    } else {
        Ok(Value::Number(Number::Integer(datetime.timestamp())))
    }
}

fn construct_binary(text: &str) -> Result<Value, TagError> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Ok(Value::Binary(Vec::new()));
    }
    if cleaned.len() % 4 != 0 {
        return Err(TagError::InvalidBase64Length(cleaned.len()));
    }

    let body = cleaned.trim_end_matches('=');
    let padding = cleaned.len() - body.len();
    if padding > 2
        || body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
    {
        return Err(TagError::InvalidBase64Charset(cleaned));
    }

    BINARY_ENGINE
        .decode(cleaned.as_bytes())
        .map(Value::Binary)
        .map_err(|_| TagError::InvalidBase64Charset(cleaned))
}

/// Integer prefix of the text: leading whitespace, a sign and digits,
/// saturating on overflow. Text without digits is `0`.
fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: &str = &unsigned[..unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len())];
    if digits.is_empty() {
        return 0;
    }

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    signed
        .parse()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}
