//! # yaml_inline
//!
//! A parser and dumper for YAML flow (inline) expressions with tag-driven
//! scalar resolution.
//!
//! ## What is a flow expression?
//!
//! The single-line form YAML uses inside brackets and braces:
//! `[a, b, 12]`, `{ name: Alice, tags: [x, y] }`, `!!binary SGVsbG8=`,
//! `2001-12-14t21:59:43.10-05:00`. This crate reads one such expression into a
//! [`Value`] and writes a [`Value`] back out so that it reparses to an equal
//! value.
//!
//! ## Key Features
//!
//! - **Tag resolution**: plain scalars become nulls, booleans, integers (hex,
//!   octal, arbitrary size), floats (`.inf`, `.nan`), timestamps or strings
//! - **Explicit tags**: `!!str`, `!!int`, `!!float`, `!!binary`,
//!   `!!timestamp` and the non-specific `!`
//! - **References**: `*alias` looked up in a caller-supplied table
//! - **Round-trip dumping**: strings are quoted exactly when bare text would
//!   read back as something else
//! - **Serde interop**: [`Value`] implements `Serialize` and `Deserialize`
//!
//! ## Quick Start
//!
//! ```rust
//! use yaml_inline::{from_str, to_string, Number, Value};
//!
//! let value = from_str("{ name: Alice, age: 30, tags: [rust, '42'] }").unwrap();
//! let map = value.as_mapping().unwrap();
//! assert_eq!(map.get("age"), Some(&Value::Number(Number::Integer(30))));
//! assert_eq!(map.get("tags").and_then(|t| t.as_sequence()).map(Vec::len), Some(2));
//!
//! assert_eq!(to_string(&value).unwrap(), "{ name: Alice, age: 30, tags: [rust, '42'] }");
//! ```
//!
//! ### Options and references
//!
//! ```rust
//! use yaml_inline::{parse, Mapping, ParseOptions, Value};
//!
//! let mut references = Mapping::new();
//! references.insert("base".to_string(), Value::from("shared"));
//!
//! let options = ParseOptions::new().with_object_for_map(true);
//! let value = parse("{ a: *base }", &options, &references).unwrap();
//! assert!(matches!(value, Value::Record(_)));
//! ```
//!
//! ### Building values with the yaml! macro
//!
//! ```rust
//! use yaml_inline::{to_string, yaml};
//!
//! let data = yaml!({ "list": [1, "two", null], "ok": true });
//! assert_eq!(to_string(&data).unwrap(), "{ list: [1, two, null], ok: true }");
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Parsing never panics on malformed input; every failure is a [`ParseError`]
//! - Options are passed per call; the only shared state is the immutable
//!   core-schema [`TagResolver`] built once per timestamp mode
//!
//! See [`syntax`] for the accepted grammar.

pub mod dumper;
pub mod error;
pub mod escape;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod resolver;
pub mod syntax;
pub mod tag;
pub mod value;

pub use dumper::Dumper;
pub use error::{DumpError, ParseError, ReferenceError, Result, TagError};
pub use map::Mapping;
pub use options::{DumpOptions, ParseOptions};
pub use parser::Parser;
pub use resolver::TagResolver;
pub use tag::Tag;
pub use value::{ForeignObject, Number, Value};

/// Parses one flow expression.
///
/// `references` supplies the values `*alias` scalars resolve to.
///
/// # Examples
///
/// ```rust
/// use yaml_inline::{parse, Mapping, ParseOptions, Value};
///
/// let value = parse("[1, '1', ~]", &ParseOptions::default(), &Mapping::new()).unwrap();
/// assert_eq!(
///     value,
///     Value::Sequence(vec![Value::from(1), Value::from("1"), Value::Null])
/// );
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed syntax, a tag that cannot construct
/// its scalar, an unknown reference, or a disabled object/constant literal
/// when `exception_on_invalid_type` is set.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(source: &str, options: &ParseOptions, references: &Mapping) -> Result<Value> {
    Parser::new(source, options, references).parse()
}

/// Parses one flow expression with default options and no references.
///
/// # Examples
///
/// ```rust
/// use yaml_inline::from_str;
///
/// let value = from_str("{ a: 0x1F }").unwrap();
/// assert_eq!(value.as_mapping().and_then(|m| m.get("a")).and_then(|v| v.as_i64()), Some(31));
/// ```
///
/// # Errors
///
/// See [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(source: &str) -> Result<Value> {
    parse(source, &ParseOptions::default(), &Mapping::new())
}

/// Dumps a value as one flow expression.
///
/// # Examples
///
/// ```rust
/// use yaml_inline::{dump, DumpOptions, Value};
///
/// let value = Value::Sequence(vec![Value::from("true"), Value::from(true)]);
/// assert_eq!(dump(&value, &DumpOptions::default()).unwrap(), "['true', true]");
/// ```
///
/// # Errors
///
/// With `exception_on_invalid_type` set, returns a [`DumpError`] for
/// resources and for objects that object support does not cover. Without it
/// those values are written as `null`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dump(value: &Value, options: &DumpOptions) -> Result<String, DumpError> {
    Dumper::new(options).dump(value)
}

/// Dumps a value with default options.
///
/// # Errors
///
/// See [`dump`]. With default options this never fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String, DumpError> {
    dump(value, &DumpOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_then_parse() {
        let value = yaml!({
            "name": "Alice",
            "numbers": ["1", 1, 1.5, null],
            "flags": { "on": "yes", "off": false }
        });
        let text = to_string(&value).unwrap();
        assert_eq!(from_str(&text).unwrap(), value);
    }

    #[test]
    fn test_whitespace_and_comments_around_value() {
        assert_eq!(from_str("  [a] # trailing").unwrap(), yaml!(["a"]));
        assert_eq!(from_str("\t'x'\n").unwrap(), Value::from("x"));
    }
}
