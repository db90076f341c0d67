//! Error types for parsing and dumping flow values.
//!
//! ## Error Categories
//!
//! - [`ParseError`]: malformed flow syntax (unterminated containers, bad
//!   quoting, reserved indicators, trailing garbage). Carries the byte offset
//!   and the offending text. Tag and reference failures are folded into it.
//! - [`TagError`]: a scalar that an explicit tag cannot construct, or a
//!   special form (`!php/object:`, `!php/const:`) the options do not allow
//! - [`ReferenceError`]: an `*alias` that is empty or missing from the table
//! - [`DumpError`]: a value with no flow form (resources, objects when object
//!   support is off), only raised with `exception_on_invalid_type`
//!
//! ## Examples
//!
//! ```rust
//! use yaml_inline::{from_str, ParseError};
//!
//! let result = from_str("[1, 2");
//! assert!(matches!(result, Err(ParseError::UnterminatedSequence { .. })));
//! ```

use thiserror::Error;

/// Errors raised while parsing a flow expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Content left after the top-level value that is not a comment
    #[error("Unexpected characters near \"{found}\" at offset {offset}")]
    TrailingGarbage { offset: usize, found: String },

    /// A quoted scalar not followed by one of the expected delimiters
    #[error("Unexpected characters ({found}) at offset {offset}")]
    UnexpectedCharacters { offset: usize, found: String },

    /// A plain scalar starting with `@`, `` ` ``, `|` or `>`
    #[error("The reserved indicator \"{indicator}\" cannot start a plain scalar; you need to quote the scalar ({scalar})")]
    ReservedIndicator { indicator: char, scalar: String },

    /// A quote that is never closed
    #[error("Malformed quoted scalar at offset {offset}: {found}")]
    MalformedQuotedScalar { offset: usize, found: String },

    /// A plain scalar with no terminating delimiter
    #[error("Malformed inline YAML string at offset {offset}: {found}")]
    MalformedScalar { offset: usize, found: String },

    /// A `[` with no matching `]`
    #[error("Unterminated sequence: {found}")]
    UnterminatedSequence { found: String },

    /// A `{` with no matching `}`
    #[error("Unterminated mapping: {found}")]
    UnterminatedMapping { found: String },

    /// A mapping colon glued to the following value
    #[error("Colon at offset {offset} must be followed by a space or a flow indicator: {found}")]
    MissingSpaceAfterColon { offset: usize, found: String },

    /// An unknown or truncated escape in a double-quoted scalar
    #[error("Found unknown escape character \"{escape}\"")]
    InvalidEscape { escape: String },

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

impl ParseError {
    /// Creates a trailing-garbage error for the text left at `offset`.
    pub fn trailing_garbage(offset: usize, found: &str) -> Self {
        ParseError::TrailingGarbage {
            offset,
            found: found.to_string(),
        }
    }

    /// Creates an unexpected-characters error for the text left at `offset`.
    pub fn unexpected_characters(offset: usize, found: &str) -> Self {
        ParseError::UnexpectedCharacters {
            offset,
            found: found.to_string(),
        }
    }

    /// Creates a malformed quoted scalar error.
    pub fn malformed_quoted(offset: usize, found: &str) -> Self {
        ParseError::MalformedQuotedScalar {
            offset,
            found: found.to_string(),
        }
    }

    /// Creates a malformed plain scalar error.
    pub fn malformed_scalar(offset: usize, found: &str) -> Self {
        ParseError::MalformedScalar {
            offset,
            found: found.to_string(),
        }
    }

    /// Creates an invalid escape error.
    pub fn invalid_escape(escape: &str) -> Self {
        ParseError::InvalidEscape {
            escape: escape.to_string(),
        }
    }

    /// Returns `true` for errors caused by malformed syntax, as opposed to
    /// tag or reference failures.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_inline::from_str;
    ///
    /// assert!(from_str("{a: 1").unwrap_err().is_syntax());
    /// assert!(!from_str("*missing").unwrap_err().is_syntax());
    /// ```
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        !matches!(self, ParseError::Tag(_) | ParseError::Reference(_))
    }
}

/// Errors raised while resolving a scalar through a tag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TagError {
    /// No implicit tag recognized the plain scalar
    #[error("Unsupported plain scalar \"{0}\"")]
    Unrecognized(String),

    /// An explicit tag that is not registered
    #[error("Unsupported tag \"{0}\"")]
    UnsupportedTag(String),

    /// An explicit tag applied to text it cannot represent
    #[error("The scalar \"{value}\" is not a valid {tag}")]
    TypeMismatch { tag: &'static str, value: String },

    #[error("The normalized base64 encoded data (data without whitespace characters) length must be a multiple of four ({0} bytes given)")]
    InvalidBase64Length(usize),

    #[error("The base64 encoded data ({0}) contains invalid characters")]
    InvalidBase64Charset(String),

    /// Date fields that do not name a real calendar instant
    #[error("The timestamp \"{0}\" does not denote a valid date and time")]
    InvalidTimestamp(String),

    #[error("Object support when parsing a YAML file has been disabled")]
    ObjectSupportDisabled,

    #[error("The string \"{0}\" could not be parsed as a constant; constant support is disabled")]
    ConstantSupportDisabled(String),

    #[error("The constant \"{0}\" is not defined")]
    UndefinedConstant(String),
}

impl TagError {
    /// Creates a type mismatch error for the canonical tag short name.
    pub fn type_mismatch(tag: &'static str, value: &str) -> Self {
        TagError::TypeMismatch {
            tag,
            value: value.to_string(),
        }
    }
}

/// Errors raised while resolving an `*alias`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("A reference must contain at least one character")]
    EmptyName,

    #[error("Reference \"{0}\" does not exist")]
    NotFound(String),
}

/// Errors raised while dumping a value to flow syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DumpError {
    #[error("Unable to dump resources in a YAML file (\"{0}\")")]
    UnsupportedResource(String),

    #[error("Object support when dumping a YAML file has been disabled")]
    ObjectSupportDisabled,
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_text() {
        let err = ParseError::trailing_garbage(3, "x");
        assert!(err.to_string().contains("\"x\""));

        let err = ParseError::from(TagError::UndefinedConstant("FOO".to_string()));
        assert_eq!(err.to_string(), "The constant \"FOO\" is not defined");
        assert!(!err.is_syntax());
    }

    #[test]
    fn test_reference_errors_convert() {
        let err: ParseError = ReferenceError::NotFound("a".to_string()).into();
        assert!(matches!(err, ParseError::Reference(ReferenceError::NotFound(_))));
    }
}
