//! Flow-syntax parser.
//!
//! [`Parser`] walks a single flow expression with a byte cursor: `[...]`
//! sequences, `{...}` mappings, quoted scalars and plain scalars. Plain
//! scalars are then evaluated: `*alias` references, special
//! `!php/object:` / `!php/const:` literals, explicit `!tag` scalars, and
//! finally implicit resolution through the [`TagResolver`].

use crate::error::{ParseError, ReferenceError, Result, TagError};
use crate::escape::{unescape_double_quoted, unescape_single_quoted};
use crate::resolver::TagResolver;
use crate::{ForeignObject, Mapping, ParseOptions, Value};
use log::debug;

const SEQUENCE_TERMINATORS: &[u8] = b",]";
const MAPPING_TERMINATORS: &[u8] = b",}";
const KEY_TERMINATORS: &[u8] = b": ";

fn is_trim_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

fn trim(text: &str) -> &str {
    text.trim_matches(is_trim_char)
}

/// Drops a trailing comment: the first `#` preceded by a space or tab,
/// together with that whitespace.
fn strip_comment(text: &str) -> &str {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if b == b'#' && matches!(bytes[i - 1], b' ' | b'\t') {
            let mut end = i - 1;
            while end > 0 && matches!(bytes[end - 1], b' ' | b'\t') {
                end -= 1;
            }
            return &text[..end];
        }
    }
    text
}

/// A scalar as scanned, before evaluation.
enum Scalar {
    Quoted(String),
    Plain(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Quoted(s) | Scalar::Plain(s) => s,
        }
    }
}

/// Cursor over one flow expression.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    options: &'a ParseOptions,
    references: &'a Mapping,
    resolver: &'static TagResolver,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &'a ParseOptions, references: &'a Mapping) -> Self {
        Parser {
            input,
            position: 0,
            options,
            references,
            resolver: TagResolver::shared(options.use_datetime),
        }
    }

    /// Parses the whole input as one value.
    ///
    /// Surrounding whitespace is ignored and empty input is the empty
    /// string. After the value only whitespace or a `#` comment may follow.
    pub fn parse(mut self) -> Result<Value> {
        self.input = trim(self.input);
        if self.input.is_empty() {
            return Ok(Value::String(String::new()));
        }

        let value = match self.peek_byte() {
            Some(b'[') => self.parse_sequence()?,
            Some(b'{') => self.parse_mapping()?,
            _ => self.parse_evaluated_scalar(None)?,
        };

        self.expect_end()?;
        Ok(value)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn expect_end(&self) -> Result<()> {
        let rest = self.remaining();
        let after_space = rest.trim_start_matches(is_trim_char);
        if after_space.is_empty() || (after_space.len() < rest.len() && after_space.starts_with('#')) {
            Ok(())
        } else {
            Err(ParseError::trailing_garbage(self.position, rest))
        }
    }

    /// Scans one scalar. Without terminators the scalar runs to the end of
    /// input (minus any comment); with them it stops at the first terminator
    /// after its first character.
    fn parse_scalar(&mut self, terminators: Option<&[u8]>) -> Result<Scalar> {
        let start = self.position;

        if let Some(b'"' | b'\'') = self.peek_byte() {
            let content = self.parse_quoted_scalar()?;
            if let Some(terminators) = terminators {
                let rest = self.remaining().trim_start_matches(' ');
                match rest.bytes().next() {
                    Some(b) if terminators.contains(&b) => {}
                    Some(_) => {
                        return Err(ParseError::unexpected_characters(
                            self.position,
                            self.remaining(),
                        ))
                    }
                    None => return Err(ParseError::malformed_scalar(start, &self.input[start..])),
                }
            }
            return Ok(Scalar::Quoted(content));
        }

        let rest = self.remaining();
        let raw = match terminators {
            None => {
                self.position = self.input.len();
                strip_comment(rest)
            }
            Some(terminators) => {
                let first = rest.chars().next().map_or(0, char::len_utf8);
                let end = rest
                    .bytes()
                    .enumerate()
                    .skip(first)
                    .find(|(_, b)| terminators.contains(b))
                    .map(|(i, _)| i)
                    .ok_or_else(|| ParseError::malformed_scalar(start, rest))?;
                self.position = start + end;
                &rest[..end]
            }
        };

        if let Some(indicator @ ('@' | '`' | '|' | '>')) = raw.chars().next() {
            return Err(ParseError::ReservedIndicator {
                indicator,
                scalar: raw.to_string(),
            });
        }

        Ok(Scalar::Plain(trim(raw).to_string()))
    }

    fn parse_quoted_scalar(&mut self) -> Result<String> {
        let start = self.position;
        let rest = self.remaining();
        let bytes = rest.as_bytes();
        let quote = bytes[0];

        let mut i = 1;
        let end = loop {
            match bytes.get(i) {
                None => return Err(ParseError::malformed_quoted(start, rest)),
                Some(b'\\') if quote == b'"' => i += 2,
                Some(&b) if b == quote => {
                    if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') {
                        i += 2;
                    } else {
                        break i;
                    }
                }
                Some(_) => i += 1,
            }
        };

        self.position = start + end + 1;
        let content = &rest[1..end];
        if quote == b'"' {
            unescape_double_quoted(content)
        } else {
            Ok(unescape_single_quoted(content))
        }
    }

    fn parse_evaluated_scalar(&mut self, terminators: Option<&[u8]>) -> Result<Value> {
        match self.parse_scalar(terminators)? {
            Scalar::Quoted(content) => Ok(Value::String(content)),
            Scalar::Plain(text) => self.evaluate_scalar(&text),
        }
    }

    fn parse_sequence(&mut self) -> Result<Value> {
        let start = self.position;
        let input = self.input;
        let unterminated = || ParseError::UnterminatedSequence {
            found: input[start..].to_string(),
        };
        self.position += 1;

        let mut output = Vec::new();
        while let Some(b) = self.peek_byte() {
            match b {
                b'[' => output.push(self.parse_sequence()?),
                b'{' => output.push(self.parse_mapping()?),
                b']' => {
                    self.position += 1;
                    return Ok(Value::Sequence(output));
                }
                b',' | b' ' => self.position += 1,
                _ => {
                    let quoted = matches!(b, b'"' | b'\'');
                    let value = self
                        .parse_evaluated_scalar(Some(SEQUENCE_TERMINATORS))
                        .map_err(|e| match e {
                            ParseError::MalformedScalar { .. } => unterminated(),
                            other => other,
                        })?;

                    let embedded = match &value {
                        Value::String(text) if !quoted && text.contains(": ") => {
                            match self.parse_embedded_mapping(text) {
                                Ok(mapping) => Some(mapping),
                                Err(err) => {
                                    debug!("keeping {:?} as a string: {}", text, err);
                                    None
                                }
                            }
                        }
                        _ => None,
                    };
                    output.push(embedded.unwrap_or(value));
                }
            }
        }

        Err(unterminated())
    }

    /// Reads `key: value` text found inside a sequence as a one-entry mapping.
    /// Text left after the mapping's closing `}` is an error.
    fn parse_embedded_mapping(&self, text: &str) -> Result<Value> {
        let source = format!("{{{}}}", text);
        let mut parser = Parser::new(&source, self.options, self.references);
        let mapping = parser.parse_mapping()?;
        parser.expect_end()?;
        Ok(mapping)
    }

    fn parse_mapping(&mut self) -> Result<Value> {
        let start = self.position;
        let input = self.input;
        let unterminated = || ParseError::UnterminatedMapping {
            found: input[start..].to_string(),
        };
        let relabel = |e: ParseError| match e {
            ParseError::MalformedScalar { .. } => unterminated(),
            other => other,
        };
        self.position += 1;

        let mut output = Mapping::new();
        while let Some(b) = self.peek_byte() {
            match b {
                b' ' | b',' => {
                    self.position += 1;
                    continue;
                }
                b'}' => {
                    self.position += 1;
                    return Ok(if self.options.object_for_map {
                        Value::Record(output)
                    } else {
                        Value::Mapping(output)
                    });
                }
                _ => {}
            }

            let key = self
                .parse_scalar(Some(KEY_TERMINATORS))
                .map_err(relabel)?
                .into_string();

            let colon = match self.remaining().find(':') {
                Some(offset) => self.position + offset,
                None => break,
            };
            match input.as_bytes().get(colon + 1) {
                None => break,
                Some(b' ' | b'[' | b']' | b'{' | b'}') => {}
                Some(_) => {
                    return Err(ParseError::MissingSpaceAfterColon {
                        offset: colon,
                        found: input[start..].to_string(),
                    })
                }
            }
            self.position = colon;

            let value = loop {
                match self.peek_byte() {
                    None => return Err(unterminated()),
                    Some(b':' | b' ') => self.position += 1,
                    Some(b'[') => break self.parse_sequence()?,
                    Some(b'{') => break self.parse_mapping()?,
                    Some(_) => {
                        break self
                            .parse_evaluated_scalar(Some(MAPPING_TERMINATORS))
                            .map_err(relabel)?
                    }
                }
            };

            if output.contains_key(&key) {
                debug!("duplicate key {:?} ignored; the first value is kept", key);
            } else {
                output.insert(key, value);
            }
        }

        Err(unterminated())
    }

    fn evaluate_scalar(&self, scalar: &str) -> Result<Value> {
        if let Some(alias) = scalar.strip_prefix('*') {
            let name = match alias.find('#') {
                Some(end) => alias[..end].trim_end(),
                None => alias,
            };
            if name.is_empty() {
                return Err(ReferenceError::EmptyName.into());
            }
            return self
                .references
                .get(name)
                .cloned()
                .ok_or_else(|| ReferenceError::NotFound(name.to_string()).into());
        }

        if scalar.starts_with('!') {
            if let Some(payload) = scalar
                .strip_prefix("!php/object:")
                .or_else(|| scalar.strip_prefix("!!php/object:"))
            {
                return self.foreign_object(payload);
            }
            if let Some(name) = scalar.strip_prefix("!php/const:") {
                return self.constant(name, scalar);
            }

            let body = &scalar[1..];
            let tag_end = body.find(|c: char| c == ' ' || c == '\t').unwrap_or(body.len());
            let tag = &body[..tag_end];
            // `!!` alone names no tag.
            if tag != "!" && self.resolver.supports_tag(tag) {
                let rest = body[tag_end..].trim_start_matches(is_trim_char);
                let mut payload = Parser::new(rest, self.options, self.references);
                let text = payload.parse_scalar(None)?.into_string();
                payload.expect_end()?;
                return Ok(self.resolver.resolve(&text, Some(tag))?);
            }
            debug!("unknown tag {:?}; resolving {:?} as a plain scalar", tag, scalar);
        }

        Ok(self.resolver.resolve(scalar, None)?)
    }

    fn foreign_object(&self, payload: &str) -> Result<Value> {
        if self.options.allow_objects {
            Ok(Value::Object(ForeignObject::new(payload)))
        } else if self.options.exception_on_invalid_type {
            Err(TagError::ObjectSupportDisabled.into())
        } else {
            debug!("object literal replaced by null; object support is disabled");
            Ok(Value::Null)
        }
    }

    fn constant(&self, name: &str, scalar: &str) -> Result<Value> {
        if self.options.allow_constants {
            self.options
                .constant(name)
                .ok_or_else(|| TagError::UndefinedConstant(name.to_string()).into())
        } else if self.options.exception_on_invalid_type {
            Err(TagError::ConstantSupportDisabled(scalar.to_string()).into())
        } else {
            debug!("constant {:?} replaced by null; constant support is disabled", name);
            Ok(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;

    fn parse(input: &str) -> Result<Value> {
        Parser::new(input, &ParseOptions::default(), &Mapping::new()).parse()
    }

    fn parse_with(input: &str, options: &ParseOptions) -> Result<Value> {
        Parser::new(input, options, &Mapping::new()).parse()
    }

    fn int(n: i64) -> Value {
        Value::Number(Number::Integer(n))
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("foo #bar"), "foo");
        assert_eq!(strip_comment("foo\t \t# bar # baz"), "foo");
        assert_eq!(strip_comment("foo#bar"), "foo#bar");
        assert_eq!(strip_comment("#bar"), "#bar");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(parse("").unwrap(), string(""));
        assert_eq!(parse(" \t\n").unwrap(), string(""));
    }

    #[test]
    fn test_plain_scalars_resolve() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("12").unwrap(), int(12));
        assert_eq!(parse("foo bar # comment").unwrap(), string("foo bar"));
        assert_eq!(parse("foo#bar").unwrap(), string("foo#bar"));
    }

    #[test]
    fn test_quoted_scalars_are_not_evaluated() {
        assert_eq!(parse("'12'").unwrap(), string("12"));
        assert_eq!(parse("\"null\"").unwrap(), string("null"));
        assert_eq!(parse("'it''s'").unwrap(), string("it's"));
        assert_eq!(parse(r#""a\"b""#).unwrap(), string("a\"b"));
        assert_eq!(parse("'a' # note").unwrap(), string("a"));
    }

    #[test]
    fn test_quoted_errors() {
        assert!(matches!(
            parse("'abc"),
            Err(ParseError::MalformedQuotedScalar { .. })
        ));
        assert!(matches!(
            parse("'abc' def"),
            Err(ParseError::TrailingGarbage { .. })
        ));
        assert!(matches!(
            parse("['a' b]"),
            Err(ParseError::UnexpectedCharacters { .. })
        ));
    }

    #[test]
    fn test_sequences() {
        assert_eq!(
            parse("[foo, 12, [a, b], { k: v }]").unwrap(),
            Value::Sequence(vec![
                string("foo"),
                int(12),
                Value::Sequence(vec![string("a"), string("b")]),
                Value::Mapping([("k".to_string(), string("v"))].into_iter().collect()),
            ])
        );
        assert_eq!(parse("[]").unwrap(), Value::Sequence(vec![]));
        assert_eq!(parse("[a,]").unwrap(), Value::Sequence(vec![string("a")]));
    }

    #[test]
    fn test_embedded_mapping_in_sequence() {
        let expected: Mapping = [("foo".to_string(), string("bar"))].into_iter().collect();
        assert_eq!(
            parse("[foo: bar]").unwrap(),
            Value::Sequence(vec![Value::Mapping(expected)])
        );
        assert_eq!(
            parse("['foo: bar']").unwrap(),
            Value::Sequence(vec![string("foo: bar")])
        );
    }

    #[test]
    fn test_embedded_mapping_falls_back_to_string() {
        assert_eq!(
            parse("[a: 'b' c]").unwrap(),
            Value::Sequence(vec![string("a: 'b' c")])
        );
        assert_eq!(
            parse("[a: b} x, y]").unwrap(),
            Value::Sequence(vec![string("a: b} x"), string("y")])
        );
    }

    #[test]
    fn test_mappings() {
        let value = parse("{ a: 1, 'b c': [x], d: { e: ~ } }").unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.get("a"), Some(&int(1)));
        assert_eq!(map.get("b c"), Some(&Value::Sequence(vec![string("x")])));
        assert_eq!(
            map.get("d"),
            Some(&Value::Mapping([("e".to_string(), Value::Null)].into_iter().collect()))
        );
        assert_eq!(parse("{}").unwrap(), Value::Mapping(Mapping::new()));
        assert_eq!(parse("{a:[1]}").unwrap().as_mapping().map(Mapping::len), Some(1));
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let value = parse("{ a: 1, a: 2 }").unwrap();
        assert_eq!(value.as_mapping().unwrap().get("a"), Some(&int(1)));
    }

    #[test]
    fn test_colon_needs_space() {
        assert!(matches!(
            parse("{a:1}"),
            Err(ParseError::MissingSpaceAfterColon { .. })
        ));
    }

    #[test]
    fn test_unterminated_containers() {
        for input in ["[1, 2", "[1, 2,", "[", "['a'"] {
            assert!(
                matches!(parse(input), Err(ParseError::UnterminatedSequence { .. })),
                "{input}"
            );
        }
        for input in ["{a: 1", "{a: 1,", "{a", "{a: "] {
            assert!(
                matches!(parse(input), Err(ParseError::UnterminatedMapping { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn test_trailing_content() {
        assert!(parse("[1] # ok").is_ok());
        assert!(matches!(
            parse("[1] x"),
            Err(ParseError::TrailingGarbage { .. })
        ));
        assert!(matches!(
            parse("[1]]"),
            Err(ParseError::TrailingGarbage { .. })
        ));
    }

    #[test]
    fn test_reserved_indicators() {
        for input in ["@foo", "`foo", "|foo", ">foo", "[@foo]"] {
            assert!(
                matches!(parse(input), Err(ParseError::ReservedIndicator { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn test_references() {
        let mut references = Mapping::new();
        references.insert("anchor".to_string(), string("shared"));
        let options = ParseOptions::default();

        let value = Parser::new("[*anchor, *anchor #c]", &options, &references)
            .parse()
            .unwrap();
        assert_eq!(value, Value::Sequence(vec![string("shared"), string("shared")]));

        assert_eq!(
            Parser::new("*", &options, &references).parse(),
            Err(ParseError::from(ReferenceError::EmptyName))
        );
        assert_eq!(
            Parser::new("*nope", &options, &references).parse(),
            Err(ParseError::from(ReferenceError::NotFound("nope".to_string())))
        );
    }

    #[test]
    fn test_explicit_tags() {
        assert_eq!(parse("!!str 12").unwrap(), string("12"));
        assert_eq!(parse("!str 12").unwrap(), string("12"));
        assert_eq!(parse("!!int '17'").unwrap(), int(17));
        assert_eq!(
            parse("!!float 1").unwrap(),
            Value::Number(Number::Float(1.0))
        );
        assert_eq!(parse("! 12abc").unwrap(), int(12));
        assert_eq!(
            parse("!!binary SGVsbG8=").unwrap(),
            Value::Binary(b"Hello".to_vec())
        );
        assert!(matches!(
            parse("!!float abc"),
            Err(ParseError::Tag(TagError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_tagged_payload_must_end_the_scalar() {
        assert!(matches!(
            parse("!!str 'a' junk"),
            Err(ParseError::TrailingGarbage { .. })
        ));
        assert_eq!(parse("!!str 'a'  ").unwrap(), string("a"));
    }

    #[test]
    fn test_unknown_tag_resolves_implicitly() {
        assert_eq!(parse("!custom foo").unwrap(), string("!custom foo"));
        assert_eq!(parse("!! 12").unwrap(), string("!! 12"));
        assert_eq!(parse("! 12").unwrap(), int(12));
    }

    #[test]
    fn test_objects() {
        assert_eq!(parse("!php/object:O:8:\"stdClass\"").unwrap(), Value::Null);

        let strict = ParseOptions::new().with_exception_on_invalid_type(true);
        assert_eq!(
            parse_with("!php/object:x", &strict),
            Err(ParseError::Tag(TagError::ObjectSupportDisabled))
        );

        let allowed = ParseOptions::new().with_allow_objects(true);
        assert_eq!(
            parse_with("!!php/object:payload", &allowed).unwrap(),
            Value::Object(ForeignObject::new("payload"))
        );
    }

    #[test]
    fn test_constants() {
        assert_eq!(parse("!php/const:PHP_INT_MAX").unwrap(), Value::Null);

        let strict = ParseOptions::new().with_exception_on_invalid_type(true);
        assert!(matches!(
            parse_with("!php/const:PHP_INT_MAX", &strict),
            Err(ParseError::Tag(TagError::ConstantSupportDisabled(_)))
        ));

        let allowed = ParseOptions::new()
            .with_allow_constants(true)
            .with_constant("APP", string("demo"));
        assert_eq!(parse_with("!php/const:APP", &allowed).unwrap(), string("demo"));
        assert_eq!(
            parse_with("[!php/const:PHP_INT_MAX]", &allowed).unwrap(),
            Value::Sequence(vec![int(i64::MAX)])
        );
        assert_eq!(
            parse_with("!php/const:NOPE", &allowed),
            Err(ParseError::Tag(TagError::UndefinedConstant("NOPE".to_string())))
        );
    }

    #[test]
    fn test_object_for_map() {
        let options = ParseOptions::new().with_object_for_map(true);
        let value = parse_with("{ a: { b: 1 } }", &options).unwrap();
        match value {
            Value::Record(map) => assert!(matches!(map.get("a"), Some(Value::Record(_)))),
            other => panic!("expected a record, got {other:?}"),
        }
    }
}
