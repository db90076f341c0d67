//! Flow-syntax dumper.
//!
//! [`Dumper`] renders a [`Value`] as a single flow expression that
//! [`crate::parse`] reads back to an equal value. Strings are quoted only
//! when bare text would resolve to something else.
//!
//! | Value | Output |
//! |-------|--------|
//! | `Null` | `null` |
//! | `Bool` | `true` / `false` |
//! | integer, `BigInt` | decimal digits |
//! | float | shortest repr; whole numbers get `!!float` |
//! | `.inf`, `-.inf`, `.nan` | `.Inf`, `-.Inf`, `.NaN` |
//! | `Binary` | `!!binary <base64>` |
//! | `Date` | ISO 8601 with offset |
//! | `Sequence` | `[a, b]` |
//! | `Mapping` | `{ a: 1, b: 2 }` |

use crate::error::DumpError;
use crate::escape::{
    escape_with_double_quotes, escape_with_single_quotes, requires_double_quoting,
    requires_single_quoting,
};
use crate::resolver::TagResolver;
use crate::tag::{is_numeric, Tag};
use crate::{DumpOptions, Mapping, Number, Value};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use log::debug;

pub struct Dumper<'a> {
    options: &'a DumpOptions,
    resolver: &'static TagResolver,
}

impl<'a> Dumper<'a> {
    pub fn new(options: &'a DumpOptions) -> Self {
        Dumper {
            options,
            resolver: TagResolver::shared(false),
        }
    }

    pub fn dump(&self, value: &Value) -> Result<String, DumpError> {
        match value {
            Value::Resource(kind) => {
                if self.options.exception_on_invalid_type {
                    Err(DumpError::UnsupportedResource(kind.clone()))
                } else {
                    debug!("resource {:?} dumped as null", kind);
                    Ok("null".to_string())
                }
            }
            Value::Date(date) => Ok(dump_date(date)),
            Value::Object(object) => {
                if self.options.allow_objects {
                    Ok(format!("!php/object:{}", object.payload()))
                } else {
                    self.unsupported_object()
                }
            }
            Value::Record(map) => {
                if self.options.object_as_map || self.options.allow_objects {
                    self.dump_mapping(map)
                } else {
                    self.unsupported_object()
                }
            }
            Value::Sequence(items) => self.dump_sequence(items),
            Value::Mapping(map) => self.dump_mapping(map),
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(dump_number(n)),
            Value::BigInt(n) => Ok(n.to_string()),
            Value::Binary(bytes) => Ok(format!("!!binary {}", STANDARD.encode(bytes))),
            Value::String(s) => Ok(self.dump_string(s)),
        }
    }

    fn unsupported_object(&self) -> Result<String, DumpError> {
        if self.options.exception_on_invalid_type {
            Err(DumpError::ObjectSupportDisabled)
        } else {
            debug!("object dumped as null; object support is disabled");
            Ok("null".to_string())
        }
    }

    fn dump_sequence(&self, items: &[Value]) -> Result<String, DumpError> {
        let parts = items
            .iter()
            .map(|item| self.dump(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("[{}]", parts.join(", ")))
    }

    fn dump_mapping(&self, map: &Mapping) -> Result<String, DumpError> {
        let parts = map
            .iter()
            .map(|(key, value)| Ok(format!("{}: {}", self.dump_string(key), self.dump(value)?)))
            .collect::<Result<Vec<_>, DumpError>>()?;
        Ok(format!("{{ {} }}", parts.join(", ")))
    }

    fn dump_string(&self, value: &str) -> String {
        if (!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())) || is_numeric(value) {
            return format!("'{}'", value);
        }
        if value.is_empty() {
            return "''".to_string();
        }
        if requires_double_quoting(value) {
            return escape_with_double_quotes(value);
        }
        if requires_single_quoting(value) || self.resolver.implicit_tag(value) != Some(Tag::Str) {
            return escape_with_single_quotes(value);
        }
        value.to_string()
    }
}

fn dump_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string()
}

fn dump_number(number: &Number) -> String {
    match number {
        Number::Integer(n) => n.to_string(),
        Number::Float(f) => dump_float(*f),
        Number::Infinity => ".Inf".to_string(),
        Number::NegativeInfinity => "-.Inf".to_string(),
        Number::NaN => ".NaN".to_string(),
    }
}

fn dump_float(f: f64) -> String {
    if f.is_nan() {
        return ".NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { ".Inf" } else { "-.Inf" }.to_string();
    }

    let repr = format!("{:?}", f);
    let repr = repr.strip_suffix(".0").unwrap_or(&repr);
    // A whole float would read back as an int.
    if f.fract() == 0.0 {
        format!("!!float {}", repr)
    } else {
        repr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ForeignObject;

    fn dump(value: &Value) -> String {
        Dumper::new(&DumpOptions::default()).dump(value).unwrap()
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(dump(&Value::Null), "null");
        assert_eq!(dump(&Value::Bool(false)), "false");
        assert_eq!(dump(&Value::from(-12)), "-12");
        assert_eq!(dump(&Value::from(1.5)), "1.5");
        assert_eq!(dump(&Value::from(3.0)), "!!float 3");
        assert_eq!(dump(&Value::from(1e-7)), "1e-7");
        assert_eq!(dump(&Value::Number(Number::NegativeInfinity)), "-.Inf");
        assert_eq!(dump(&Value::Number(Number::NaN)), ".NaN");
        assert_eq!(dump(&Value::Binary(b"Hello".to_vec())), "!!binary SGVsbG8=");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(dump(&string("hello")), "hello");
        assert_eq!(dump(&string("")), "''");
        assert_eq!(dump(&string("123")), "'123'");
        assert_eq!(dump(&string("1.5e3")), "'1.5e3'");
        assert_eq!(dump(&string("true")), "'true'");
        assert_eq!(dump(&string("yes")), "'yes'");
        assert_eq!(dump(&string("0x1A")), "'0x1A'");
        assert_eq!(dump(&string(".inf")), "'.inf'");
        assert_eq!(dump(&string("2024-01-01")), "'2024-01-01'");
        assert_eq!(dump(&string("a b")), "'a b'");
        assert_eq!(dump(&string("it's")), "'it''s'");
        assert_eq!(dump(&string("line\nbreak")), "\"line\\nbreak\"");
        assert_eq!(dump(&string("@home")), "'@home'");
    }

    #[test]
    fn test_containers() {
        let mut map = Mapping::new();
        map.insert("a".to_string(), Value::from(1));
        map.insert("b c".to_string(), Value::Sequence(vec![string("x"), Value::Null]));
        assert_eq!(dump(&Value::Mapping(map)), "{ a: 1, 'b c': [x, null] }");
        assert_eq!(dump(&Value::Sequence(vec![])), "[]");
        assert_eq!(dump(&Value::Mapping(Mapping::new())), "{  }");
    }

    #[test]
    fn test_date() {
        use chrono::TimeZone;
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(dump(&Value::Date(date)), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_objects_and_resources() {
        let object = Value::Object(ForeignObject::new("O:8:\"stdClass\":0:{}"));
        let record = Value::Record([("k".to_string(), Value::from(1))].into_iter().collect());
        let resource = Value::Resource("stream".to_string());

        assert_eq!(dump(&object), "null");
        assert_eq!(dump(&record), "null");
        assert_eq!(dump(&resource), "null");

        let strict = DumpOptions::new().with_exception_on_invalid_type(true);
        let dumper = Dumper::new(&strict);
        assert_eq!(dumper.dump(&object), Err(DumpError::ObjectSupportDisabled));
        assert_eq!(
            dumper.dump(&resource),
            Err(DumpError::UnsupportedResource("stream".to_string()))
        );

        let objects = DumpOptions::new().with_allow_objects(true);
        assert_eq!(
            Dumper::new(&objects).dump(&object).unwrap(),
            "!php/object:O:8:\"stdClass\":0:{}"
        );

        let as_map = DumpOptions::new().with_object_as_map(true);
        assert_eq!(Dumper::new(&as_map).dump(&record).unwrap(), "{ k: 1 }");
    }
}
