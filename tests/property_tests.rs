//! Property-based tests for the dump/parse round trip.
//!
//! Every value the dumper writes must read back to an equal value, so these
//! generate scalars and small trees and check `from_str(to_string(v)) == v`.

use proptest::prelude::*;
use yaml_inline::{from_str, to_string, Mapping, Number, Value};

fn roundtrip(value: &Value) -> bool {
    match to_string(value) {
        Ok(dumped) => match from_str(&dumped) {
            Ok(parsed) => {
                if parsed != *value {
                    eprintln!("Dumped {:?} as {} but parsed {:?}", value, dumped, parsed);
                }
                parsed == *value
            }
            Err(e) => {
                eprintln!("Parse failed: {}", e);
                eprintln!("Dumped was: {}", dumped);
                false
            }
        },
        Err(e) => {
            eprintln!("Dump failed: {}", e);
            false
        }
    }
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,12}".prop_map(Value::from),
        "[a-z0-9 ._:-]{0,12}".prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..24).prop_map(Value::Binary),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::vec((".{0,8}", inner), 0..4).prop_map(|entries| {
                let mut map = Mapping::new();
                for (key, value) in entries {
                    if !map.contains_key(&key) {
                        map.insert(key, value);
                    }
                }
                Value::Mapping(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&Value::from(n)));
    }

    #[test]
    fn prop_f64(f in any::<f64>()) {
        prop_assert!(roundtrip(&Value::from(f)));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&Value::Bool(b)));
    }

    #[test]
    fn prop_any_string(s in ".*") {
        prop_assert!(roundtrip(&Value::from(s)));
    }

    #[test]
    fn prop_number_like_string(s in "[-+]?[0-9_.,eExo]{1,10}") {
        prop_assert!(roundtrip(&Value::from(s)));
    }

    #[test]
    fn prop_binary(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert!(roundtrip(&Value::Binary(bytes)));
    }

    #[test]
    fn prop_tree(value in tree()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_integer_text_parses(n in any::<i64>()) {
        prop_assert_eq!(from_str(&n.to_string()).unwrap(), Value::Number(Number::Integer(n)));
    }
}
