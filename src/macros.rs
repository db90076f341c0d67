#[macro_export]
macro_rules! yaml {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty sequence
    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::yaml!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key.to_string(), $crate::yaml!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Anything with a `From` conversion into `Value`
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Mapping, Number, Value};

    #[test]
    fn test_yaml_macro_scalars() {
        assert_eq!(yaml!(null), Value::Null);
        assert_eq!(yaml!(true), Value::Bool(true));
        assert_eq!(yaml!(42), Value::Number(Number::Integer(42)));
        assert_eq!(yaml!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(yaml!("hello"), Value::String("hello".to_string()));
        assert_eq!(yaml!(vec![0u8, 1]), Value::Binary(vec![0, 1]));
    }

    #[test]
    fn test_yaml_macro_nesting() {
        assert_eq!(yaml!([]), Value::Sequence(vec![]));
        assert_eq!(yaml!({}), Value::Mapping(Mapping::new()));

        let value = yaml!({ "a": [1, { "b": null }], "c": "d" });
        let map = value.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("a"),
            Some(&Value::Sequence(vec![
                Value::from(1),
                Value::Mapping([("b".to_string(), Value::Null)].into_iter().collect()),
            ]))
        );
    }
}
