//! Configuration for parsing and dumping.
//!
//! - [`ParseOptions`]: flags read by [`crate::parse`], plus the constant
//!   table consulted by `!php/const:` scalars
//! - [`DumpOptions`]: flags read by [`crate::dump`]
//!
//! Options are plain values passed into every call. Nothing is stored
//! globally, so independent threads can parse with different options.
//!
//! ## Examples
//!
//! ```rust
//! use yaml_inline::{parse, Mapping, ParseOptions, Value};
//!
//! let options = ParseOptions::new()
//!     .with_use_datetime(true)
//!     .with_exception_on_invalid_type(true);
//! let value = parse("2024-01-02", &options, &Mapping::new()).unwrap();
//! assert!(value.is_date());
//! ```

use crate::{Mapping, Value};

/// Flags and tables that control [`crate::parse`].
///
/// # Examples
///
/// ```rust
/// use yaml_inline::{ParseOptions, Value};
///
/// let options = ParseOptions::new()
///     .with_allow_constants(true)
///     .with_constant("APP_MODE", Value::from("prod"));
/// assert!(options.allow_constants);
/// assert_eq!(options.constant("APP_MODE"), Some(Value::from("prod")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Raise errors for disabled object/constant literals instead of
    /// yielding null.
    pub exception_on_invalid_type: bool,
    /// Accept `!php/object:` literals.
    pub allow_objects: bool,
    /// Produce [`Value::Record`] instead of [`Value::Mapping`] for `{..}`.
    pub object_for_map: bool,
    /// Accept `!php/const:` literals.
    pub allow_constants: bool,
    /// Timestamps become [`Value::Date`] instead of epoch seconds.
    pub use_datetime: bool,
    /// Caller-defined constants, looked up before the builtin set.
    pub constants: Mapping,
}

impl ParseOptions {
    /// Creates default options: every flag off, no constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exception_on_invalid_type(mut self, enabled: bool) -> Self {
        self.exception_on_invalid_type = enabled;
        self
    }

    #[must_use]
    pub fn with_allow_objects(mut self, enabled: bool) -> Self {
        self.allow_objects = enabled;
        self
    }

    #[must_use]
    pub fn with_object_for_map(mut self, enabled: bool) -> Self {
        self.object_for_map = enabled;
        self
    }

    #[must_use]
    pub fn with_allow_constants(mut self, enabled: bool) -> Self {
        self.allow_constants = enabled;
        self
    }

    #[must_use]
    pub fn with_use_datetime(mut self, enabled: bool) -> Self {
        self.use_datetime = enabled;
        self
    }

    /// Defines a constant for `!php/const:<name>` lookups.
    ///
    /// A caller definition shadows a builtin of the same name.
    #[must_use]
    pub fn with_constant(mut self, name: &str, value: Value) -> Self {
        self.constants.insert(name.to_string(), value);
        self
    }

    /// Looks up a constant by name: caller definitions first, then builtins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_inline::{ParseOptions, Value};
    ///
    /// let options = ParseOptions::new();
    /// assert_eq!(options.constant("PHP_INT_MAX"), Some(Value::from(i64::MAX)));
    /// assert_eq!(options.constant("NOPE"), None);
    /// ```
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<Value> {
        self.constants
            .get(name)
            .cloned()
            .or_else(|| builtin_constant(name))
    }
}

fn builtin_constant(name: &str) -> Option<Value> {
    let value = match name {
        "PHP_INT_MAX" => Value::from(i64::MAX),
        "PHP_INT_MIN" => Value::from(i64::MIN),
        "PHP_INT_SIZE" => Value::from(8),
        "PHP_FLOAT_EPSILON" => Value::from(f64::EPSILON),
        "PHP_FLOAT_MAX" => Value::from(f64::MAX),
        "PHP_FLOAT_MIN" => Value::from(f64::MIN_POSITIVE),
        "PHP_EOL" => Value::from("\n"),
        "M_PI" => Value::from(std::f64::consts::PI),
        "M_E" => Value::from(std::f64::consts::E),
        "INF" => Value::from(f64::INFINITY),
        "NAN" => Value::from(f64::NAN),
        _ => return None,
    };
    Some(value)
}

/// Flags that control [`crate::dump`].
///
/// # Examples
///
/// ```rust
/// use yaml_inline::DumpOptions;
///
/// let options = DumpOptions::new().with_object_as_map(true);
/// assert!(options.object_as_map);
/// assert!(!options.allow_objects);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Raise errors for values with no flow form instead of dumping `null`.
    pub exception_on_invalid_type: bool,
    /// Dump foreign objects as `!php/object:` literals.
    pub allow_objects: bool,
    /// Dump records as plain mappings.
    pub object_as_map: bool,
}

impl DumpOptions {
    /// Creates default options: every flag off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exception_on_invalid_type(mut self, enabled: bool) -> Self {
        self.exception_on_invalid_type = enabled;
        self
    }

    #[must_use]
    pub fn with_allow_objects(mut self, enabled: bool) -> Self {
        self.allow_objects = enabled;
        self
    }

    #[must_use]
    pub fn with_object_as_map(mut self, enabled: bool) -> Self {
        self.object_as_map = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_all_off() {
        let options = ParseOptions::default();
        assert!(!options.exception_on_invalid_type);
        assert!(!options.allow_objects);
        assert!(!options.object_for_map);
        assert!(!options.allow_constants);
        assert!(!options.use_datetime);
        assert!(options.constants.is_empty());
        assert_eq!(DumpOptions::new(), DumpOptions::default());
    }

    #[test]
    fn test_caller_constant_shadows_builtin() {
        let options = ParseOptions::new().with_constant("PHP_EOL", Value::from("\r\n"));
        assert_eq!(options.constant("PHP_EOL"), Some(Value::from("\r\n")));
        assert_eq!(options.constant("M_PI"), Some(Value::from(std::f64::consts::PI)));
    }
}
