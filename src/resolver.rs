//! Tag registry and scalar resolution.
//!
//! A [`TagResolver`] maps tag strings to [`Tag`]s and keeps the ordered list
//! of implicit tags tried on plain scalars. Explicit tags are accepted in
//! several spellings, all reducing to the same canonical string:
//!
//! - `tag:yaml.org,2002:int` (canonical)
//! - `!int` and `int` (short forms, as written after the first `!` of `!!int`)
//! - `str` also has its own registry entry
//!
//! ## Examples
//!
//! ```rust
//! use yaml_inline::{Number, TagResolver, Value};
//!
//! let resolver = TagResolver::shared(false);
//! assert_eq!(resolver.resolve("~", None).unwrap(), Value::Null);
//! assert_eq!(
//!     resolver.resolve("12", Some("!float")).unwrap(),
//!     Value::Number(Number::Float(12.0))
//! );
//! assert!(resolver.resolve("x", Some("!custom")).is_err());
//! ```

use crate::error::TagError;
use crate::tag::{Tag, TAG_PREFIX};
use crate::Value;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Registry of tags with their implicit resolution order.
#[derive(Clone, Debug)]
pub struct TagResolver {
    tags: IndexMap<String, Tag>,
    implicit: Vec<Tag>,
}

impl TagResolver {
    /// Builds a resolver from `(tag string, tag)` pairs.
    ///
    /// Implicit tags are tried in registration order; a tag registered under
    /// several names is tried once.
    pub fn new<I, K>(tags: I) -> Self
    where
        I: IntoIterator<Item = (K, Tag)>,
        K: Into<String>,
    {
        let tags: IndexMap<String, Tag> = tags.into_iter().map(|(k, t)| (k.into(), t)).collect();
        let mut implicit: Vec<Tag> = Vec::new();
        for tag in tags.values() {
            if tag.is_implicit() && !implicit.contains(tag) {
                implicit.push(*tag);
            }
        }

        TagResolver { tags, implicit }
    }

    /// Builds the core-schema resolver.
    ///
    /// Implicit order: null, bool, int, float, timestamp, str.
    #[must_use]
    pub fn create(use_datetime: bool) -> Self {
        let core = [
            Tag::Null,
            Tag::Bool,
            Tag::Int,
            Tag::Float,
            Tag::Timestamp { use_datetime },
            Tag::Binary,
            Tag::Str,
        ];

        TagResolver::new(
            std::iter::once((String::new(), Tag::NonSpecific))
                .chain(core.into_iter().map(|tag| (tag.canonical_name(), tag)))
                .chain(std::iter::once(("str".to_string(), Tag::Str))),
        )
    }

    /// Returns the process-wide core-schema resolver for the given timestamp
    /// mode. Built on first use.
    #[must_use]
    pub fn shared(use_datetime: bool) -> &'static TagResolver {
        static EPOCH: OnceLock<TagResolver> = OnceLock::new();
        static DATETIME: OnceLock<TagResolver> = OnceLock::new();

        if use_datetime {
            DATETIME.get_or_init(|| TagResolver::create(true))
        } else {
            EPOCH.get_or_init(|| TagResolver::create(false))
        }
    }

    /// Returns `true` if `tag` names a registered tag in any accepted spelling.
    #[must_use]
    pub fn supports_tag(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }

    /// First implicit tag that recognizes `text`.
    #[must_use]
    pub fn implicit_tag(&self, text: &str) -> Option<Tag> {
        self.implicit.iter().copied().find(|tag| tag.recognize(text))
    }

    /// Resolves `text` to a value.
    ///
    /// With an explicit tag the text is constructed by that tag; an unknown
    /// tag is a [`TagError::UnsupportedTag`]. Without one the implicit tags
    /// are tried in order and text none of them recognizes is a
    /// [`TagError::Unrecognized`].
    pub fn resolve(&self, text: &str, tag: Option<&str>) -> Result<Value, TagError> {
        match tag {
            Some(name) => self
                .lookup(name)
                .ok_or_else(|| TagError::UnsupportedTag(name.to_string()))?
                .construct(text, false),
            None => self
                .implicit_tag(text)
                .ok_or_else(|| TagError::Unrecognized(text.to_string()))?
                .construct(text, true),
        }
    }

    fn lookup(&self, tag: &str) -> Option<&Tag> {
        self.tags
            .get(tag)
            .or_else(|| self.tags.get(canonical_tag(tag).as_ref()))
    }
}

impl Default for TagResolver {
    fn default() -> Self {
        TagResolver::create(false)
    }
}

/// Reduces a tag spelling to its canonical string.
///
/// One leading `!` is dropped. Empty names stay empty (the non-specific tag),
/// names already in `tag:` form are kept, anything else gets the core-schema
/// prefix.
///
/// ```rust
/// use yaml_inline::resolver::canonical_tag;
///
/// assert_eq!(canonical_tag("!int"), "tag:yaml.org,2002:int");
/// assert_eq!(canonical_tag("str"), "tag:yaml.org,2002:str");
/// assert_eq!(canonical_tag("!"), "");
/// ```
#[must_use]
pub fn canonical_tag(tag: &str) -> Cow<'_, str> {
    let name = tag.strip_prefix('!').unwrap_or(tag);
    if name.is_empty() || name.starts_with("tag:") {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{}{}", TAG_PREFIX, name))
    }
}
