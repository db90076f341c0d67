//! Flow Syntax Reference
//!
//! This module documents the flow (inline) syntax accepted by [`crate::parse`]
//! and produced by [`crate::dump`].
//!
//! # Overview
//!
//! A flow expression is a single value written on one line: a sequence, a
//! mapping or a scalar. Containers nest freely. Surrounding whitespace is
//! ignored and the input may end with a `#` comment preceded by whitespace.
//!
//! ```text
//! { name: Alice, tags: [admin, '2024'], limits: { cpu: .inf } }  # comment
//! ```
//!
//! # Sequences
//!
//! `[` items separated by `,` `]`. Spaces between items are skipped and a
//! trailing comma is allowed. An unquoted item that contains `": "` is read
//! as a one-entry mapping when that succeeds:
//!
//! ```text
//! [a, b, [c]]       -> ["a", "b", ["c"]]
//! [foo: bar]        -> [{ "foo": "bar" }]
//! ['foo: bar']      -> ["foo: bar"]
//! ```
//!
//! # Mappings
//!
//! `{` `key: value` pairs separated by `,` `}`. The colon must be followed by
//! a space or by one of `[ ] { }`; `{a:1}` is rejected. Keys are always
//! strings, quoted or plain. When a key repeats, the first value is kept.
//!
//! ```text
//! { a: 1, 'b c': [x] }
//! {a: [1], b: {c: d}}
//! ```
//!
//! # Scalars
//!
//! ## Quoted
//!
//! Quoted scalars are always strings and are never resolved.
//!
//! | Style | Escapes |
//! |-------|---------|
//! | `'single'` | `''` for a literal quote |
//! | `"double"` | `\0 \a \b \t \n \v \f \r \e \" \/ \\ \N \_ \L \P`, `\xXX`, `\uXXXX`, `\UXXXXXXXX` |
//!
//! ## Plain
//!
//! Plain scalars run up to the next delimiter of their context (`,` or `]`
//! in a sequence, `,` or `}` for a mapping value, `:` or space for a key) and
//! are trimmed. A plain scalar may not start with `@`, `` ` ``, `|` or `>`.
//!
//! Plain scalars are resolved by the first matching implicit tag:
//!
//! | Order | Tag | Examples | Result |
//! |-------|-----|----------|--------|
//! | 1 | null | `null` in any case, `~`, empty | null |
//! | 2 | bool | `true`, `False`, `TRUE` in any case | bool |
//! | 3 | int | `42`, `-17`, `1_000`, `0x1F`, `0o17`, `017` | integer (big integer on overflow) |
//! | 4 | float | `1.5`, `1e3`, `1,000.5`, `.inf`, `-.Inf`, `.nan` | float |
//! | 5 | timestamp | `2001-12-14`, `2001-12-14t21:59:43.10-05:00` | epoch seconds or date |
//! | 6 | str | anything else | string |
//!
//! `yes`, `no`, `on`, `off` and `.5` are plain strings. Decimal text that does
//! not print back unchanged (`+12`, `089`) stays a string. Timestamp fields that
//! overflow roll forward, so `2001-02-30` is 2001-03-02.
//!
//! # Tags
//!
//! A scalar starting with `!` carries an explicit tag up to the first space:
//!
//! ```text
//! !!str 12            -> "12"
//! !!int '17'          -> 17
//! !!float 1           -> 1.0
//! !!binary SGVsbG8=   -> b"Hello"
//! ! 12abc             -> 12
//! ```
//!
//! `!name`, `!!name` and `tag:yaml.org,2002:name` all name the same tag. An
//! unknown tag, or `!!` with no name, leaves the whole scalar to implicit
//! resolution. Text after a quoted tagged payload is an error.
//!
//! # Special Forms
//!
//! | Form | Behavior |
//! |------|----------|
//! | `*name` | value of `name` in the reference table; text after `#` is ignored |
//! | `!php/object:<payload>` | foreign object when `allow_objects` is set, else null or an error |
//! | `!php/const:<NAME>` | constant value when `allow_constants` is set, else null or an error |
//!
//! # Dumping
//!
//! The dumper writes `[a, b]`, `{ k: v }`, `[]` and `{  }`. Strings are left
//! bare unless they would reparse as something else:
//!
//! - numeric strings and the empty string are single-quoted
//! - strings with control characters, NEL, NBSP or line separators are
//!   double-quoted with escapes
//! - reserved words (`null`, `~`, `true`, `false`, `y`, `n`, `yes`, `no`,
//!   `on`, `off`), strings with whitespace or flow indicators, strings
//!   starting with an indicator, and strings an implicit tag would claim are
//!   single-quoted
//!
//! Whole floats are written as `!!float 3`, the IEEE specials as `.Inf`,
//! `-.Inf` and `.NaN`, bytes as `!!binary <base64>` and dates as ISO 8601 with
//! an offset.
//!
//! # Limitations
//!
//! - Block (indented, multi-line) YAML is not supported
//! - Anchors (`&name`) are not defined by this crate; only aliases are read
//! - Object payloads are opaque strings; no object graph is rebuilt
