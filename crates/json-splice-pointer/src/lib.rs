//! JSON Pointer (RFC 6901) for json-splice documents.
//!
//! A [`Pointer`] is parsed once into its raw tokens. Tokens are only decoded
//! when they are read against a concrete node, because the same token means
//! different things for objects and arrays: `"-"` is a key in an object but
//! "one past the end" in an array.
//!
//! Reading happens through a [`Cursor`], a small `Copy` value holding the
//! number of tokens consumed so far. Walking the same pointer twice is just a
//! matter of asking for a fresh cursor.
//!
//! # Example
//!
//! ```
//! use json_splice_pointer::{Pointer, Slot};
//! use json_splice_value::Value;
//!
//! let doc = Value::from(serde_json::json!({"a/b": ["x", "y"]}));
//! let pointer = Pointer::parse("/a~1b/-").unwrap();
//!
//! let (slot, cursor) = pointer.cursor().next(&doc).unwrap();
//! assert!(matches!(slot, Slot::Key { ref key, .. } if key == "a/b"));
//!
//! let list = slot.get().unwrap();
//! let (slot, cursor) = cursor.next(list).unwrap();
//! assert!(matches!(slot, Slot::Index { index: 2, .. }));
//! assert!(cursor.is_fully_read());
//! ```

use json_splice_value::ValueKind;
use thiserror::Error;

pub mod pointer;
pub use pointer::{Cursor, Pointer, Slot};

/// Unescapes a JSON Pointer token.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_splice_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes an object key for use as a JSON Pointer token.
///
/// # Example
///
/// ```
/// use json_splice_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Formats unescaped keys into a pointer string.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use json_splice_pointer::format_pointer;
///
/// assert_eq!(format_pointer::<&str>(&[]), "");
/// assert_eq!(format_pointer(&["foo", "a/b"]), "/foo/a~1b");
/// ```
pub fn format_pointer<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component.as_ref()));
    }
    out
}

/// Checks that an array token is a canonical base-10 index: `"0"`, or ASCII
/// digits without a leading zero. Signs, whitespace and `"-"` are rejected.
///
/// # Example
///
/// ```
/// use json_splice_pointer::is_canonical_index;
///
/// assert!(is_canonical_index("0"));
/// assert!(is_canonical_index("123"));
/// assert!(!is_canonical_index("01"));
/// assert!(!is_canonical_index("+1"));
/// assert!(!is_canonical_index(" 1"));
/// ```
pub fn is_canonical_index(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("invalid pointer {pointer:?}: must be empty or start with '/'")]
    InvalidPointer { pointer: String },
    #[error("invalid array index {token:?}")]
    InvalidArrayIndex { token: String },
    #[error("value at {at:?} is {kind}, not an object or array")]
    PathNotObjectOrArray { kind: ValueKind, at: String },
    #[error("no tokens left after {consumed:?}")]
    PointerExhausted { consumed: String },
}
