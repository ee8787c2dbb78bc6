//! JSON Patch (RFC 6902).
//!
//! # Operations
//!
//! The six standard operations are supported:
//! `add`, `remove`, `replace`, `move`, `copy`, `test`.
//!
//! Patches are applied all-or-nothing over persistent [`Value`] trees: the
//! input document is borrowed, and the patched document shares every
//! untouched subtree with it.
//!
//! # Example
//!
//! ```
//! use json_splice::json_patch::{apply_patch, from_json_patch};
//! use json_splice_value::Value;
//! use serde_json::json;
//!
//! let doc = Value::from(json!({"foo": "bar"}));
//! let patch = from_json_patch(&json!([
//!     {"op": "add", "path": "/baz", "value": "qux"},
//!     {"op": "test", "path": "/foo", "value": "bar"}
//! ]))
//! .unwrap();
//! let out = apply_patch(&doc, &patch).unwrap();
//! assert_eq!(out, Value::from(json!({"foo": "bar", "baz": "qux"})));
//! ```
//!
//! [`Value`]: json_splice_value::Value

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{add_at, apply_operation, apply_patch, exists_at, get_at, remove_at, replace_at};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{ErrorKind, Operation, PatchError};
