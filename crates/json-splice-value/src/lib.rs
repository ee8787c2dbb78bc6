//! json-splice-value: the document tree that JSON Patch operates on.
//!
//! [`Value`] is immutable. Containers keep their members behind [`Arc`],
//! so cloning a value is cheap and an edited tree shares every untouched
//! subtree with the tree it was derived from.
//!
//! # Example
//!
//! ```
//! use json_splice_value::{equal, Value};
//!
//! let doc = Value::from(serde_json::json!({"a": [1, 2], "b": {"c": true}}));
//! let copy = doc.clone();
//! assert!(doc.ptr_eq(&copy));
//! assert!(equal(&doc, &Value::from(serde_json::json!({"b": {"c": true}, "a": [1, 2]}))));
//! ```
//!
//! [`Arc`]: std::sync::Arc

pub mod compare;
mod convert;
pub mod value;

pub use compare::{compare, equal, Mismatch, MismatchReason};
pub use value::{Map, Value, ValueKind};
