//! Typed deep equality, as required by the JSON Patch `test` operation
//! (RFC 6902, section 4.6).
//!
//! Two values are equal when they are the same kind and:
//! - numbers are numerically equal,
//! - strings hold the same code points,
//! - arrays have the same length and pairwise equal elements,
//! - objects have the same key set (order is irrelevant) and equal members.
//!
//! [`compare`] reports where and why two values differ; [`equal`] only
//! answers yes or no.

use std::fmt;

use thiserror::Error;

use crate::value::{Value, ValueKind};

/// Why two values differ, at the innermost differing location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MismatchReason {
    #[error("expected {expected}, found {actual}")]
    Kind {
        expected: ValueKind,
        actual: ValueKind,
    },
    #[error("expected {expected}, found {actual}")]
    Bool { expected: bool, actual: bool },
    #[error("expected {expected}, found {actual}")]
    Number { expected: f64, actual: f64 },
    #[error("strings differ")]
    String,
    #[error("expected array of length {expected}, found length {actual}")]
    ArrayLength { expected: usize, actual: usize },
    #[error("missing key {0:?}")]
    MissingKey(String),
    #[error("unexpected key {0:?}")]
    UnexpectedKey(String),
}

/// A failed comparison.
///
/// `at` lists the object keys and array indices leading from the compared
/// roots to the differing location; it is empty when the roots themselves
/// differ.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub at: Vec<String>,
    pub reason: MismatchReason,
}

impl Mismatch {
    fn new(reason: MismatchReason) -> Self {
        Self {
            at: Vec::new(),
            reason,
        }
    }

    fn within(mut self, step: String) -> Self {
        self.at.insert(0, step);
        self
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)?;
        if !self.at.is_empty() {
            f.write_str(" at ")?;
            for step in &self.at {
                write!(f, "/{}", step.replace('~', "~0").replace('/', "~1"))?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Mismatch {}

/// Compares `actual` against `expected`.
///
/// # Example
///
/// ```
/// use json_splice_value::{compare, MismatchReason, Value};
///
/// let expected = Value::object([("a", Value::array([1, 2]))]);
/// let actual = Value::object([("a", Value::array([1, 3]))]);
/// let mismatch = compare(&expected, &actual).unwrap_err();
/// assert_eq!(mismatch.at, vec!["a".to_string(), "1".to_string()]);
/// assert_eq!(mismatch.reason, MismatchReason::Number { expected: 2.0, actual: 3.0 });
/// ```
pub fn compare(expected: &Value, actual: &Value) -> Result<(), Mismatch> {
    match (expected, actual) {
        (Value::Null, Value::Null) => Ok(()),
        (Value::Bool(e), Value::Bool(a)) => {
            if e == a {
                Ok(())
            } else {
                Err(Mismatch::new(MismatchReason::Bool {
                    expected: *e,
                    actual: *a,
                }))
            }
        }
        (Value::Number(e), Value::Number(a)) => {
            if e == a {
                Ok(())
            } else {
                Err(Mismatch::new(MismatchReason::Number {
                    expected: *e,
                    actual: *a,
                }))
            }
        }
        (Value::String(e), Value::String(a)) => {
            if e == a {
                Ok(())
            } else {
                Err(Mismatch::new(MismatchReason::String))
            }
        }
        (Value::Array(e), Value::Array(a)) => {
            if e.len() != a.len() {
                return Err(Mismatch::new(MismatchReason::ArrayLength {
                    expected: e.len(),
                    actual: a.len(),
                }));
            }
            for (i, (ev, av)) in e.iter().zip(a.iter()).enumerate() {
                compare(ev, av).map_err(|m| m.within(i.to_string()))?;
            }
            Ok(())
        }
        (Value::Object(e), Value::Object(a)) => {
            if let Some(key) = e.keys().find(|k| !a.contains_key(k.as_str())) {
                return Err(Mismatch::new(MismatchReason::MissingKey(key.clone())));
            }
            if let Some(key) = a.keys().find(|k| !e.contains_key(k.as_str())) {
                return Err(Mismatch::new(MismatchReason::UnexpectedKey(key.clone())));
            }
            for (key, ev) in e.iter() {
                if let Some(av) = a.get(key) {
                    compare(ev, av).map_err(|m| m.within(key.clone()))?;
                }
            }
            Ok(())
        }
        _ => Err(Mismatch::new(MismatchReason::Kind {
            expected: expected.kind(),
            actual: actual.kind(),
        })),
    }
}

/// Deep equality under the rules of [`compare`].
pub fn equal(a: &Value, b: &Value) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    compare(a, b).is_ok()
}
