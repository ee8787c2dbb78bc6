//! Core types for the JSON Patch module: operations and errors.

use json_splice_pointer::{Pointer, PointerError};
use json_splice_value::{Mismatch, Value};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error(transparent)]
    Pointer(#[from] PointerError),
    #[error("index {index} is out of bounds for array of length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("no value at {path:?}")]
    NotFound { path: String },
    #[error("value mismatch: {0}")]
    TestMismatch(Mismatch),
    #[error("{op} operation is missing required field {field:?}")]
    MissingField {
        op: &'static str,
        field: &'static str,
    },
    #[error("unknown operation {0}")]
    UnknownOperation(serde_json::Value),
    #[error("cannot move {from:?} into its own child {path:?}")]
    InvalidPrefixMove { from: String, path: String },
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// A failure while applying the operation at `index` of a patch.
    #[error("{op} failed: {source}")]
    Operation {
        index: usize,
        op: &'static str,
        source: Box<PatchError>,
    },
    /// A failure while decoding the operation at `index` of a patch.
    #[error("operation [index = {index}]: {source}")]
    Decode {
        index: usize,
        source: Box<PatchError>,
    },
}

/// Error kinds, independent of the context an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPointer,
    InvalidArrayIndex,
    PathNotObjectOrArray,
    PointerExhausted,
    OutOfBounds,
    NotFound,
    TestMismatch,
    MissingField,
    UnknownOperation,
    InvalidPrefixMove,
    InvalidOperation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPointer => "INVALID_POINTER",
            ErrorKind::InvalidArrayIndex => "INVALID_ARRAY_INDEX",
            ErrorKind::PathNotObjectOrArray => "PATH_NOT_OBJECT_OR_ARRAY",
            ErrorKind::PointerExhausted => "POINTER_EXHAUSTED",
            ErrorKind::OutOfBounds => "OUT_OF_BOUNDS",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::TestMismatch => "TEST",
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::UnknownOperation => "UNKNOWN_OPERATION",
            ErrorKind::InvalidPrefixMove => "INVALID_PREFIX_MOVE",
            ErrorKind::InvalidOperation => "INVALID_OPERATION",
        }
    }
}

impl PatchError {
    /// The underlying kind, looking through operation and decode context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::Pointer(e) => match e {
                PointerError::InvalidPointer { .. } => ErrorKind::InvalidPointer,
                PointerError::InvalidArrayIndex { .. } => ErrorKind::InvalidArrayIndex,
                PointerError::PathNotObjectOrArray { .. } => ErrorKind::PathNotObjectOrArray,
                PointerError::PointerExhausted { .. } => ErrorKind::PointerExhausted,
            },
            PatchError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            PatchError::NotFound { .. } => ErrorKind::NotFound,
            PatchError::TestMismatch(_) => ErrorKind::TestMismatch,
            PatchError::MissingField { .. } => ErrorKind::MissingField,
            PatchError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            PatchError::InvalidPrefixMove { .. } => ErrorKind::InvalidPrefixMove,
            PatchError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            PatchError::Operation { source, .. } | PatchError::Decode { source, .. } => {
                source.kind()
            }
        }
    }

    /// The innermost error, without operation or decode context.
    pub fn root_cause(&self) -> &PatchError {
        match self {
            PatchError::Operation { source, .. } | PatchError::Decode { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

// ── Operation ─────────────────────────────────────────────────────────────

/// An RFC 6902 operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Value },
    Move { from: Pointer, path: Pointer },
    Copy { from: Pointer, path: Pointer },
    Test { path: Pointer, value: Value },
}

impl Operation {
    /// The `op` member as written on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Remove { .. } => "remove",
            Operation::Replace { .. } => "replace",
            Operation::Move { .. } => "move",
            Operation::Copy { .. } => "copy",
            Operation::Test { .. } => "test",
        }
    }

    /// The target location.
    pub fn path(&self) -> &Pointer {
        match self {
            Operation::Add { path, .. }
            | Operation::Remove { path }
            | Operation::Replace { path, .. }
            | Operation::Move { path, .. }
            | Operation::Copy { path, .. }
            | Operation::Test { path, .. } => path,
        }
    }

    /// The source location of `move` and `copy`.
    pub fn from(&self) -> Option<&Pointer> {
        match self {
            Operation::Move { from, .. } | Operation::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// `value` of `add`, `replace` and `test`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Operation::Add { value, .. }
            | Operation::Replace { value, .. }
            | Operation::Test { value, .. } => Some(value),
            _ => None,
        }
    }
}
