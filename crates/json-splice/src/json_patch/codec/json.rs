//! JSON codec for JSON Patch operations.
//!
//! Decodes loosely-typed RFC 6902 operation objects (as parsed by
//! `serde_json`) into [`Operation`]s, and renders operations back.

use json_splice_pointer::Pointer;
use json_splice_value::Value;
use serde_json::{Map, Value as Json};

use crate::json_patch::types::{Operation, PatchError};

// ── Field helpers ─────────────────────────────────────────────────────────

fn field<'a>(
    obj: &'a Map<String, Json>,
    op: &'static str,
    name: &'static str,
) -> Result<&'a Json, PatchError> {
    obj.get(name)
        .ok_or(PatchError::MissingField { op, field: name })
}

fn decode_pointer(
    obj: &Map<String, Json>,
    op: &'static str,
    name: &'static str,
) -> Result<Pointer, PatchError> {
    let raw = field(obj, op, name)?
        .as_str()
        .ok_or_else(|| PatchError::InvalidOperation(format!("{name} must be a string")))?;
    Ok(Pointer::parse(raw)?)
}

fn decode_value(obj: &Map<String, Json>, op: &'static str) -> Result<Value, PatchError> {
    field(obj, op, "value").map(Value::from)
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Decodes one operation object.
///
/// Fields other than `op`, `path`, `from` and `value` are ignored.
pub fn from_json(v: &Json) -> Result<Operation, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOperation("operation must be an object".into()))?;
    let op = obj.get("op").unwrap_or(&Json::Null);
    let name = match op.as_str() {
        Some("add") => "add",
        Some("remove") => "remove",
        Some("replace") => "replace",
        Some("move") => "move",
        Some("copy") => "copy",
        Some("test") => "test",
        _ => return Err(PatchError::UnknownOperation(op.clone())),
    };
    let path = decode_pointer(obj, name, "path")?;
    let op = match name {
        "add" => Operation::Add {
            path,
            value: decode_value(obj, name)?,
        },
        "remove" => Operation::Remove { path },
        "replace" => Operation::Replace {
            path,
            value: decode_value(obj, name)?,
        },
        "move" => Operation::Move {
            from: decode_pointer(obj, name, "from")?,
            path,
        },
        "copy" => Operation::Copy {
            from: decode_pointer(obj, name, "from")?,
            path,
        },
        _ => Operation::Test {
            path,
            value: decode_value(obj, name)?,
        },
    };
    Ok(op)
}

/// Decodes a patch document: an array of operation objects.
///
/// An element that fails to decode is reported as [`PatchError::Decode`]
/// with its position in the array.
pub fn from_json_patch(v: &Json) -> Result<Vec<Operation>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOperation("patch must be an array".into()))?;
    arr.iter()
        .enumerate()
        .map(|(index, op)| {
            from_json(op).map_err(|source| PatchError::Decode {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Renders an operation as an RFC 6902 object.
pub fn to_json(op: &Operation) -> Json {
    let mut m = Map::new();
    m.insert("op".into(), Json::from(op.name()));
    m.insert("path".into(), Json::from(op.path().as_str()));
    if let Some(from) = op.from() {
        m.insert("from".into(), Json::from(from.as_str()));
    }
    if let Some(value) = op.value() {
        m.insert("value".into(), Json::from(value));
    }
    Json::Object(m)
}

/// Renders a patch as a JSON array.
pub fn to_json_patch(ops: &[Operation]) -> Json {
    Json::Array(ops.iter().map(to_json).collect())
}

impl Operation {
    /// See [`from_json`].
    pub fn from_json(v: &Json) -> Result<Self, PatchError> {
        from_json(v)
    }

    /// See [`to_json`].
    pub fn to_json(&self) -> Json {
        to_json(self)
    }
}

impl TryFrom<&Json> for Operation {
    type Error = PatchError;

    fn try_from(v: &Json) -> Result<Self, Self::Error> {
        from_json(v)
    }
}
