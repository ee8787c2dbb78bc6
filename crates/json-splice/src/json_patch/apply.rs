//! JSON Patch application.
//!
//! Every edit is a persistent update: the document passed in is never
//! modified. Only the containers along the edited path are rebuilt; all
//! other members are shared with the source tree. A patch either succeeds
//! as a whole or fails without the caller ever seeing an intermediate tree.

use json_splice_pointer::{Cursor, Pointer, Slot};
use json_splice_value::{compare, Value};
use tracing::{debug, trace};

use super::types::{Operation, PatchError};

fn not_found(cursor: Cursor<'_>) -> PatchError {
    PatchError::NotFound {
        path: cursor.pointer().to_string(),
    }
}

// ── Path navigation ───────────────────────────────────────────────────────

/// The value at `cursor`. A missing member anywhere along the way is
/// `NotFound`.
pub fn get_at<'v>(doc: &'v Value, cursor: Cursor<'_>) -> Result<&'v Value, PatchError> {
    let mut node = doc;
    let mut cursor = cursor;
    while !cursor.is_fully_read() {
        let (slot, rest) = cursor.next(node)?;
        node = slot.get().ok_or_else(|| not_found(cursor))?;
        cursor = rest;
    }
    Ok(node)
}

/// Whether a value exists at `cursor`.
///
/// A missing member is `false` wherever it occurs, but walking into a
/// scalar with tokens left is still a `PathNotObjectOrArray` error.
pub fn exists_at(doc: &Value, cursor: Cursor<'_>) -> Result<bool, PatchError> {
    let mut node = doc;
    let mut cursor = cursor;
    while !cursor.is_fully_read() {
        let (slot, rest) = cursor.next(node)?;
        let Some(member) = slot.get() else {
            return Ok(false);
        };
        node = member;
        cursor = rest;
    }
    Ok(true)
}

// ── Path copying ──────────────────────────────────────────────────────────

/// Rebuilds the container holding `slot` with the member replaced by
/// `update(member)`. Siblings are shared, not copied.
fn splice<F>(slot: Slot<'_>, cursor: Cursor<'_>, update: F) -> Result<Value, PatchError>
where
    F: FnOnce(&Value) -> Result<Value, PatchError>,
{
    let member = slot.get().ok_or_else(|| not_found(cursor))?;
    let updated = update(member)?;
    match slot {
        Slot::Key { object, key } => {
            let mut object = object.clone();
            object.insert(key, updated);
            Ok(Value::from(object))
        }
        Slot::Index { array, index } => {
            let mut array = array.to_vec();
            array[index] = updated;
            Ok(Value::from(array))
        }
    }
}

/// Walks to the container holding the last token of `cursor` and rebuilds
/// the document from whatever `edit` makes of that container.
///
/// `cursor` must have at least one token left.
fn edit_at<F>(node: &Value, cursor: Cursor<'_>, edit: F) -> Result<Value, PatchError>
where
    F: FnOnce(Slot<'_>) -> Result<Value, PatchError>,
{
    let (slot, rest) = cursor.next(node)?;
    if rest.is_fully_read() {
        return edit(slot);
    }
    splice(slot, cursor, |member| edit_at(member, rest, edit))
}

/// Adds `value` at `cursor`: sets an object member, or inserts into an
/// array before the addressed index. The container must exist, the member
/// need not.
pub fn add_at(doc: &Value, cursor: Cursor<'_>, value: Value) -> Result<Value, PatchError> {
    if cursor.is_fully_read() {
        return Ok(value);
    }
    edit_at(doc, cursor, |slot| match slot {
        Slot::Key { object, key } => {
            let mut object = object.clone();
            object.insert(key, value);
            Ok(Value::from(object))
        }
        Slot::Index { array, index } => {
            if index > array.len() {
                return Err(PatchError::OutOfBounds {
                    index,
                    len: array.len(),
                });
            }
            let mut array = array.to_vec();
            array.insert(index, value);
            Ok(Value::from(array))
        }
    })
}

/// Overwrites the existing value at `cursor`.
pub fn replace_at(doc: &Value, cursor: Cursor<'_>, value: Value) -> Result<Value, PatchError> {
    if cursor.is_fully_read() {
        return Ok(value);
    }
    edit_at(doc, cursor, |slot| splice(slot, cursor, |_| Ok(value)))
}

/// Removes the existing value at `cursor`; later array elements shift left.
///
/// Removing the root yields `Value::Null`. RFC 6902 leaves this case
/// undefined.
pub fn remove_at(doc: &Value, cursor: Cursor<'_>) -> Result<Value, PatchError> {
    if cursor.is_fully_read() {
        return Ok(Value::Null);
    }
    edit_at(doc, cursor, |slot| match slot {
        Slot::Key { object, key } => {
            if !object.contains_key(key.as_str()) {
                return Err(not_found(cursor));
            }
            let mut object = object.clone();
            object.shift_remove(key.as_str());
            Ok(Value::from(object))
        }
        Slot::Index { array, index } => {
            if index >= array.len() {
                return Err(not_found(cursor));
            }
            let mut array = array.to_vec();
            array.remove(index);
            Ok(Value::from(array))
        }
    })
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_replace(doc: &Value, path: &Pointer, value: &Value) -> Result<Value, PatchError> {
    if !exists_at(doc, path.cursor())? {
        return Err(not_found(path.cursor()));
    }
    replace_at(doc, path.cursor(), value.clone())
}

fn apply_move(doc: &Value, from: &Pointer, path: &Pointer) -> Result<Value, PatchError> {
    if from != path && from.is_prefix_of(path) {
        return Err(PatchError::InvalidPrefixMove {
            from: from.to_string(),
            path: path.to_string(),
        });
    }
    let value = get_at(doc, from.cursor())?.clone();
    if from == path {
        return Ok(doc.clone());
    }
    let removed = remove_at(doc, from.cursor())?;
    add_at(&removed, path.cursor(), value)
}

fn apply_copy(doc: &Value, from: &Pointer, path: &Pointer) -> Result<Value, PatchError> {
    let value = get_at(doc, from.cursor())?.clone();
    add_at(doc, path.cursor(), value)
}

fn apply_test(doc: &Value, path: &Pointer, value: &Value) -> Result<Value, PatchError> {
    let actual = get_at(doc, path.cursor())?;
    compare(value, actual).map_err(PatchError::TestMismatch)?;
    Ok(doc.clone())
}

fn apply_op(doc: &Value, op: &Operation) -> Result<Value, PatchError> {
    match op {
        Operation::Add { path, value } => add_at(doc, path.cursor(), value.clone()),
        Operation::Remove { path } => remove_at(doc, path.cursor()),
        Operation::Replace { path, value } => apply_replace(doc, path, value),
        Operation::Move { from, path } => apply_move(doc, from, path),
        Operation::Copy { from, path } => apply_copy(doc, from, path),
        Operation::Test { path, value } => apply_test(doc, path, value),
    }
}

// ── Main apply function ───────────────────────────────────────────────────

/// Applies `ops` in order and returns the patched document.
///
/// `doc` is only borrowed, so a failing patch leaves the caller holding the
/// untouched original. The first failure is returned wrapped in
/// [`PatchError::Operation`] with the op name and its position in `ops`.
pub fn apply_patch(doc: &Value, ops: &[Operation]) -> Result<Value, PatchError> {
    debug!(ops = ops.len(), "applying patch");
    let mut current = doc.clone();
    for (index, op) in ops.iter().enumerate() {
        trace!(index, op = op.name(), path = %op.path(), "applying operation");
        current = apply_op(&current, op).map_err(|source| {
            debug!(
                index,
                op = op.name(),
                kind = source.kind().as_str(),
                "operation failed, patch discarded"
            );
            PatchError::Operation {
                index,
                op: op.name(),
                source: Box::new(source),
            }
        })?;
    }
    Ok(current)
}

/// Applies a single operation. Errors carry operation context like those of
/// [`apply_patch`].
pub fn apply_operation(doc: &Value, op: &Operation) -> Result<Value, PatchError> {
    apply_patch(doc, std::slice::from_ref(op))
}

// ── Tests ─────────────────────────────────────────────────────────────────
