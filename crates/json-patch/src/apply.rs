//! JSON Patch apply logic.

use serde_json::Value;
use treenav_json_pointer::{get, starts_with, PathStep};

use crate::types::{ApplyPatchOptions, Op, OpResult, PatchError, PatchResult};

// ── Path navigation ───────────────────────────────────────────────────────

/// Mutable navigation to the value at `path` (must exist).
fn get_mut_at<'a>(doc: &'a mut Value, path: &[PathStep]) -> Result<&'a mut Value, PatchError> {
    let mut current = doc;
    for step in path {
        current = match current {
            Value::Array(arr) => {
                let idx = step.as_index().ok_or(PatchError::InvalidIndex)?;
                arr.get_mut(idx).ok_or(PatchError::NotFound)?
            }
            Value::Object(map) => map.get_mut(step.as_key().as_ref()).ok_or(PatchError::NotFound)?,
            _ => return Err(PatchError::NotFound),
        };
    }
    Ok(current)
}

fn split_last(path: &[PathStep]) -> Result<(&[PathStep], &PathStep), PatchError> {
    match path.split_last() {
        Some((key, parent)) => Ok((parent, key)),
        None => Err(PatchError::InvalidTarget),
    }
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(
    doc: &mut Value,
    path: &[PathStep],
    value: Value,
) -> Result<Option<Value>, PatchError> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (parent_path, key) = split_last(path)?;
    match get_mut_at(doc, parent_path)? {
        Value::Object(map) => Ok(map.insert(key.as_key().into_owned(), value)),
        Value::Array(arr) => {
            let idx = match key {
                PathStep::Key(k) if k == "-" => arr.len(),
                _ => key.as_index().ok_or(PatchError::InvalidIndex)?,
            };
            if idx > arr.len() {
                return Err(PatchError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(None)
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[PathStep]) -> Result<Option<Value>, PatchError> {
    let (parent_path, key) = split_last(path)?;
    match get_mut_at(doc, parent_path)? {
        // shift_remove keeps the remaining keys in document order
        Value::Object(map) => map
            .shift_remove(key.as_key().as_ref())
            .ok_or(PatchError::NotFound)
            .map(Some),
        Value::Array(arr) => {
            let idx = key.as_index().ok_or(PatchError::InvalidIndex)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            Ok(Some(arr.remove(idx)))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_replace(
    doc: &mut Value,
    path: &[PathStep],
    value: Value,
) -> Result<Option<Value>, PatchError> {
    let target = get_mut_at(doc, path)?;
    Ok(Some(std::mem::replace(target, value)))
}

fn apply_copy(
    doc: &mut Value,
    path: &[PathStep],
    from: &[PathStep],
) -> Result<Option<Value>, PatchError> {
    let src = get(doc, from).ok_or(PatchError::NotFound)?.clone();
    apply_add(doc, path, src)
}

fn apply_move(
    doc: &mut Value,
    path: &[PathStep],
    from: &[PathStep],
) -> Result<Option<Value>, PatchError> {
    if path == from {
        return Ok(None);
    }
    if starts_with(path, from) {
        return Err(PatchError::InvalidTarget);
    }
    let value = apply_remove(doc, from)?.ok_or(PatchError::NotFound)?;
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &[PathStep], value: &Value, not: bool) -> Result<(), PatchError> {
    let actual = get(doc, path).ok_or(PatchError::NotFound)?;
    if (actual == value) == not {
        Err(PatchError::Test)
    } else {
        Ok(())
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Apply a single operation to `doc` in place. Returns the replaced or
/// removed value, if any.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<Option<Value>, PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path, .. } => apply_remove(doc, path),
        Op::Replace { path, value, .. } => apply_replace(doc, path, value.clone()),
        Op::Copy { path, from } => apply_copy(doc, path, from),
        Op::Move { path, from } => apply_move(doc, path, from),
        Op::Test { path, value, not } => {
            apply_test(doc, path, value, *not)?;
            Ok(None)
        }
    }
}

/// Apply a sequence of operations, capturing the document after each one.
pub fn apply_ops(mut doc: Value, ops: &[Op]) -> Result<PatchResult, PatchError> {
    let mut results = Vec::with_capacity(ops.len());
    for op in ops {
        let old = apply_op(&mut doc, op)?;
        results.push(OpResult { doc: doc.clone(), old });
    }
    Ok(PatchResult { doc, res: results })
}

/// Apply a sequence of operations with options.
///
/// With `mutate: true` no per-operation snapshots are kept.
pub fn apply_patch(
    doc: Value,
    ops: &[Op],
    options: &ApplyPatchOptions,
) -> Result<PatchResult, PatchError> {
    if options.mutate {
        let mut working = doc;
        for op in ops {
            apply_op(&mut working, op)?;
        }
        Ok(PatchResult { doc: working, res: vec![] })
    } else {
        apply_ops(doc, ops)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
