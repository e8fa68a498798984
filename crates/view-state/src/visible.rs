//! Visible-path queries.
//!
//! A path is visible when every container above it is expanded. Document
//! order is a pre-order walk in which object children follow the view
//! state's key order and array children follow their indices.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use treenav_json_pointer::{Path, PathStep};

use crate::state::{NodeState, ViewState};

/// Kind of a caret stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaretKind {
    Key,
    Value,
    After,
    Inside,
}

/// An addressable cursor position in navigation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaretPosition {
    pub path: Path,
    #[serde(rename = "type")]
    pub kind: CaretKind,
}

impl CaretPosition {
    pub fn new(path: Path, kind: CaretKind) -> Self {
        Self { path, kind }
    }
}

/// Children of `value` in display order, whether or not they are visible.
///
/// Object children follow the stored key order, restricted to keys the
/// object actually has; without object metadata the document order is used.
pub fn child_steps(value: &Value, state: Option<&NodeState>) -> Vec<PathStep> {
    match (value, state) {
        (Value::Object(map), Some(NodeState::Object(o))) => o
            .keys
            .iter()
            .filter(|k| map.contains_key(k.as_str()))
            .map(|k| PathStep::Key(k.clone()))
            .collect(),
        (Value::Object(map), _) => map.keys().map(|k| PathStep::Key(k.clone())).collect(),
        (Value::Array(items), _) => (0..items.len()).map(PathStep::Index).collect(),
        _ => Vec::new(),
    }
}

fn child<'a>(value: &'a Value, step: &PathStep) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(step.as_key().as_ref()),
        Value::Array(items) => items.get(step.as_index()?),
        _ => None,
    }
}

/// Walk `json` and `view_state` in parallel down to `path`.
fn resolve<'a>(
    json: &'a Value,
    view_state: &'a ViewState,
    path: &[PathStep],
) -> Option<(&'a Value, Option<&'a NodeState>)> {
    let mut value = json;
    let mut state = Some(view_state.root());
    for step in path {
        value = child(value, step)?;
        state = state.and_then(|s| s.child(step));
    }
    Some((value, state))
}

fn is_open(value: &Value, state: Option<&NodeState>) -> bool {
    (value.is_object() || value.is_array()) && state.is_some_and(NodeState::is_expanded)
}

/// True when `path` exists and no container above it is collapsed.
pub fn is_path_visible(json: &Value, view_state: &ViewState, path: &[PathStep]) -> bool {
    (0..path.len()).all(|depth| {
        resolve(json, view_state, &path[..depth]).is_some_and(|(v, s)| is_open(v, s))
    }) && resolve(json, view_state, path).is_some()
}

/// Every visible path in document order, the root first.
pub fn visible_paths(json: &Value, view_state: &ViewState) -> Vec<Path> {
    fn walk(value: &Value, state: Option<&NodeState>, path: &mut Path, out: &mut Vec<Path>) {
        out.push(path.clone());
        if !is_open(value, state) {
            return;
        }
        for step in child_steps(value, state) {
            if let Some(child_value) = child(value, &step) {
                let child_state = state.and_then(|s| s.child(&step));
                path.push(step);
                walk(child_value, child_state, path, out);
                path.pop();
            }
        }
    }

    let mut out = Vec::new();
    walk(json, Some(view_state.root()), &mut Path::new(), &mut out);
    out
}

/// Every caret stop in navigation order.
///
/// Each visible node contributes a value stop; object properties add a key
/// stop before it; with `include_inside`, expanded containers add an inside
/// stop after their value stop and each child adds an after stop once its
/// subtree is done.
pub fn visible_caret_positions(
    json: &Value,
    view_state: &ViewState,
    include_inside: bool,
) -> Vec<CaretPosition> {
    fn walk(
        value: &Value,
        state: Option<&NodeState>,
        path: &mut Path,
        include_inside: bool,
        out: &mut Vec<CaretPosition>,
    ) {
        out.push(CaretPosition::new(path.clone(), CaretKind::Value));
        if !is_open(value, state) {
            return;
        }
        if include_inside {
            out.push(CaretPosition::new(path.clone(), CaretKind::Inside));
        }
        let is_object = value.is_object();
        for step in child_steps(value, state) {
            let Some(child_value) = child(value, &step) else {
                continue;
            };
            let child_state = state.and_then(|s| s.child(&step));
            path.push(step);
            if is_object {
                out.push(CaretPosition::new(path.clone(), CaretKind::Key));
            }
            walk(child_value, child_state, path, include_inside, out);
            if include_inside {
                out.push(CaretPosition::new(path.clone(), CaretKind::After));
            }
            path.pop();
        }
    }

    let mut out = Vec::new();
    walk(json, Some(view_state.root()), &mut Path::new(), include_inside, &mut out);
    out
}

fn sibling(json: &Value, view_state: &ViewState, path: &[PathStep], forward: bool) -> Option<Path> {
    let (last, parent) = path.split_last()?;
    let (parent_value, parent_state) = resolve(json, view_state, parent)?;
    let siblings = child_steps(parent_value, parent_state);
    let pos = siblings.iter().position(|s| s == last)?;
    let next = if forward { pos.checked_add(1)? } else { pos.checked_sub(1)? };
    let step = siblings.get(next)?;
    let mut out = parent.to_vec();
    out.push(step.clone());
    Some(out)
}

/// Deepest last visible descendant of `path` (or `path` itself).
fn last_visible_descendant(json: &Value, view_state: &ViewState, mut path: Path) -> Path {
    while let Some((value, state)) = resolve(json, view_state, &path) {
        if !is_open(value, state) {
            break;
        }
        match child_steps(value, state).pop() {
            Some(step) => path.push(step),
            None => break,
        }
    }
    path
}

/// The visible path right before `path`, or `None` at the root or when
/// `path` is not visible.
pub fn previous_visible_path(
    json: &Value,
    view_state: &ViewState,
    path: &[PathStep],
) -> Option<Path> {
    if path.is_empty() || !is_path_visible(json, view_state, path) {
        return None;
    }
    match sibling(json, view_state, path, false) {
        Some(prev) => Some(last_visible_descendant(json, view_state, prev)),
        None => Some(path[..path.len() - 1].to_vec()),
    }
}

/// The visible path right after `path`, stepping into `path` itself when it
/// is an expanded, non-empty container.
pub fn next_visible_path(json: &Value, view_state: &ViewState, path: &[PathStep]) -> Option<Path> {
    if !is_path_visible(json, view_state, path) {
        return None;
    }
    let (value, state) = resolve(json, view_state, path)?;
    if is_open(value, state) {
        if let Some(first) = child_steps(value, state).into_iter().next() {
            let mut out = path.to_vec();
            out.push(first);
            return Some(out);
        }
    }
    next_visible_path_after_subtree(json, view_state, path)
}

/// The first visible path after the whole subtree of `path`.
pub fn next_visible_path_after_subtree(
    json: &Value,
    view_state: &ViewState,
    path: &[PathStep],
) -> Option<Path> {
    if !is_path_visible(json, view_state, path) {
        return None;
    }
    let mut current = path;
    while !current.is_empty() {
        if let Some(next) = sibling(json, view_state, current, true) {
            return Some(next);
        }
        current = &current[..current.len() - 1];
    }
    None
}
