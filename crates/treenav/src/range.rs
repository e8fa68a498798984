//! Expansion of an (anchor, focus) pair into an ordered run of siblings.

use serde_json::Value;
use treenav_json_pointer::{compile_json_pointer, find, shared_prefix, Path, PathStep};
use treenav_view_state::ViewState;

use crate::SelectionError;

/// Expand `anchor` and `focus` into the closed, ordered range of sibling
/// paths spanning them.
///
/// - equal paths give a single-element range;
/// - when one path contains the other the range degenerates to the
///   containing path;
/// - otherwise the paths diverge at two children of a shared container and
///   every child between them (inclusive) is returned in display order.
///
/// ```
/// use serde_json::json;
/// use treenav::expand_range;
/// use treenav_json_pointer::path;
/// use treenav_view_state::{ExpandPolicy, ViewState};
///
/// let doc = json!({"arr": [2, 3, 1], "name": "x"});
/// let view = ViewState::from_json(&doc, ExpandPolicy::All);
/// let range = expand_range(&doc, &view, &path!["arr", 0], &path!["arr", 2]).unwrap();
/// assert_eq!(range, vec![path!["arr", 0], path!["arr", 1], path!["arr", 2]]);
/// ```
pub fn expand_range(
    json: &Value,
    view_state: &ViewState,
    anchor: &[PathStep],
    focus: &[PathStep],
) -> Result<Vec<Path>, SelectionError> {
    if anchor == focus {
        find(json, anchor)?;
        return Ok(vec![anchor.to_vec()]);
    }

    let shared = shared_prefix(anchor, focus);
    if anchor.len() == shared.len() || focus.len() == shared.len() {
        find(json, &shared)?;
        return Ok(vec![shared]);
    }

    let depth = shared.len();
    let anchor_step = &anchor[depth];
    let focus_step = &focus[depth];

    let (start, end, children): (usize, usize, Vec<PathStep>) = match find(json, &shared)? {
        Value::Object(map) => {
            let keys: Vec<&str> = match view_state.key_order(&shared) {
                Some(order) => order
                    .iter()
                    .map(String::as_str)
                    .filter(|k| map.contains_key(*k))
                    .collect(),
                None => map.keys().map(String::as_str).collect(),
            };
            let position = |step: &PathStep| {
                keys.iter().position(|k| *k == step.as_key()).ok_or_else(|| {
                    SelectionError::Range(format!(
                        "key {:?} not found in key order of {:?}",
                        step.as_key(),
                        compile_json_pointer(&shared)
                    ))
                })
            };
            let a = position(anchor_step)?;
            let f = position(focus_step)?;
            let children = keys.iter().map(|k| PathStep::Key((*k).to_string())).collect();
            (a.min(f), a.max(f), children)
        }
        Value::Array(items) => {
            let index = |step: &PathStep| {
                step.as_index().filter(|i| *i < items.len()).ok_or_else(|| {
                    SelectionError::Range(format!(
                        "index {:?} out of range in {:?}",
                        step.as_key(),
                        compile_json_pointer(&shared)
                    ))
                })
            };
            let a = index(anchor_step)?;
            let f = index(focus_step)?;
            (a.min(f), a.max(f), (0..items.len()).map(PathStep::Index).collect())
        }
        _ => {
            return Err(SelectionError::Range(format!(
                "{:?} has no children",
                compile_json_pointer(&shared)
            )))
        }
    };

    Ok(children[start..=end]
        .iter()
        .map(|step| {
            let mut path = shared.clone();
            path.push(step.clone());
            path
        })
        .collect())
}
