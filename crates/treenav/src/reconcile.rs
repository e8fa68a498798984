//! Inferring a selection from the patch operations that produced a document.

use serde_json::Value;
use treenav_json_patch::Op;
use treenav_json_pointer::{compile_json_pointer, type_path, Path};

use crate::selection::{key_or_value, MultiSelection, Selection};

/// Target of a `move` chain whose first step renames a property and whose
/// remaining steps are in-place moves (key reordering).
fn renamed_path(operations: &[Op]) -> Option<&Path> {
    let (Op::Move { path, from }, rest) = operations.split_first()? else {
        return None;
    };
    let reorders_only = rest.iter().all(|op| matches!(op, Op::Move { .. }) && op.is_noop_move());
    (path != from && reorders_only).then_some(path)
}

/// Infer the selection to show after `operations` were applied to produce
/// `json`.
///
/// Returns `None` when no operation leaves anything worth selecting.
///
/// ```
/// use serde_json::json;
/// use treenav::{selection_from_operations, Selection};
/// use treenav_json_patch::from_json_patch;
/// use treenav_json_pointer::path;
///
/// let doc = json!({"arr": [2, 7, 1], "name": "x"});
/// let ops = from_json_patch(&json!([{"op": "replace", "path": "/arr/1", "value": 7}])).unwrap();
/// assert_eq!(selection_from_operations(&doc, &ops), Some(Selection::value(path!["arr", 1])));
/// ```
pub fn selection_from_operations(json: &Value, operations: &[Op]) -> Option<Selection> {
    let selection = if let Some(path) = renamed_path(operations) {
        key_or_value(json, type_path(json, path))
    } else if let [op @ (Op::Replace { .. } | Op::Move { .. })] = operations {
        Selection::value(type_path(json, op.path()))
    } else {
        let paths: Vec<Path> = operations
            .iter()
            .filter(|op| !matches!(op, Op::Test { .. } | Op::Remove { .. }) && !op.is_noop_move())
            .map(|op| type_path(json, op.path()))
            .collect();
        let (Some(anchor), Some(focus)) = (paths.first(), paths.last()) else {
            tracing::debug!(operations = operations.len(), "no selection after patch");
            return None;
        };
        Selection::Multi(MultiSelection::new(anchor.clone(), focus.clone(), paths))
    };
    tracing::trace!(
        focus = %compile_json_pointer(selection.focus_path()),
        kind = ?selection.kind(),
        "selection after patch"
    );
    Some(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treenav_json_patch::from_json_patch;
    use treenav_json_pointer::path;

    fn ops(patch: Value) -> Vec<Op> {
        from_json_patch(&patch).unwrap()
    }

    fn doc() -> Value {
        json!({"arr": [2, 3, 1], "name": "x"})
    }

    #[test]
    fn single_replace_selects_value() {
        let sel = selection_from_operations(&doc(), &ops(json!([{"op": "replace", "path": "/arr/1", "value": 3}])));
        let Some(Selection::Value { path, edit }) = sel else { panic!("expected a value selection") };
        assert_eq!(path, path!["arr", 1]);
        assert!(path[1].is_index());
        assert!(!edit);
    }

    #[test]
    fn rename_selects_key() {
        let sel = selection_from_operations(&doc(), &ops(json!([{"op": "move", "from": "/old", "path": "/name"}])));
        assert_eq!(sel, Some(Selection::key(path!["name"])));
    }

    #[test]
    fn rename_with_reorder() {
        let patch = json!([
            {"op": "move", "from": "/old", "path": "/name"},
            {"op": "move", "from": "/arr", "path": "/arr"},
        ]);
        assert_eq!(selection_from_operations(&doc(), &ops(patch)), Some(Selection::key(path!["name"])));
    }

    #[test]
    fn move_into_array_selects_value() {
        let patch = json!([{"op": "move", "from": "/name", "path": "/arr/0"}]);
        assert_eq!(selection_from_operations(&doc(), &ops(patch)), Some(Selection::value(path!["arr", 0])));
    }

    #[test]
    fn noop_move_alone() {
        let patch = json!([{"op": "move", "from": "/name", "path": "/name"}]);
        assert_eq!(selection_from_operations(&doc(), &ops(patch)), Some(Selection::value(path!["name"])));
    }

    #[test]
    fn collected_paths_keep_operation_order() {
        let patch = json!([
            {"op": "test", "path": "/name", "value": "x"},
            {"op": "add", "path": "/arr/2", "value": 1},
            {"op": "remove", "path": "/gone"},
            {"op": "copy", "from": "/arr/0", "path": "/arr/0"},
            {"op": "move", "from": "/name", "path": "/name"},
            {"op": "replace", "path": "/name", "value": "x"},
        ]);
        let Some(Selection::Multi(m)) = selection_from_operations(&doc(), &ops(patch)) else {
            panic!("expected a range")
        };
        assert_eq!(m.paths(), &[path!["arr", 2], path!["arr", 0], path!["name"]]);
        assert_eq!(m.anchor_path(), &path!["arr", 2]);
        assert_eq!(m.focus_path(), &path!["name"]);
    }

    #[test]
    fn nothing_left_to_select() {
        assert_eq!(selection_from_operations(&doc(), &[]), None);
        let patch = json!([{"op": "remove", "path": "/gone"}, {"op": "test", "path": "/name", "value": "x"}]);
        assert_eq!(selection_from_operations(&doc(), &ops(patch)), None);
    }
}
