//! Directional navigation over visible nodes and caret stops.
//!
//! Every function takes the document, its view state and the current
//! selection and returns the next selection, or `None` when the selection
//! cannot move (a document boundary, or a move that has no meaning for the
//! current kind). The text-edit flag never survives a move.

use serde_json::Value;
use treenav_json_pointer::{compile_json_pointer, is_child, PathStep};
use treenav_view_state::{
    next_visible_path, next_visible_path_after_subtree, previous_visible_path,
    visible_caret_positions, CaretPosition, ViewState,
};

use crate::create::create_multi_selection;
use crate::selection::{is_array_element, key_or_value, Selection};

/// A caret stop matched to the current selection, with its neighbours in
/// navigation order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaretLocation {
    pub caret: Option<CaretPosition>,
    pub previous: Option<CaretPosition>,
    pub next: Option<CaretPosition>,
}

fn multi(
    json: &Value,
    view_state: &ViewState,
    anchor: &[PathStep],
    focus: &[PathStep],
) -> Option<Selection> {
    match create_multi_selection(json, view_state, anchor, focus) {
        Ok(selection) => Some(selection),
        Err(e) => {
            tracing::debug!(
                anchor = %compile_json_pointer(anchor),
                focus = %compile_json_pointer(focus),
                error = %e,
                "cannot extend selection"
            );
            None
        }
    }
}

fn boundary(direction: &'static str, selection: &Selection) -> Option<Selection> {
    tracing::debug!(
        direction,
        focus = %compile_json_pointer(selection.focus_path()),
        "no selection change"
    );
    None
}

/// Move the selection one visible row up.
///
/// With `extend` the anchor stays put and the focus moves, yielding a range.
pub fn selection_up(
    json: &Value,
    view_state: &ViewState,
    selection: &Selection,
    extend: bool,
) -> Option<Selection> {
    if extend {
        let (anchor, focus) = match selection {
            Selection::After { path } | Selection::Inside { path } => (path, path),
            other => (other.anchor_path(), other.focus_path()),
        };
        return match previous_visible_path(json, view_state, focus) {
            Some(previous) => multi(json, view_state, anchor, &previous),
            None => boundary("up", selection),
        };
    }

    match selection {
        Selection::After { path } | Selection::Inside { path } => {
            multi(json, view_state, path, path)
        }
        Selection::Key { path, .. } => match previous_visible_path(json, view_state, path) {
            Some(previous) => Some(key_or_value(json, previous)),
            None => boundary("up", selection),
        },
        Selection::Value { path, .. } => match previous_visible_path(json, view_state, path) {
            Some(previous) => Some(Selection::value(previous)),
            None => boundary("up", selection),
        },
        Selection::Multi(_) => {
            match previous_visible_path(json, view_state, selection.start_path()) {
                Some(previous) => multi(json, view_state, &previous, &previous),
                None => boundary("up", selection),
            }
        }
    }
}

/// Move the selection one visible row down.
///
/// With `extend`, the focus skips over its own subtree so that an expanded
/// container is passed rather than entered.
pub fn selection_down(
    json: &Value,
    view_state: &ViewState,
    selection: &Selection,
    extend: bool,
) -> Option<Selection> {
    if extend {
        return match selection {
            // The range starts at the node following the insertion point.
            Selection::After { path } => {
                match next_visible_path_after_subtree(json, view_state, path) {
                    Some(next) => multi(json, view_state, &next, &next),
                    None => boundary("down", selection),
                }
            }
            Selection::Inside { path } => {
                match next_visible_path_after_subtree(json, view_state, path) {
                    Some(next) => multi(json, view_state, path, &next),
                    None => boundary("down", selection),
                }
            }
            other => match next_visible_path_after_subtree(json, view_state, other.focus_path()) {
                Some(next) => multi(json, view_state, other.anchor_path(), &next),
                None => boundary("down", selection),
            },
        };
    }

    match selection {
        Selection::After { path } | Selection::Inside { path } => {
            multi(json, view_state, path, path)
        }
        Selection::Key { path, .. } => match next_visible_path(json, view_state, path) {
            Some(next) => Some(key_or_value(json, next)),
            None => boundary("down", selection),
        },
        Selection::Value { path, .. } => match next_visible_path(json, view_state, path) {
            Some(next) => Some(Selection::value(next)),
            None => boundary("down", selection),
        },
        Selection::Multi(_) => match next_visible_path(json, view_state, selection.end_path()) {
            Some(next) => multi(json, view_state, &next, &next),
            None => boundary("down", selection),
        },
    }
}

/// Find the caret stop of `selection` among all visible caret stops.
///
/// Ranges have no caret stop, so a `Multi` selection yields an empty
/// location.
pub fn locate_caret(json: &Value, view_state: &ViewState, selection: &Selection) -> CaretLocation {
    let Some(kind) = selection.caret_kind() else {
        return CaretLocation::default();
    };
    let carets = visible_caret_positions(json, view_state, true);
    let focus = selection.focus_path();
    let Some(index) = carets.iter().position(|c| c.kind == kind && &c.path == focus) else {
        return CaretLocation::default();
    };
    CaretLocation {
        caret: carets.get(index).cloned(),
        previous: index.checked_sub(1).and_then(|i| carets.get(i)).cloned(),
        next: carets.get(index + 1).cloned(),
    }
}

/// Move to the previous caret stop.
///
/// Without a previous stop, a value inside an array becomes a single-node
/// range and a range on an object property becomes a key selection. With
/// `extend`, a non-range selection turns into the range it spans.
pub fn selection_left(
    json: &Value,
    view_state: &ViewState,
    selection: &Selection,
    extend: bool,
) -> Option<Selection> {
    if extend {
        return match selection {
            Selection::Multi(_) => boundary("left", selection),
            other => multi(json, view_state, other.anchor_path(), other.focus_path()),
        };
    }

    let location = locate_caret(json, view_state, selection);
    if let (Some(_), Some(previous)) = (location.caret, location.previous) {
        return Some(Selection::from_caret(previous));
    }

    match selection {
        Selection::Value { path, .. } if is_array_element(json, path) => {
            multi(json, view_state, path, path)
        }
        Selection::Multi(m)
            if !m.focus_path().is_empty() && !is_array_element(json, m.focus_path()) =>
        {
            Some(Selection::key(m.focus_path().clone()))
        }
        _ => boundary("left", selection),
    }
}

/// Move to the next caret stop. Without a next stop, a range becomes a value
/// selection on its focus.
pub fn selection_right(
    json: &Value,
    view_state: &ViewState,
    selection: &Selection,
    extend: bool,
) -> Option<Selection> {
    if extend {
        return match selection {
            Selection::Multi(_) => boundary("right", selection),
            other => multi(json, view_state, other.anchor_path(), other.focus_path()),
        };
    }

    let location = locate_caret(json, view_state, selection);
    if let (Some(_), Some(next)) = (location.caret, location.next) {
        return Some(Selection::from_caret(next));
    }

    match selection {
        Selection::Multi(m) => Some(Selection::value(m.focus_path().clone())),
        _ => boundary("right", selection),
    }
}

/// The value after `path` within the same parent, or an `After` caret on
/// `path` when the parent has nothing further to show. Used to advance after
/// an inline edit is committed. The root has no parent and yields `None`.
pub fn selection_next_inside(
    json: &Value,
    view_state: &ViewState,
    path: &[PathStep],
) -> Option<Selection> {
    let (_, parent) = path.split_last()?;
    match next_visible_path_after_subtree(json, view_state, path) {
        Some(next) if is_child(parent, &next) => Some(Selection::value(next)),
        _ => Some(Selection::after(path.to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treenav_json_pointer::path;
    use treenav_view_state::{CaretKind, ExpandPolicy};

    fn doc() -> Value {
        json!({"arr": [2, 3, 1], "name": "x"})
    }

    fn expanded(json: &Value) -> ViewState {
        ViewState::from_json(json, ExpandPolicy::All)
    }

    #[test]
    fn down_value() {
        let json = doc();
        let vs = expanded(&json);
        let sel = Selection::value(path!["arr"]).with_edit(true);
        assert_eq!(selection_down(&json, &vs, &sel, false), Some(Selection::value(path!["arr", 0])));
    }

    #[test]
    fn down_key_degrades_in_array() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(
            selection_down(&json, &vs, &Selection::key(path!["arr"]), false),
            Some(Selection::value(path!["arr", 0]))
        );
        assert_eq!(
            selection_down(&json, &vs, &Selection::value(path!["arr", 2]), false),
            Some(Selection::value(path!["name"]))
        );
        assert_eq!(
            selection_up(&json, &vs, &Selection::key(path!["name"]), false),
            Some(Selection::value(path!["arr", 2]))
        );
        assert_eq!(
            selection_up(&json, &vs, &Selection::key(path!["arr"]), false),
            Some(Selection::value(path![]))
        );
    }

    #[test]
    fn key_stays_key_between_properties() {
        let json = doc();
        let vs = ViewState::from_json(&json, ExpandPolicy::Minimal);
        assert_eq!(
            selection_down(&json, &vs, &Selection::key(path!["arr"]), false),
            Some(Selection::key(path!["name"]))
        );
    }

    #[test]
    fn boundaries() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(selection_down(&json, &vs, &Selection::value(path!["name"]), false), None);
        assert_eq!(selection_up(&json, &vs, &Selection::value(path![]), false), None);
        assert_eq!(selection_down(&json, &vs, &Selection::value(path!["name"]), true), None);
    }

    #[test]
    fn after_and_inside_select_their_node_first() {
        let json = doc();
        let vs = expanded(&json);
        let expected = Some(Selection::multi_single(path!["arr", 1]));
        assert_eq!(selection_down(&json, &vs, &Selection::after(path!["arr", 1]), false), expected);
        assert_eq!(selection_up(&json, &vs, &Selection::after(path!["arr", 1]), false), expected);
        assert_eq!(
            selection_down(&json, &vs, &Selection::inside(path!["arr"]), false),
            Some(Selection::multi_single(path!["arr"]))
        );
    }

    #[test]
    fn multi_moves_as_single_node() {
        let json = doc();
        let vs = expanded(&json);
        let range = create_multi_selection(&json, &vs, &path!["arr", 0], &path!["arr", 1]).unwrap();
        assert_eq!(
            selection_down(&json, &vs, &range, false),
            Some(Selection::multi_single(path!["arr", 2]))
        );
        assert_eq!(
            selection_up(&json, &vs, &range, false),
            Some(Selection::multi_single(path!["arr"]))
        );
    }

    #[test]
    fn down_extend_skips_expanded_subtree() {
        let json = doc();
        let vs = expanded(&json);
        let sel = selection_down(&json, &vs, &Selection::value(path!["arr"]), true).unwrap();
        let Selection::Multi(m) = sel else { panic!("expected a range") };
        assert_eq!(m.paths(), &[path!["arr"], path!["name"]]);
        assert_eq!(m.anchor_path(), &path!["arr"]);
        assert_eq!(m.focus_path(), &path!["name"]);
    }

    #[test]
    fn extend_keeps_anchor() {
        let json = doc();
        let vs = expanded(&json);
        let sel = selection_down(&json, &vs, &Selection::value(path!["arr", 0]), true).unwrap();
        let sel = selection_down(&json, &vs, &sel, true).unwrap();
        let Selection::Multi(m) = &sel else { panic!("expected a range") };
        assert_eq!(m.paths(), &[path!["arr", 0], path!["arr", 1], path!["arr", 2]]);
        assert_eq!(m.anchor_path(), &path!["arr", 0]);

        let sel = selection_up(&json, &vs, &sel, true).unwrap();
        let Selection::Multi(m) = &sel else { panic!("expected a range") };
        assert_eq!(m.paths(), &[path!["arr", 0], path!["arr", 1]]);
        assert_eq!(m.focus_path(), &path!["arr", 1]);
    }

    #[test]
    fn up_extend_reverses_direction() {
        let json = doc();
        let vs = expanded(&json);
        let sel = selection_up(&json, &vs, &Selection::value(path!["arr", 2]), true).unwrap();
        let Selection::Multi(m) = &sel else { panic!("expected a range") };
        assert_eq!(m.paths(), &[path!["arr", 1], path!["arr", 2]]);
        assert_eq!(m.anchor_path(), &path!["arr", 2]);
        assert_eq!(m.focus_path(), &path!["arr", 1]);
    }

    #[test]
    fn extend_from_inside_keeps_container_as_anchor() {
        let json = doc();
        let vs = expanded(&json);
        let down = selection_down(&json, &vs, &Selection::inside(path!["arr"]), true).unwrap();
        let Selection::Multi(m) = &down else { panic!("expected a range") };
        assert_eq!(m.paths(), &[path!["arr"], path!["name"]]);
        assert_eq!(m.anchor_path(), &path!["arr"]);
        assert_eq!(m.focus_path(), &path!["name"]);

        // the previous row is the root, which absorbs the container
        let up = selection_up(&json, &vs, &Selection::inside(path!["arr"]), true);
        assert_eq!(up, create_multi_selection(&json, &vs, &path!["arr"], &path![]).ok());
        assert_eq!(up, Some(Selection::multi_single(path![])));
    }

    #[test]
    fn extend_down_from_after_starts_at_next_node() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(
            selection_down(&json, &vs, &Selection::after(path!["arr", 0]), true),
            Some(Selection::multi_single(path!["arr", 1]))
        );
        assert_eq!(
            selection_up(&json, &vs, &Selection::after(path!["arr", 1]), true),
            create_multi_selection(&json, &vs, &path!["arr", 1], &path!["arr", 0]).ok()
        );
    }

    #[test]
    fn locate_caret_neighbours() {
        let json = doc();
        let vs = expanded(&json);
        let loc = locate_caret(&json, &vs, &Selection::value(path!["name"]));
        assert_eq!(loc.caret.map(|c| c.kind), Some(CaretKind::Value));
        assert_eq!(loc.previous, Some(CaretPosition::new(path!["name"], CaretKind::Key)));
        assert_eq!(loc.next, Some(CaretPosition::new(path!["name"], CaretKind::After)));

        let loc = locate_caret(&json, &vs, &Selection::multi_single(path!["name"]));
        assert_eq!(loc, CaretLocation::default());
    }

    #[test]
    fn left_right_walk_carets() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(
            selection_left(&json, &vs, &Selection::value(path!["name"]), false),
            Some(Selection::key(path!["name"]))
        );
        assert_eq!(
            selection_right(&json, &vs, &Selection::key(path!["name"]), false),
            Some(Selection::value(path!["name"]))
        );
        assert_eq!(
            selection_left(&json, &vs, &Selection::value(path!["arr", 1]), false),
            Some(Selection::after(path!["arr", 0]))
        );
    }

    #[test]
    fn left_right_convert_ranges() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(
            selection_left(&json, &vs, &Selection::multi_single(path!["name"]), false),
            Some(Selection::key(path!["name"]))
        );
        assert_eq!(selection_left(&json, &vs, &Selection::multi_single(path!["arr", 0]), false), None);
        assert_eq!(selection_left(&json, &vs, &Selection::multi_single(path![]), false), None);
        assert_eq!(
            selection_right(&json, &vs, &Selection::multi_single(path!["arr", 0]), false),
            Some(Selection::value(path!["arr", 0]))
        );
    }

    #[test]
    fn left_right_at_document_ends() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(selection_left(&json, &vs, &Selection::value(path![]), false), None);
        assert_eq!(selection_right(&json, &vs, &Selection::after(path!["name"]), false), None);
    }

    #[test]
    fn horizontal_extend() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(
            selection_left(&json, &vs, &Selection::key(path!["name"]), true),
            Some(Selection::multi_single(path!["name"]))
        );
        let range = Selection::multi_single(path!["name"]);
        assert_eq!(selection_right(&json, &vs, &range, true), None);
    }

    #[test]
    fn next_inside() {
        let json = doc();
        let vs = expanded(&json);
        assert_eq!(
            selection_next_inside(&json, &vs, &path!["arr", 0]),
            Some(Selection::value(path!["arr", 1]))
        );
        assert_eq!(
            selection_next_inside(&json, &vs, &path!["arr", 2]),
            Some(Selection::after(path!["arr", 2]))
        );
        assert_eq!(
            selection_next_inside(&json, &vs, &path!["name"]),
            Some(Selection::after(path!["name"]))
        );
        assert_eq!(selection_next_inside(&json, &vs, &path![]), None);
        // an expanded container is stepped over, not into
        assert_eq!(
            selection_next_inside(&json, &vs, &path!["arr"]),
            Some(Selection::value(path!["name"]))
        );
    }
}
