//! Building canonical selections from requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use treenav_json_pointer::{
    compile_json_pointer, find, starts_with, type_path, validate_path, Path, PathStep,
};
use treenav_view_state::{visible_paths, ViewState};

use crate::navigate::{selection_down, selection_next_inside};
use crate::range::expand_range;
use crate::selection::{is_array_element, MultiSelection, Selection, SelectionKind};
use crate::SelectionError;

/// A description of the selection a caller wants.
///
/// Either `kind` with a single `path`, or `anchor_path` and `focus_path`
/// (with no kind, or `Multi`) for a range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionRequest {
    #[serde(rename = "type")]
    pub kind: Option<SelectionKind>,
    pub path: Option<Path>,
    pub anchor_path: Option<Path>,
    pub focus_path: Option<Path>,
    /// Start in text-edit mode (key and value selections only).
    pub edit: bool,
    /// Advance one row down after building the selection.
    pub next: bool,
    /// Advance to the next value inside the same parent (value selections
    /// only).
    pub next_inside: bool,
}

impl SelectionRequest {
    pub fn single(kind: SelectionKind, path: Path) -> Self {
        Self {
            kind: Some(kind),
            path: Some(path),
            ..Self::default()
        }
    }

    pub fn range(anchor_path: Path, focus_path: Path) -> Self {
        Self {
            anchor_path: Some(anchor_path),
            focus_path: Some(focus_path),
            ..Self::default()
        }
    }
}

/// Build a range selection spanning `anchor` and `focus`.
///
/// The ends of the expanded range are assigned so that the end containing
/// the supplied focus becomes the new focus. When one of the supplied paths
/// was absorbed into an ancestor, the enlarged end takes its place.
pub fn create_multi_selection(
    json: &Value,
    view_state: &ViewState,
    anchor: &[PathStep],
    focus: &[PathStep],
) -> Result<Selection, SelectionError> {
    let paths = expand_range(json, view_state, anchor, focus)?;
    let (Some(first), Some(last)) = (paths.first(), paths.last()) else {
        return Err(SelectionError::Range("empty range".into()));
    };
    let focus_at_end = starts_with(focus, last) || !starts_with(anchor, last);
    let (anchor_path, focus_path) = if focus_at_end {
        (first.clone(), last.clone())
    } else {
        (last.clone(), first.clone())
    };
    Ok(Selection::Multi(MultiSelection::new(anchor_path, focus_path, paths)))
}

fn invalid(message: impl Into<String>) -> SelectionError {
    SelectionError::InvalidRequest(message.into())
}

fn create_single(
    json: &Value,
    kind: SelectionKind,
    path: &[PathStep],
    edit: bool,
) -> Result<Selection, SelectionError> {
    let node = find(json, path)?;
    // object members always carry key steps, array elements index steps
    let path = &type_path(json, path);
    let pointer = || compile_json_pointer(path);
    let selection = match kind {
        SelectionKind::Key => {
            if path.is_empty() || is_array_element(json, path) {
                return Err(invalid(format!("{:?} has no key", pointer())));
            }
            Selection::Key { path: path.clone(), edit }
        }
        SelectionKind::Value => Selection::Value { path: path.clone(), edit },
        SelectionKind::After => {
            if path.is_empty() {
                return Err(invalid("the document root has no siblings"));
            }
            Selection::after(path.clone())
        }
        SelectionKind::Inside => {
            if !(node.is_object() || node.is_array()) {
                return Err(invalid(format!("{:?} cannot contain children", pointer())));
            }
            Selection::inside(path.clone())
        }
        SelectionKind::Multi => Selection::multi_single(path.clone()),
    };
    Ok(selection)
}

/// Normalize a [`SelectionRequest`] into a canonical [`Selection`].
///
/// ```
/// use serde_json::json;
/// use treenav::{create_selection, Selection, SelectionKind, SelectionRequest};
/// use treenav_json_pointer::path;
/// use treenav_view_state::{ExpandPolicy, ViewState};
///
/// let doc = json!({"arr": [2, 3, 1], "name": "x"});
/// let view = ViewState::from_json(&doc, ExpandPolicy::All);
///
/// let request = SelectionRequest {
///     next: true,
///     ..SelectionRequest::single(SelectionKind::Value, path!["arr", 0])
/// };
/// assert_eq!(create_selection(&doc, &view, &request).unwrap(), Selection::value(path!["arr", 1]));
/// ```
pub fn create_selection(
    json: &Value,
    view_state: &ViewState,
    request: &SelectionRequest,
) -> Result<Selection, SelectionError> {
    if request.next && request.next_inside {
        return Err(invalid("`next` and `nextInside` are exclusive"));
    }
    for path in [&request.path, &request.anchor_path, &request.focus_path].into_iter().flatten() {
        validate_path(path).map_err(|e| invalid(e.to_string()))?;
    }

    let selection = match (request.kind, &request.path, &request.anchor_path, &request.focus_path) {
        (Some(kind), Some(path), None, None) => create_single(json, kind, path, request.edit)?,
        (None | Some(SelectionKind::Multi), None, Some(anchor), Some(focus)) => {
            create_multi_selection(json, view_state, anchor, focus)?
        }
        _ => return Err(invalid(format!("unsupported request shape: {request:?}"))),
    };

    let advanced = if request.next {
        selection_down(json, view_state, &selection, false)
    } else if request.next_inside {
        match &selection {
            Selection::Value { path, .. } => selection_next_inside(json, view_state, path),
            _ => return Err(invalid("`nextInside` requires a value selection")),
        }
    } else {
        None
    };

    let selection = advanced.unwrap_or(selection);
    tracing::trace!(selection = ?selection, "created selection");
    Ok(selection)
}

/// A range over the whole document.
pub fn select_all(json: &Value, view_state: &ViewState) -> Result<Selection, SelectionError> {
    create_multi_selection(json, view_state, &[], &[])
}

/// The selection an editor starts with: the value of the first visible
/// child, or of the root when it has none.
pub fn initial_selection(json: &Value, view_state: &ViewState) -> Selection {
    let first_child = visible_paths(json, view_state)
        .into_iter()
        .find(|path| !path.is_empty());
    Selection::value(first_child.unwrap_or_default())
}
