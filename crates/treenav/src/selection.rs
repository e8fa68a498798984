//! The selection value and its accessors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use treenav_json_pointer::{compile_json_pointer, get, starts_with, Path, PathStep};
use treenav_view_state::{CaretKind, CaretPosition};

/// Kind of a [`Selection`], as used in requests and in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionKind {
    Key,
    Value,
    After,
    Inside,
    Multi,
}

/// A contiguous run of sibling nodes, or the nodes touched by a patch.
///
/// `anchor_path` is the fixed end and `focus_path` the end that moves when
/// the range is extended. `paths` keeps range order; membership is answered
/// from a set of compiled JSON Pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MultiSelectionData", into = "MultiSelectionData")]
pub struct MultiSelection {
    anchor_path: Path,
    focus_path: Path,
    paths: Vec<Path>,
    paths_set: HashSet<String>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultiSelectionData {
    anchor_path: Path,
    focus_path: Path,
    paths: Vec<Path>,
}

impl From<MultiSelectionData> for MultiSelection {
    fn from(data: MultiSelectionData) -> Self {
        MultiSelection::new(data.anchor_path, data.focus_path, data.paths)
    }
}

impl From<MultiSelection> for MultiSelectionData {
    fn from(multi: MultiSelection) -> Self {
        MultiSelectionData {
            anchor_path: multi.anchor_path,
            focus_path: multi.focus_path,
            paths: multi.paths,
        }
    }
}

impl MultiSelection {
    pub fn new(anchor_path: Path, focus_path: Path, paths: Vec<Path>) -> Self {
        let paths_set = paths.iter().map(|p| compile_json_pointer(p)).collect();
        Self {
            anchor_path,
            focus_path,
            paths,
            paths_set,
        }
    }

    pub fn anchor_path(&self) -> &Path {
        &self.anchor_path
    }

    pub fn focus_path(&self) -> &Path {
        &self.focus_path
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn contains(&self, path: &[PathStep]) -> bool {
        self.paths_set.contains(&compile_json_pointer(path))
    }
}

/// The current selection of a tree editor.
///
/// Every transition produces a new value; selections compare structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selection {
    /// The key label of an object property.
    Key {
        path: Path,
        #[serde(default)]
        edit: bool,
    },
    /// The value of a node.
    Value {
        path: Path,
        #[serde(default)]
        edit: bool,
    },
    /// The insertion point right after a node.
    After { path: Path },
    /// The insertion point before the first child of a container.
    Inside { path: Path },
    Multi(MultiSelection),
}

impl Selection {
    pub fn key(path: Path) -> Self {
        Selection::Key { path, edit: false }
    }

    pub fn value(path: Path) -> Self {
        Selection::Value { path, edit: false }
    }

    pub fn after(path: Path) -> Self {
        Selection::After { path }
    }

    pub fn inside(path: Path) -> Self {
        Selection::Inside { path }
    }

    /// A single-node range.
    pub fn multi_single(path: Path) -> Self {
        Selection::Multi(MultiSelection::new(path.clone(), path.clone(), vec![path]))
    }

    pub fn kind(&self) -> SelectionKind {
        match self {
            Selection::Key { .. } => SelectionKind::Key,
            Selection::Value { .. } => SelectionKind::Value,
            Selection::After { .. } => SelectionKind::After,
            Selection::Inside { .. } => SelectionKind::Inside,
            Selection::Multi(_) => SelectionKind::Multi,
        }
    }

    pub fn anchor_path(&self) -> &Path {
        match self {
            Selection::Key { path, .. }
            | Selection::Value { path, .. }
            | Selection::After { path }
            | Selection::Inside { path } => path,
            Selection::Multi(m) => &m.anchor_path,
        }
    }

    pub fn focus_path(&self) -> &Path {
        match self {
            Selection::Key { path, .. }
            | Selection::Value { path, .. }
            | Selection::After { path }
            | Selection::Inside { path } => path,
            Selection::Multi(m) => &m.focus_path,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Selection::Key { edit: true, .. } | Selection::Value { edit: true, .. })
    }

    /// Switch text-edit mode on or off. Only key and value selections can be
    /// edited; other kinds are returned unchanged.
    pub fn with_edit(self, edit: bool) -> Self {
        match self {
            Selection::Key { path, .. } => Selection::Key { path, edit },
            Selection::Value { path, .. } => Selection::Value { path, edit },
            other => other,
        }
    }

    pub fn remove_edit_mode(self) -> Self {
        self.with_edit(false)
    }

    /// The container whose children are selected: the focus path itself for
    /// `Inside`, otherwise the focus path's parent (the root for the root).
    pub fn parent_path(&self) -> Path {
        match self {
            Selection::Inside { path } => path.clone(),
            _ => {
                let focus = self.focus_path();
                focus[..focus.len().saturating_sub(1)].to_vec()
            }
        }
    }

    /// First selected path in range order.
    pub fn start_path(&self) -> &Path {
        match self {
            Selection::Multi(m) => m.paths.first().unwrap_or(&m.focus_path),
            _ => self.focus_path(),
        }
    }

    /// Last selected path in range order.
    pub fn end_path(&self) -> &Path {
        match self {
            Selection::Multi(m) => m.paths.last().unwrap_or(&m.focus_path),
            _ => self.focus_path(),
        }
    }

    /// True when `path` is one of the selected nodes.
    pub fn contains_path(&self, path: &[PathStep]) -> bool {
        match self {
            Selection::Multi(m) => m.contains(path),
            _ => self.focus_path().as_slice() == path,
        }
    }

    /// The caret stop this selection sits on, if it is a caret-like kind.
    pub fn caret_kind(&self) -> Option<CaretKind> {
        match self {
            Selection::Key { .. } => Some(CaretKind::Key),
            Selection::Value { .. } => Some(CaretKind::Value),
            Selection::After { .. } => Some(CaretKind::After),
            Selection::Inside { .. } => Some(CaretKind::Inside),
            Selection::Multi(_) => None,
        }
    }

    pub fn from_caret(caret: CaretPosition) -> Self {
        match caret.kind {
            CaretKind::Key => Selection::key(caret.path),
            CaretKind::Value => Selection::value(caret.path),
            CaretKind::After => Selection::after(caret.path),
            CaretKind::Inside => Selection::inside(caret.path),
        }
    }
}

/// True when the node at `path` is an element of an array.
pub(crate) fn is_array_element(json: &Value, path: &[PathStep]) -> bool {
    match path.split_last() {
        Some((_, parent)) => get(json, parent).is_some_and(Value::is_array),
        None => false,
    }
}

/// `Key` when the node has a key label, `Value` for the root and array
/// elements.
pub(crate) fn key_or_value(json: &Value, path: Path) -> Selection {
    if path.is_empty() || is_array_element(json, &path) {
        Selection::value(path)
    } else {
        Selection::key(path)
    }
}

/// True when the selection's focus lies inside the subtree of `path`: below
/// it, or on it for an `Inside` caret.
pub fn is_selection_inside_path(selection: &Selection, path: &[PathStep]) -> bool {
    let focus = selection.focus_path();
    starts_with(focus, path)
        && (focus.len() > path.len() || matches!(selection, Selection::Inside { .. }))
}

/// Return the selection when it touches the subtree at `path` (a selected
/// node lies inside it, or it lies inside a selected node).
pub fn selection_if_overlapping(
    selection: Option<&Selection>,
    path: &[PathStep],
) -> Option<Selection> {
    let selection = selection?;
    let overlaps = |p: &Path| starts_with(p, path) || starts_with(path, p);
    let touched = match selection {
        Selection::Multi(m) => m.paths.iter().any(overlaps),
        other => overlaps(other.focus_path()),
    };
    touched.then(|| selection.clone())
}
