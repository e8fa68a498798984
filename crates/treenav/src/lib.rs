//! Selection and keyboard navigation for tree-structured JSON editors.
//!
//! A [`Selection`] is an immutable value: a key label, a value, an insertion
//! point after a node or inside a container, or a range of siblings. The
//! functions in this crate take a document, its
//! [`ViewState`](treenav_view_state::ViewState) and the current selection and
//! return a new selection; none of them mutate their inputs.
//!
//! - [`create_selection`] normalizes a [`SelectionRequest`].
//! - [`selection_up`], [`selection_down`], [`selection_left`] and
//!   [`selection_right`] move or extend the selection.
//! - [`selection_from_operations`] infers a selection from a JSON Patch.
//! - [`to_partial_json`] renders the selected text.
//!
//! ```
//! use serde_json::json;
//! use treenav::{selection_down, selection_up, Selection};
//! use treenav_json_pointer::path;
//! use treenav_view_state::{ExpandPolicy, ViewState};
//!
//! let doc = json!({"arr": [2, 3, 1], "name": "x"});
//! let view = ViewState::from_json(&doc, ExpandPolicy::All);
//!
//! let sel = Selection::key(path!["arr"]);
//! let down = selection_down(&doc, &view, &sel, false).unwrap();
//! assert_eq!(down, Selection::value(path!["arr", 0]));
//! assert_eq!(selection_up(&doc, &view, &down, false), Some(Selection::value(path!["arr"])));
//! ```

mod error;

pub mod cli;
pub mod create;
pub mod navigate;
pub mod range;
pub mod reconcile;
pub mod selection;
pub mod serialize;

pub use create::{
    create_multi_selection, create_selection, initial_selection, select_all, SelectionRequest,
};
pub use error::SelectionError;
pub use navigate::{
    locate_caret, selection_down, selection_left, selection_next_inside, selection_right,
    selection_up, CaretLocation,
};
pub use range::expand_range;
pub use reconcile::selection_from_operations;
pub use selection::{
    is_selection_inside_path, selection_if_overlapping, MultiSelection, Selection, SelectionKind,
};
pub use serialize::{to_partial_json, DEFAULT_INDENT};
