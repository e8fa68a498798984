//! View state for tree-structured JSON editors.
//!
//! A [`ViewState`] stores, per container node, whether it is expanded and
//! (for objects) the display order of its keys. It is addressed by the same
//! [`Path`](treenav_json_pointer::Path)s as the document. The [`visible`]
//! module answers which paths and caret stops are currently on screen.
//!
//! ```
//! use serde_json::json;
//! use treenav_json_pointer::path;
//! use treenav_view_state::{next_visible_path, ExpandPolicy, ViewState};
//!
//! let doc = json!({"arr": [2, 3, 1], "name": "x"});
//! let view = ViewState::from_json(&doc, ExpandPolicy::Minimal);
//! assert_eq!(next_visible_path(&doc, &view, &path!["arr"]), Some(path!["name"]));
//! ```

use thiserror::Error;

pub mod state;
pub mod visible;

pub use state::{ArrayState, ExpandPolicy, NodeState, ObjectState, ViewState};
pub use visible::{
    child_steps, is_path_visible, next_visible_path, next_visible_path_after_subtree,
    previous_visible_path, visible_caret_positions, visible_paths, CaretKind, CaretPosition,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewStateError {
    #[error("no view state at {0}")]
    NotFound(String),
    #[error("node at {0} cannot be expanded")]
    NotExpandable(String),
    #[error("node at {0} is not an object")]
    NotAnObject(String),
    #[error("key order at {0} does not match the object's keys")]
    KeyOrder(String),
}
