//! Core logic of the command-line tools.
//!
//! - `treenav-copy`         - render a selection of a document read from stdin
//! - `treenav-patch-select` - apply a patch and print the selection it implies
//!
//! Both tools treat every container as expanded.

use serde_json::Value;
use thiserror::Error;
use treenav_json_patch::{apply_patch, from_json_patch, ApplyPatchOptions, PatchError};
use treenav_view_state::{ExpandPolicy, ViewState};

use crate::create::{create_selection, SelectionRequest};
use crate::reconcile::selection_from_operations;
use crate::serialize::to_partial_json;
use crate::SelectionError;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("nothing to copy: {0:?} selection")]
    NothingToCopy(crate::SelectionKind),
}

// ── treenav-copy ──────────────────────────────────────────────────────────

/// Build the selection described by `request_json` on `doc_json` and render
/// it with `indent` spaces per level.
pub fn copy_selection(
    doc_json: &str,
    request_json: &str,
    indent: usize,
) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let request: SelectionRequest = serde_json::from_str(request_json)?;
    let view_state = ViewState::from_json(&doc, ExpandPolicy::All);
    let selection = create_selection(&doc, &view_state, &request)?;
    to_partial_json(&doc, &selection, indent)?.ok_or(CliError::NothingToCopy(selection.kind()))
}

// ── treenav-patch-select ──────────────────────────────────────────────────

/// Apply `patch_json` to `doc_json` and return the inferred selection as
/// pretty-printed JSON (`null` when nothing is selected).
pub fn patch_select(doc_json: &str, patch_json: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let ops = from_json_patch(&serde_json::from_str(patch_json)?)?;
    let result = apply_patch(doc, &ops, &ApplyPatchOptions { mutate: true })?;
    let selection = selection_from_operations(&result.doc, &ops);
    Ok(serde_json::to_string_pretty(&selection)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────
