//! JSON Patch (RFC 6902) over typed paths.
//!
//! # Operations
//!
//! `add`, `remove`, `replace`, `copy`, `move`, `test`.
//!
//! Paths decoded from pointer strings carry untyped steps; array indices are
//! resolved against the document when an operation is applied.
//!
//! ```
//! use treenav_json_patch::{apply_patch, from_json_patch, ApplyPatchOptions};
//! use serde_json::json;
//!
//! let ops = from_json_patch(&json!([{"op": "replace", "path": "/arr/1", "value": 7}])).unwrap();
//! let res = apply_patch(json!({"arr": [2, 3, 1]}), &ops, &ApplyPatchOptions::default()).unwrap();
//! assert_eq!(res.doc, json!({"arr": [2, 7, 1]}));
//! ```

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_ops, apply_patch};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{ApplyPatchOptions, Op, OpResult, PatchError, PatchResult};
