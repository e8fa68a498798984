//! JSON Pointer (RFC 6901) utilities over typed paths.
//!
//! Paths are sequences of [`PathStep`]s, each either an object key or an
//! array index. Steps compare by the child they address, so a path parsed
//! from a pointer string (all keys) equals the same path built with indices.
//!
//! # Example
//!
//! ```
//! use treenav_json_pointer::{compile_json_pointer, get, parse_path, path};
//! use serde_json::json;
//!
//! let doc = json!({"arr": [2, 3, 1], "name": "x"});
//!
//! let p = parse_path(&doc, "/arr/1");
//! assert_eq!(p, path!["arr", 1]);
//! assert_eq!(compile_json_pointer(&p), "/arr/1");
//! assert_eq!(get(&doc, &p), Some(&json!(3)));
//! ```

use thiserror::Error;

pub mod find;
pub mod types;
pub mod util;
pub mod validate;

pub use find::{find, get, parse_path, type_path};
pub use types::{Path, PathStep};
pub use util::{
    compile_json_pointer, escape_component, is_child, is_path_equal, is_root, is_valid_index,
    parent, parse_json_pointer, shared_prefix, starts_with, unescape_component,
};
pub use validate::{validate_json_pointer, validate_path, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("NO_PARENT")]
    NoParent,
}
