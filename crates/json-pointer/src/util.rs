use crate::types::{Path, PathStep};
use crate::JsonPointerError;

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use treenav_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, so that "~01" decodes to "~1" rather than "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use treenav_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into untyped path steps.
///
/// Every step comes back as [`PathStep::Key`]; use
/// [`parse_path`](crate::parse_path) to type array indices against a document.
///
/// ```
/// use treenav_json_pointer::{parse_json_pointer, path};
///
/// assert!(parse_json_pointer("").is_empty());
/// assert_eq!(parse_json_pointer("/foo/0"), path!["foo", "0"]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), path!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Path::new();
    }
    pointer
        .strip_prefix('/')
        .unwrap_or(pointer)
        .split('/')
        .map(|c| PathStep::Key(unescape_component(c)))
        .collect()
}

/// Compile a path into a JSON Pointer string. The root compiles to `""`.
///
/// ```
/// use treenav_json_pointer::{compile_json_pointer, path};
///
/// assert_eq!(compile_json_pointer(&path![]), "");
/// assert_eq!(compile_json_pointer(&path!["arr", 1]), "/arr/1");
/// assert_eq!(compile_json_pointer(&path!["a/b"]), "/a~1b");
/// ```
pub fn compile_json_pointer(path: &[PathStep]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    for step in path {
        out.push('/');
        out.push_str(&escape_component(&step.as_key()));
    }
    out
}

/// Check if a path points to the root value.
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}

/// Check if `path` begins with every step of `prefix` (non-strict: a path
/// starts with itself).
///
/// ```
/// use treenav_json_pointer::{starts_with, path};
///
/// assert!(starts_with(&path!["a", 0, "b"], &path!["a", 0]));
/// assert!(starts_with(&path!["a"], &path!["a"]));
/// assert!(!starts_with(&path!["a"], &path!["a", 0]));
/// ```
pub fn starts_with(path: &[PathStep], prefix: &[PathStep]) -> bool {
    path.len() >= prefix.len() && path[..prefix.len()] == *prefix
}

/// Check if `parent` strictly contains `child`.
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    parent.len() < child.len() && starts_with(child, parent)
}

/// Check if two paths are equal.
pub fn is_path_equal(p1: &[PathStep], p2: &[PathStep]) -> bool {
    p1 == p2
}

/// Longest common leading run of two paths.
///
/// ```
/// use treenav_json_pointer::{shared_prefix, path};
///
/// assert_eq!(shared_prefix(&path!["a", 1, "x"], &path!["a", 1, "y"]), path!["a", 1]);
/// assert!(shared_prefix(&path!["a"], &path!["b"]).is_empty());
/// ```
pub fn shared_prefix(a: &[PathStep], b: &[PathStep]) -> Path {
    a.iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.clone())
        .collect()
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns [`JsonPointerError::NoParent`] for the root.
pub fn parent(path: &[PathStep]) -> Result<Path, JsonPointerError> {
    match path.split_last() {
        Some((_, init)) => Ok(init.to_vec()),
        None => Err(JsonPointerError::NoParent),
    }
}

/// Check if a string represents a valid non-negative integer array index.
///
/// ```
/// use treenav_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}
