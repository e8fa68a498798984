use serde_json::Value;

use crate::types::{Path, PathStep};
use crate::util::{compile_json_pointer, is_valid_index, parse_json_pointer};
use crate::JsonPointerError;

/// Step one level into `val`.
fn child<'a>(val: &'a Value, step: &PathStep) -> Option<&'a Value> {
    match val {
        Value::Array(arr) => arr.get(step.as_index()?),
        Value::Object(map) => map.get(step.as_key().as_ref()),
        _ => None,
    }
}

/// Get a value from a JSON document by path.
///
/// Returns `None` if the path doesn't exist.
///
/// ```
/// use treenav_json_pointer::{get, path};
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": [10, 20]}});
/// assert_eq!(get(&doc, &path!["foo", "bar", 1]), Some(&json!(20)));
/// assert_eq!(get(&doc, &path!["missing"]), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    path.iter().try_fold(val, child)
}

/// Like [`get`], but reports a missing node as an error carrying its pointer.
pub fn find<'a>(val: &'a Value, path: &[PathStep]) -> Result<&'a Value, JsonPointerError> {
    get(val, path).ok_or_else(|| JsonPointerError::NotFound(compile_json_pointer(path)))
}

/// Re-type the steps of `path` against `doc`: a step addressing an array
/// element becomes [`PathStep::Index`], everything else a [`PathStep::Key`].
///
/// Steps below a missing node are kept as they are.
pub fn type_path(doc: &Value, path: &[PathStep]) -> Path {
    let mut out = Path::with_capacity(path.len());
    let mut current = Some(doc);
    for step in path {
        let typed = match (current, step) {
            (Some(Value::Array(_)), PathStep::Key(k)) if is_valid_index(k) => {
                step.as_index().map_or_else(|| step.clone(), PathStep::Index)
            }
            (Some(Value::Object(_)), PathStep::Index(i)) => PathStep::Key(i.to_string()),
            _ => step.clone(),
        };
        current = current.and_then(|v| child(v, &typed));
        out.push(typed);
    }
    out
}

/// Parse a JSON Pointer string into a path whose array indices are typed
/// against `doc`.
///
/// ```
/// use treenav_json_pointer::{parse_path, PathStep};
/// use serde_json::json;
///
/// let doc = json!({"arr": [1, 2], "7": true});
/// let p = parse_path(&doc, "/arr/1");
/// assert!(matches!(p[1], PathStep::Index(1)));
/// let p = parse_path(&doc, "/7");
/// assert!(matches!(p[0], PathStep::Key(_)));
/// ```
pub fn parse_path(doc: &Value, pointer: &str) -> Path {
    type_path(doc, &parse_json_pointer(pointer))
}
