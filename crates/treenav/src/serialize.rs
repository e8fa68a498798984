//! Rendering the selected part of a document as text.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use treenav_json_pointer::{compile_json_pointer, find, PathStep};

use crate::selection::Selection;
use crate::SelectionError;

/// Indentation used when the caller has no preference.
pub const DEFAULT_INDENT: usize = 2;

/// Serialize `value` with `indent` spaces per level; `0` gives compact
/// output.
fn stringify<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, SelectionError> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let pad = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(pad.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Render the selected part of `json`.
///
/// Keys render as their quoted label, values as JSON. Ranges render their
/// members one per line, each followed by a comma, with object members
/// prefixed by their key. A range over the document root renders the whole
/// document. Insertion points have nothing to render and give `None`.
///
/// ```
/// use serde_json::json;
/// use treenav::{to_partial_json, MultiSelection, Selection};
/// use treenav_json_pointer::path;
///
/// let doc = json!({"arr": [2, 3, 1], "name": "x"});
/// let sel = Selection::Multi(MultiSelection::new(
///     path!["arr", 0],
///     path!["arr", 1],
///     vec![path!["arr", 0], path!["arr", 1]],
/// ));
/// assert_eq!(to_partial_json(&doc, &sel, 2).unwrap().as_deref(), Some("2,\n3,"));
/// ```
pub fn to_partial_json(
    json: &Value,
    selection: &Selection,
    indent: usize,
) -> Result<Option<String>, SelectionError> {
    let text = match selection {
        Selection::Key { path, .. } => {
            let Some(key) = path.last().map(PathStep::as_key) else {
                return Err(SelectionError::InvalidRequest(format!(
                    "{:?} has no key label",
                    compile_json_pointer(path)
                )));
            };
            stringify(&*key, indent)?
        }
        Selection::Value { path, .. } => stringify(find(json, path)?, indent)?,
        Selection::After { .. } | Selection::Inside { .. } => return Ok(None),
        Selection::Multi(m) => {
            if m.focus_path().is_empty() {
                return Ok(Some(stringify(json, indent)?));
            }
            let parent = find(json, &selection.parent_path())?;
            match (parent, m.paths()) {
                (Value::Array(_), [only]) => stringify(find(json, only)?, indent)?,
                (Value::Array(_), paths) => paths
                    .iter()
                    .map(|p| Ok(format!("{},", stringify(find(json, p)?, indent)?)))
                    .collect::<Result<Vec<_>, SelectionError>>()?
                    .join("\n"),
                (_, paths) => paths
                    .iter()
                    .map(|p| {
                        let key = p.last().map(PathStep::as_key).unwrap_or_default();
                        Ok(format!(
                            "{}: {},",
                            stringify(&*key, indent)?,
                            stringify(find(json, p)?, indent)?
                        ))
                    })
                    .collect::<Result<Vec<_>, SelectionError>>()?
                    .join("\n"),
            }
        }
    };
    Ok(Some(text))
}
