//! JSON codec for JSON Patch operations.
//!
//! Converts operations to/from `serde_json::Value` in RFC 6902 format.

use serde_json::{json, Map, Value};
use treenav_json_pointer::{compile_json_pointer, parse_json_pointer, validate_json_pointer, Path};

use crate::types::{Op, PatchError};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &Path) -> Value {
    Value::String(compile_json_pointer(path))
}

fn decode_path(v: &Value) -> Result<Path, PatchError> {
    let s = v
        .as_str()
        .ok_or_else(|| PatchError::InvalidOp("path must be a string".into()))?;
    validate_json_pointer(s).map_err(|e| PatchError::InvalidOp(format!("{e}: {s}")))?;
    Ok(parse_json_pointer(s))
}

fn required<'a>(obj: &'a Map<String, Value>, op: &str, key: &str) -> Result<&'a Value, PatchError> {
    obj.get(key)
        .ok_or_else(|| PatchError::InvalidOp(format!("{op} requires '{key}'")))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        Op::Remove { path, old_value } => {
            let mut m = Map::new();
            m.insert("op".into(), json!("remove"));
            m.insert("path".into(), encode_path(path));
            if let Some(ov) = old_value {
                m.insert("oldValue".into(), ov.clone());
            }
            Value::Object(m)
        }
        Op::Replace {
            path,
            value,
            old_value,
        } => {
            let mut m = Map::new();
            m.insert("op".into(), json!("replace"));
            m.insert("path".into(), encode_path(path));
            m.insert("value".into(), value.clone());
            if let Some(ov) = old_value {
                m.insert("oldValue".into(), ov.clone());
            }
            Value::Object(m)
        }
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Test { path, value, not } => {
            let mut m = Map::new();
            m.insert("op".into(), json!("test"));
            m.insert("path".into(), encode_path(path));
            m.insert("value".into(), value.clone());
            if *not {
                m.insert("not".into(), json!(true));
            }
            Value::Object(m)
        }
    }
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize one operation object.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op_str = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing 'op' field".into()))?;
    let path = decode_path(required(obj, op_str, "path")?)?;

    match op_str {
        "add" => Ok(Op::Add {
            path,
            value: required(obj, op_str, "value")?.clone(),
        }),
        "remove" => Ok(Op::Remove {
            path,
            old_value: obj.get("oldValue").cloned(),
        }),
        "replace" => Ok(Op::Replace {
            path,
            value: required(obj, op_str, "value")?.clone(),
            old_value: obj.get("oldValue").cloned(),
        }),
        "copy" => Ok(Op::Copy {
            path,
            from: decode_path(required(obj, op_str, "from")?)?,
        }),
        "move" => Ok(Op::Move {
            path,
            from: decode_path(required(obj, op_str, "from")?)?,
        }),
        "test" => Ok(Op::Test {
            path,
            value: required(obj, op_str, "value")?.clone(),
            not: obj.get("not").and_then(Value::as_bool).unwrap_or(false),
        }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Deserialize a JSON array of operations.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    v.as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?
        .iter()
        .map(from_json)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use treenav_json_pointer::path;

    #[test]
    fn decode_move() {
        let op = from_json(&json!({"op": "move", "from": "/old", "path": "/name"})).unwrap();
        assert_eq!(op, Op::Move { path: path!["name"], from: path!["old"] });
    }

    #[test]
    fn decode_escaped_path() {
        let op = from_json(&json!({"op": "remove", "path": "/a~1b"})).unwrap();
        assert_eq!(op.path(), &path!["a/b"]);
    }

    #[test]
    fn decode_errors() {
        assert!(matches!(from_json(&json!([])), Err(PatchError::InvalidOp(_))));
        assert!(matches!(from_json(&json!({"path": "/a"})), Err(PatchError::InvalidOp(_))));
        assert!(matches!(from_json(&json!({"op": "add", "path": "/a"})), Err(PatchError::InvalidOp(_))));
        assert!(matches!(from_json(&json!({"op": "move", "path": "/a"})), Err(PatchError::InvalidOp(_))));
        assert!(matches!(from_json(&json!({"op": "inc", "path": "/a"})), Err(PatchError::InvalidOp(_))));
        assert!(matches!(from_json(&json!({"op": "remove", "path": "a"})), Err(PatchError::InvalidOp(_))));
    }

    #[test]
    fn encode_patch() {
        let ops = vec![
            Op::Replace { path: path!["arr", 1], value: json!(5), old_value: Some(json!(3)) },
            Op::Test { path: path![], value: json!(null), not: true },
        ];
        assert_eq!(
            to_json_patch(&ops),
            json!([
                {"op": "replace", "path": "/arr/1", "value": 5, "oldValue": 3},
                {"op": "test", "path": "", "value": null, "not": true}
            ])
        );
    }

    #[test]
    fn decode_then_encode_keeps_shape() {
        let patch = json!([
            {"op": "add", "path": "/a", "value": {"b": 1}},
            {"op": "copy", "from": "/a", "path": "/c"}
        ]);
        let ops = from_json_patch(&patch).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(to_json_patch(&ops), patch);
    }
}
