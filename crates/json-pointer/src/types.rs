//! Type definitions for typed JSON Pointer paths.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::util::is_valid_index;

/// A step in a path.
///
/// Either an object property name or an array index. Two steps compare equal
/// when they address the same child, so `Index(1)` equals `Key("1")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    Index(usize),
    Key(String),
}

/// A path addressing a node in a JSON document. The empty path is the root.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// The step as a property name (array indices are rendered in decimal).
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            PathStep::Key(k) => Cow::Borrowed(k.as_str()),
            PathStep::Index(i) => Cow::Owned(i.to_string()),
        }
    }

    /// The step as an array index, if it is one or parses as one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(i) => Some(*i),
            PathStep::Key(k) if is_valid_index(k) => k.parse().ok(),
            PathStep::Key(_) => None,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }
}

impl PartialEq for PathStep {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathStep::Key(a), PathStep::Key(b)) => a == b,
            (PathStep::Index(a), PathStep::Index(b)) => a == b,
            (PathStep::Index(i), PathStep::Key(k)) | (PathStep::Key(k), PathStep::Index(i)) => {
                *k == i.to_string()
            }
        }
    }
}

impl Eq for PathStep {}

// Hashes the key form so that `Index(1)` and `Key("1")` land in the same bucket.
impl Hash for PathStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => f.write_str(k),
            PathStep::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

impl From<i32> for PathStep {
    fn from(index: i32) -> Self {
        match usize::try_from(index) {
            Ok(i) => PathStep::Index(i),
            Err(_) => PathStep::Key(index.to_string()),
        }
    }
}

/// Build a [`Path`] from a list of keys and indices.
///
/// ```
/// use treenav_json_pointer::{path, PathStep};
///
/// let p = path!["arr", 0];
/// assert_eq!(p, vec![PathStep::Key("arr".into()), PathStep::Index(0)]);
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };
    ($($step:expr),+ $(,)?) => {
        vec![$($crate::PathStep::from($step)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn index_and_numeric_key_are_equal() {
        assert_eq!(PathStep::Index(1), PathStep::Key("1".into()));
        assert_ne!(PathStep::Index(1), PathStep::Key("01".into()));
        assert_ne!(PathStep::Key("a".into()), PathStep::Index(0));
    }

    #[test]
    fn hash_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(PathStep::Index(3));
        assert!(set.contains(&PathStep::Key("3".into())));
    }

    #[test]
    fn serde_untagged() {
        let p: Path = serde_json::from_str(r#"["arr", 2]"#).unwrap();
        assert_eq!(p, path!["arr", 2]);
        assert!(p[1].is_index());
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"["arr",2]"#);
    }

    #[test]
    fn as_index() {
        assert_eq!(PathStep::Key("12".into()).as_index(), Some(12));
        assert_eq!(PathStep::Key("x".into()).as_index(), None);
        assert_eq!(PathStep::Index(4).as_index(), Some(4));
    }
}
