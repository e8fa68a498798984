//! The view-state tree: a metadata overlay mirroring the document's shape.

use std::collections::HashMap;

use serde_json::Value;
use treenav_json_pointer::{compile_json_pointer, Path, PathStep};

use crate::ViewStateError;

/// Which containers start out expanded when a view state is derived from a
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandPolicy {
    /// Everything collapsed.
    None,
    /// Only the root expanded.
    #[default]
    Minimal,
    /// Every container expanded.
    All,
    /// Containers shallower than the given depth expanded (`Depth(1)` equals
    /// `Minimal`).
    Depth(usize),
}

impl ExpandPolicy {
    pub fn expands(&self, path: &[PathStep]) -> bool {
        match self {
            ExpandPolicy::None => false,
            ExpandPolicy::Minimal => path.is_empty(),
            ExpandPolicy::All => true,
            ExpandPolicy::Depth(depth) => path.len() < *depth,
        }
    }
}

/// View metadata of an object node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectState {
    pub expanded: bool,
    /// Display order of the object's keys.
    pub keys: Vec<String>,
    pub properties: HashMap<String, NodeState>,
}

/// View metadata of an array node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayState {
    pub expanded: bool,
    pub items: Vec<NodeState>,
}

/// View metadata of a single node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeState {
    Object(ObjectState),
    Array(ArrayState),
    #[default]
    Value,
}

impl NodeState {
    fn from_json(value: &Value, path: &mut Path, policy: ExpandPolicy) -> Self {
        match value {
            Value::Object(map) => {
                let expanded = policy.expands(path);
                let mut properties = HashMap::with_capacity(map.len());
                for (key, child) in map {
                    path.push(PathStep::Key(key.clone()));
                    properties.insert(key.clone(), NodeState::from_json(child, path, policy));
                    path.pop();
                }
                NodeState::Object(ObjectState {
                    expanded,
                    keys: map.keys().cloned().collect(),
                    properties,
                })
            }
            Value::Array(items) => {
                let expanded = policy.expands(path);
                let items = items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| {
                        path.push(PathStep::Index(i));
                        let state = NodeState::from_json(child, path, policy);
                        path.pop();
                        state
                    })
                    .collect();
                NodeState::Array(ArrayState { expanded, items })
            }
            _ => NodeState::Value,
        }
    }

    pub fn is_expanded(&self) -> bool {
        match self {
            NodeState::Object(o) => o.expanded,
            NodeState::Array(a) => a.expanded,
            NodeState::Value => false,
        }
    }

    pub fn child(&self, step: &PathStep) -> Option<&NodeState> {
        match self {
            NodeState::Object(o) => o.properties.get(step.as_key().as_ref()),
            NodeState::Array(a) => a.items.get(step.as_index()?),
            NodeState::Value => None,
        }
    }

    fn child_mut(&mut self, step: &PathStep) -> Option<&mut NodeState> {
        match self {
            NodeState::Object(o) => o.properties.get_mut(step.as_key().as_ref()),
            NodeState::Array(a) => a.items.get_mut(step.as_index()?),
            NodeState::Value => None,
        }
    }
}

/// Expanded flags and key order for every node of a document, addressed by
/// the same [`Path`]s as the document itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    root: NodeState,
}

impl ViewState {
    pub fn new(root: NodeState) -> Self {
        Self { root }
    }

    /// Derive a view state whose key order follows the document and whose
    /// expanded flags follow `policy`.
    pub fn from_json(json: &Value, policy: ExpandPolicy) -> Self {
        Self::new(NodeState::from_json(json, &mut Path::new(), policy))
    }

    pub fn root(&self) -> &NodeState {
        &self.root
    }

    pub fn node(&self, path: &[PathStep]) -> Option<&NodeState> {
        path.iter().try_fold(&self.root, |node, step| node.child(step))
    }

    fn node_mut(&mut self, path: &[PathStep]) -> Result<&mut NodeState, ViewStateError> {
        let mut node = &mut self.root;
        for step in path {
            node = node
                .child_mut(step)
                .ok_or_else(|| ViewStateError::NotFound(compile_json_pointer(path)))?;
        }
        Ok(node)
    }

    /// True when the node at `path` is a container flagged as expanded.
    pub fn is_expanded(&self, path: &[PathStep]) -> bool {
        self.node(path).is_some_and(NodeState::is_expanded)
    }

    /// Stored display order of the object at `path`.
    pub fn key_order(&self, path: &[PathStep]) -> Option<&[String]> {
        match self.node(path)? {
            NodeState::Object(o) => Some(&o.keys),
            _ => None,
        }
    }

    pub fn set_expanded(
        &mut self,
        path: &[PathStep],
        expanded: bool,
    ) -> Result<(), ViewStateError> {
        match self.node_mut(path)? {
            NodeState::Object(o) => o.expanded = expanded,
            NodeState::Array(a) => a.expanded = expanded,
            NodeState::Value => {
                return Err(ViewStateError::NotExpandable(compile_json_pointer(path)));
            }
        }
        Ok(())
    }

    /// Expand `path` and every container above it.
    pub fn expand_path(&mut self, path: &[PathStep]) -> Result<(), ViewStateError> {
        for depth in 0..path.len() {
            self.set_expanded(&path[..depth], true)?;
        }
        match self.node(path) {
            Some(NodeState::Value) => Ok(()),
            _ => self.set_expanded(path, true),
        }
    }

    /// Replace the display order of the object at `path`. The new order must
    /// be a permutation of the object's keys.
    pub fn set_key_order(
        &mut self,
        path: &[PathStep],
        keys: Vec<String>,
    ) -> Result<(), ViewStateError> {
        let pointer = compile_json_pointer(path);
        match self.node_mut(path)? {
            NodeState::Object(o) => {
                let same_keys = keys.len() == o.properties.len()
                    && keys.iter().all(|k| o.properties.contains_key(k));
                if !same_keys {
                    return Err(ViewStateError::KeyOrder(pointer));
                }
                o.keys = keys;
                Ok(())
            }
            _ => Err(ViewStateError::NotAnObject(pointer)),
        }
    }
}
