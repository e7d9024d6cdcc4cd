//! In-memory node store.
//!
//! All state sits behind one `RwLock`; each mutation runs under a single
//! write guard so it is never observable half-applied.

use super::{DirEntry, Node, NodeRecord, NodeStore};
use crate::error::StorageError;
use crate::types::{validate_name, NodeId, NodeKind, ROOT_ID};
use parking_lot::RwLock;
use std::collections::HashMap;

struct MemoryState {
    nodes: HashMap<NodeId, NodeRecord>,
    /// (parent, name) -> child id
    names: HashMap<(NodeId, String), NodeId>,
    next_id: NodeId,
}

/// Node store held entirely in process memory
pub struct MemoryNodeStore {
    state: RwLock<MemoryState>,
}

impl MemoryNodeStore {
    /// Create a store containing only the root directory
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_ID, NodeRecord::root());
        Self {
            state: RwLock::new(MemoryState {
                nodes,
                names: HashMap::new(),
                next_id: ROOT_ID + 1,
            }),
        }
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.state.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().nodes.is_empty()
    }
}

impl Default for MemoryNodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for MemoryNodeStore {
    fn create_child(
        &self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
    ) -> Result<NodeId, StorageError> {
        validate_name(name).map_err(|violation| StorageError::InvalidName {
            name: name.to_string(),
            violation,
        })?;

        let mut state = self.state.write();
        match state.nodes.get(&parent) {
            Some(record) if record.kind.is_directory() => {}
            _ => return Err(StorageError::InvalidParent(parent)),
        }
        let key = (parent, name.to_string());
        if state.names.contains_key(&key) {
            return Err(StorageError::DuplicateName {
                parent,
                name: name.to_string(),
            });
        }

        let id = state.next_id;
        state.next_id += 1;
        state
            .nodes
            .insert(id, NodeRecord::new_child(id, parent, name, kind));
        state.names.insert(key, id);
        if let Some(parent_record) = state.nodes.get_mut(&parent) {
            parent_record.children.push(id);
        }
        Ok(id)
    }

    fn get_child(&self, parent: NodeId, name: &str) -> Result<Option<Node>, StorageError> {
        let state = self.state.read();
        Ok(state
            .names
            .get(&(parent, name.to_string()))
            .and_then(|id| state.nodes.get(id))
            .map(NodeRecord::to_node))
    }

    fn list_children(&self, dir: NodeId) -> Result<Vec<DirEntry>, StorageError> {
        let state = self.state.read();
        let record = state.nodes.get(&dir).ok_or(StorageError::NotFound(dir))?;
        if !record.kind.is_directory() {
            return Err(StorageError::InvalidParent(dir));
        }
        Ok(record
            .children
            .iter()
            .filter_map(|id| state.nodes.get(id))
            .map(NodeRecord::to_entry)
            .collect())
    }

    fn get_node(&self, id: NodeId) -> Result<Option<Node>, StorageError> {
        Ok(self.state.read().nodes.get(&id).map(NodeRecord::to_node))
    }

    fn set_content(&self, id: NodeId, content: &str) -> Result<(), StorageError> {
        let mut state = self.state.write();
        let record = state.nodes.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        if !record.kind.is_file() {
            return Err(StorageError::NotAFile(id));
        }
        record.content = Some(content.to_string());
        Ok(())
    }

    fn delete_subtree(&self, id: NodeId) -> Result<usize, StorageError> {
        if id == ROOT_ID {
            return Err(StorageError::CannotRemoveRoot);
        }
        let mut state = self.state.write();
        let parent = match state.nodes.get(&id) {
            Some(record) => record.parent,
            None => return Err(StorageError::NotFound(id)),
        };

        let mut removed = 0;
        let mut worklist = vec![id];
        while let Some(current) = worklist.pop() {
            if let Some(record) = state.nodes.remove(&current) {
                if let Some(owner) = record.parent {
                    state.names.remove(&(owner, record.name));
                }
                worklist.extend(record.children);
                removed += 1;
            }
        }

        if let Some(parent_record) = parent.and_then(|p| state.nodes.get_mut(&p)) {
            parent_record.children.retain(|child| *child != id);
        }
        Ok(removed)
    }
}
