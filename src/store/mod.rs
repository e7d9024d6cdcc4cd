//! Node Store
//!
//! Persisted table of nodes keyed by id, with the `(parent, name)` uniqueness
//! constraint and cascade delete. Every mutation is a single atomic unit: a
//! failed check leaves the store exactly as it was.

pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::types::{NodeId, NodeKind, ROOT_ID, ROOT_NAME};
use serde::{Deserialize, Serialize};

pub use memory::MemoryNodeStore;
pub use persistence::SledNodeStore;

/// A node as seen by callers of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub name: String,
    pub kind: NodeKind,
    /// Only ever set for files
    pub content: Option<String>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Child listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: NodeKind,
}

/// NodeRecord: stored form of a node, including its child ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub name: String,
    pub kind: NodeKind,
    pub content: Option<String>,
    pub children: Vec<NodeId>,
}

impl NodeRecord {
    pub fn root() -> Self {
        Self {
            id: ROOT_ID,
            parent: None,
            name: ROOT_NAME.to_string(),
            kind: NodeKind::Directory,
            content: None,
            children: Vec::new(),
        }
    }

    pub fn new_child(id: NodeId, parent: NodeId, name: &str, kind: NodeKind) -> Self {
        Self {
            id,
            parent: Some(parent),
            name: name.to_string(),
            kind,
            content: None,
            children: Vec::new(),
        }
    }

    pub fn to_node(&self) -> Node {
        Node {
            id: self.id,
            parent: self.parent,
            name: self.name.clone(),
            kind: self.kind,
            content: self.content.clone(),
        }
    }

    pub fn to_entry(&self) -> DirEntry {
        DirEntry {
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

/// Node store interface
///
/// Implementations must be safe to share between threads; each method is
/// atomic with respect to the tree invariants.
pub trait NodeStore: Send + Sync {
    /// Create a child under `parent`. Fails with `DuplicateName` if a sibling
    /// already has `name`, `InvalidParent` if `parent` is not a directory.
    fn create_child(
        &self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
    ) -> Result<NodeId, StorageError>;

    fn get_child(&self, parent: NodeId, name: &str) -> Result<Option<Node>, StorageError>;

    fn list_children(&self, dir: NodeId) -> Result<Vec<DirEntry>, StorageError>;

    fn get_node(&self, id: NodeId) -> Result<Option<Node>, StorageError>;

    /// Overwrite the content of a file node.
    fn set_content(&self, id: NodeId, content: &str) -> Result<(), StorageError>;

    /// Remove `id` and every descendant. Returns the number of removed nodes.
    fn delete_subtree(&self, id: NodeId) -> Result<usize, StorageError>;
}
