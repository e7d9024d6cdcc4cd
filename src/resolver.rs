//! Path Resolver
//!
//! Maps `(start directory, path string)` onto the persisted tree. Resolution
//! is stateless: every call walks the store afresh, so edits made by another
//! session are visible on the next command.

use crate::error::StorageError;
use crate::store::NodeStore;
use crate::types::{NodeId, NodeKind, ROOT_ID, SEPARATOR};
use tracing::trace;

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path names an existing node
    Resolved { id: NodeId, kind: NodeKind },
    /// Everything but the last component exists and is a directory; the last
    /// component is free and may be created under `parent`
    ResolvableParent { parent: NodeId, leaf: String },
    /// The path cannot name a node
    Invalid(InvalidReason),
}

/// Why a path failed to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// A non-final component does not exist
    MissingComponent(String),
    /// A non-final component is a file
    ThroughFile(String),
}

impl Resolution {
    /// Id of the resolved node, if any
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Resolution::Resolved { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// A single path component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Current,
    Parent,
    Name(&'a str),
}

/// Split a path into navigation segments. Empty components (from leading,
/// trailing or doubled separators) carry no meaning and are dropped.
fn segments(path: &str) -> Vec<Segment<'_>> {
    path.split(SEPARATOR)
        .filter(|part| !part.is_empty())
        .map(|part| match part {
            "." => Segment::Current,
            ".." => Segment::Parent,
            name => Segment::Name(name),
        })
        .collect()
}

/// Resolves paths against a node store
pub struct PathResolver<'a> {
    store: &'a dyn NodeStore,
}

impl<'a> PathResolver<'a> {
    pub fn new(store: &'a dyn NodeStore) -> Self {
        Self { store }
    }

    /// Resolve `path` starting from directory `start`.
    ///
    /// Absolute paths start at the root. The empty path resolves to `start`
    /// itself and the bare separator short-circuits to the root.
    pub fn resolve(&self, start: NodeId, path: &str) -> Result<Resolution, StorageError> {
        if path.is_empty() {
            return Ok(Resolution::Resolved {
                id: start,
                kind: NodeKind::Directory,
            });
        }
        if path.len() == SEPARATOR.len_utf8() && path.starts_with(SEPARATOR) {
            return Ok(Resolution::Resolved {
                id: ROOT_ID,
                kind: NodeKind::Directory,
            });
        }

        let mut current = if path.starts_with(SEPARATOR) {
            ROOT_ID
        } else {
            start
        };
        let mut current_kind = NodeKind::Directory;

        let parts = segments(path);
        let last = parts.len().saturating_sub(1);
        for (index, segment) in parts.iter().enumerate() {
            let is_final = index == last;
            match *segment {
                Segment::Current => {}
                Segment::Parent => {
                    current = self.parent_of(current)?;
                    current_kind = NodeKind::Directory;
                }
                Segment::Name(name) => match self.store.get_child(current, name)? {
                    Some(child) if child.kind.is_directory() || is_final => {
                        current = child.id;
                        current_kind = child.kind;
                    }
                    Some(_) => {
                        trace!(path, name, "resolution passes through a file");
                        return Ok(Resolution::Invalid(InvalidReason::ThroughFile(
                            name.to_string(),
                        )));
                    }
                    None if is_final => {
                        return Ok(Resolution::ResolvableParent {
                            parent: current,
                            leaf: name.to_string(),
                        });
                    }
                    None => {
                        trace!(path, name, "missing intermediate component");
                        return Ok(Resolution::Invalid(InvalidReason::MissingComponent(
                            name.to_string(),
                        )));
                    }
                },
            }
        }

        Ok(Resolution::Resolved {
            id: current,
            kind: current_kind,
        })
    }

    /// Parent of `id`. The root is its own parent, and a node that vanished
    /// underneath us ascends straight to the root.
    fn parent_of(&self, id: NodeId) -> Result<NodeId, StorageError> {
        if id == ROOT_ID {
            return Ok(ROOT_ID);
        }
        Ok(self
            .store
            .get_node(id)?
            .and_then(|node| node.parent)
            .unwrap_or(ROOT_ID))
    }
}
