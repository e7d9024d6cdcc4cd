//! Core types for the treefs namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: stable identifier of a node, allocated from a monotonic counter
pub type NodeId = u64;

/// Id of the root directory. Fixed for the lifetime of a store.
pub const ROOT_ID: NodeId = 1;

/// Path separator, also the name of the root node
pub const SEPARATOR: char = '/';

/// Name given to the root node
pub const ROOT_NAME: &str = "/";

/// Node kind enumeration. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    pub fn is_directory(self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    pub fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => f.write_str("file"),
            NodeKind::Directory => f.write_str("directory"),
        }
    }
}

/// Why a candidate node name was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    Empty,
    ContainsSeparator,
    Reserved,
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameViolation::Empty => f.write_str("name is empty"),
            NameViolation::ContainsSeparator => {
                write!(f, "name contains the separator '{}'", SEPARATOR)
            }
            NameViolation::Reserved => f.write_str("name is reserved"),
        }
    }
}

/// Check that `name` can be stored as a single node name.
///
/// `.` and `..` are navigation tokens and the separator is the root's name,
/// so none of them may ever be created as a real node.
pub fn validate_name(name: &str) -> Result<(), NameViolation> {
    if name.is_empty() {
        return Err(NameViolation::Empty);
    }
    if name.contains(SEPARATOR) {
        return Err(NameViolation::ContainsSeparator);
    }
    if name == "." || name == ".." {
        return Err(NameViolation::Reserved);
    }
    Ok(())
}
