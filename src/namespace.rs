//! Namespace Operations
//!
//! The core entry points consumed by the shell. Each operation resolves its
//! path against the store, then acts. Operations never print; they return
//! plain data or an [`FsError`] for the caller to render.

use crate::error::{FsError, StorageError};
use crate::resolver::{InvalidReason, PathResolver, Resolution};
use crate::store::{DirEntry, NodeStore};
use crate::types::{validate_name, NodeId, NodeKind, ROOT_ID, SEPARATOR};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Namespace operations over a shared node store
#[derive(Clone)]
pub struct Namespace {
    store: Arc<dyn NodeStore>,
}

impl Namespace {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn NodeStore> {
        &self.store
    }

    /// Resolve `path` from `start` without acting on it
    pub fn resolve(&self, start: NodeId, path: &str) -> Result<Resolution, FsError> {
        let resolution = PathResolver::new(self.store.as_ref()).resolve(start, path)?;
        debug!(start, path, ?resolution, "resolved path");
        Ok(resolution)
    }

    /// Resolve to an existing node or fail with the lookup error vocabulary
    fn lookup(&self, start: NodeId, path: &str) -> Result<(NodeId, NodeKind), FsError> {
        match self.resolve(start, path)? {
            Resolution::Resolved { id, kind } => Ok((id, kind)),
            Resolution::ResolvableParent { .. }
            | Resolution::Invalid(InvalidReason::MissingComponent(_)) => {
                Err(FsError::NotFound(path.to_string()))
            }
            Resolution::Invalid(InvalidReason::ThroughFile(name)) => {
                Err(FsError::NotADirectory(name))
            }
        }
    }

    /// List a directory, sorted by name. `None` lists `start` itself.
    pub fn list(&self, start: NodeId, path: Option<&str>) -> Result<Vec<DirEntry>, FsError> {
        let path = path.unwrap_or("");
        let (id, kind) = self.lookup(start, path)?;
        if !kind.is_directory() {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        let mut entries = self.store.list_children(id).map_err(|err| match err {
            StorageError::NotFound(_) if path.is_empty() => FsError::NotFound(".".to_string()),
            StorageError::NotFound(_) => FsError::NotFound(path.to_string()),
            other => other.into(),
        })?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Create a directory at `path`
    pub fn create_directory(&self, start: NodeId, path: &str) -> Result<NodeId, FsError> {
        let resolution = self.resolve(start, path)?;
        let (parent, leaf) = creation_point(path, resolution)?;
        let id = self
            .store
            .create_child(parent, &leaf, NodeKind::Directory)
            .map_err(|err| map_create_error(err, path))?;
        info!(id, parent, name = %leaf, "created directory");
        Ok(id)
    }

    /// Create an empty file at `path`. Creating a path that already exists
    /// is a silent no-op, including when another session wins the race.
    pub fn create_file(&self, start: NodeId, path: &str) -> Result<(), FsError> {
        let (parent, leaf) = match self.resolve(start, path)? {
            Resolution::Resolved { id, .. } => {
                debug!(id, path, "touch on existing node");
                return Ok(());
            }
            other => creation_point(path, other)?,
        };
        match self.store.create_child(parent, &leaf, NodeKind::File) {
            Ok(id) => {
                info!(id, parent, name = %leaf, "created file");
                Ok(())
            }
            Err(StorageError::DuplicateName { .. }) => Ok(()),
            Err(err) => Err(map_create_error(err, path)),
        }
    }

    /// Directory that `path` names, or an error; `start` is untouched either way
    pub fn change_directory(&self, start: NodeId, path: &str) -> Result<NodeId, FsError> {
        let (id, kind) = self.lookup(start, path)?;
        if !kind.is_directory() {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        Ok(id)
    }

    /// Content of the file at `path`; unset content reads as empty
    pub fn read(&self, start: NodeId, path: &str) -> Result<String, FsError> {
        let (id, kind) = self.lookup(start, path)?;
        if kind.is_directory() {
            return Err(FsError::IsADirectory(path.to_string()));
        }
        let node = self
            .store
            .get_node(id)?
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        Ok(node.content.unwrap_or_default())
    }

    /// Replace the content of the file at `path`
    pub fn write(&self, start: NodeId, path: &str, content: &str) -> Result<(), FsError> {
        let (id, kind) = self.lookup(start, path)?;
        if kind.is_directory() {
            return Err(FsError::IsADirectory(path.to_string()));
        }
        self.store.set_content(id, content).map_err(|err| match err {
            StorageError::NotFound(_) => FsError::NotFound(path.to_string()),
            StorageError::NotAFile(_) => FsError::IsADirectory(path.to_string()),
            other => other.into(),
        })?;
        debug!(id, bytes = content.len(), "wrote file");
        Ok(())
    }

    /// Remove the node at `path` together with its subtree
    pub fn remove(&self, start: NodeId, path: &str) -> Result<usize, FsError> {
        let (id, _) = self.lookup(start, path)?;
        if id == ROOT_ID {
            return Err(FsError::CannotRemoveRoot);
        }
        let removed = self.store.delete_subtree(id).map_err(|err| match err {
            StorageError::NotFound(_) => FsError::NotFound(path.to_string()),
            other => other.into(),
        })?;
        info!(id, removed, path, "removed subtree");
        Ok(removed)
    }

    /// Absolute path of `id`.
    ///
    /// A missing ancestor (deleted mid-walk) ends the walk as if the root had
    /// been reached; a repeated id does the same.
    pub fn path_of(&self, id: NodeId) -> Result<String, FsError> {
        let mut node = self
            .store
            .get_node(id)?
            .ok_or_else(|| FsError::NotFound(format!("#{}", id)))?;

        let mut names = Vec::new();
        let mut seen = HashSet::new();
        while let Some(parent) = node.parent {
            if !seen.insert(node.id) {
                break;
            }
            names.push(node.name);
            node = match self.store.get_node(parent)? {
                Some(next) => next,
                None => break,
            };
        }

        names.reverse();
        let mut path = String::from(SEPARATOR);
        path.push_str(&names.join(&SEPARATOR.to_string()));
        Ok(path)
    }
}

/// Where a new node named by `path` would go
fn creation_point(path: &str, resolution: Resolution) -> Result<(NodeId, String), FsError> {
    if path.is_empty() {
        return Err(FsError::InvalidPath(path.to_string()));
    }
    match resolution {
        Resolution::Resolved { .. } => Err(FsError::AlreadyExists(path.to_string())),
        Resolution::Invalid(_) => Err(FsError::InvalidPath(path.to_string())),
        Resolution::ResolvableParent { parent, leaf } => {
            validate_name(&leaf).map_err(|_| FsError::InvalidPath(path.to_string()))?;
            Ok((parent, leaf))
        }
    }
}

fn map_create_error(err: StorageError, path: &str) -> FsError {
    match err {
        StorageError::DuplicateName { .. } => FsError::DuplicateName(path.to_string()),
        StorageError::InvalidName { .. } => FsError::InvalidPath(path.to_string()),
        StorageError::InvalidParent(_) => FsError::InvalidParent(path.to_string()),
        other => other.into(),
    }
}
