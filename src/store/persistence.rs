//! Sled-backed node store.
//!
//! Layout:
//! - `nodes`: node id (big-endian) -> bincode `NodeRecord`
//! - `names`: parent id (big-endian) ++ name bytes -> child id
//! - `meta`:  `next_id` -> next id to allocate
//!
//! Each mutation is one multi-tree transaction, so the uniqueness index, the
//! parent's child list and the id counter always move together.

use super::{DirEntry, Node, NodeRecord, NodeStore};
use crate::error::StorageError;
use crate::types::{validate_name, NodeId, NodeKind, ROOT_ID};
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionError,
    TransactionalTree,
};
use sled::Transactional;
use std::path::Path;
use tracing::{debug, info};

const NODES_TREE: &str = "nodes";
const NAMES_TREE: &str = "names";
const META_TREE: &str = "meta";
const NEXT_ID_KEY: &[u8] = b"next_id";

/// Node store persisted in a sled database
pub struct SledNodeStore {
    db: sled::Db,
    nodes: sled::Tree,
    names: sled::Tree,
    meta: sled::Tree,
}

impl SledNodeStore {
    /// Open (or create) a store at `path`, initialising the root if needed
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path).map_err(|e| {
            StorageError::Backend(format!(
                "Failed to open sled database at {}: {}",
                path.display(),
                e
            ))
        })?;
        let store = Self::from_db(db)?;
        info!(path = %path.display(), "opened node store");
        Ok(store)
    }

    /// Wrap an already opened database
    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let nodes = db.open_tree(NODES_TREE).map_err(backend)?;
        let names = db.open_tree(NAMES_TREE).map_err(backend)?;
        let meta = db.open_tree(META_TREE).map_err(backend)?;
        let store = Self {
            db,
            nodes,
            names,
            meta,
        };
        store.ensure_root()?;
        Ok(store)
    }

    /// Insert the root and the id counter unless they already exist
    fn ensure_root(&self) -> Result<(), StorageError> {
        let result: Result<bool, TransactionError<StorageError>> = (&self.nodes, &self.meta)
            .transaction(|(nodes, meta)| {
                let mut created = false;
                if nodes.get(node_key(ROOT_ID))?.is_none() {
                    put_record(nodes, &NodeRecord::root())?;
                    created = true;
                }
                if meta.get(NEXT_ID_KEY)?.is_none() {
                    meta.insert(NEXT_ID_KEY, node_key(ROOT_ID + 1))?;
                }
                Ok(created)
            });
        let created = result.map_err(unwrap_tx)?;
        if created {
            info!("initialized root directory");
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush().map_err(backend)?;
        Ok(())
    }

    fn read_record(&self, id: NodeId) -> Result<Option<NodeRecord>, StorageError> {
        match self.nodes.get(node_key(id)).map_err(backend)? {
            Some(bytes) => decode_record(&bytes).map(Some),
            None => Ok(None),
        }
    }
}

impl NodeStore for SledNodeStore {
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

        let result: Result<NodeId, TransactionError<StorageError>> =
            (&self.nodes, &self.names, &self.meta).transaction(|(nodes, names, meta)| {
                let mut parent_record = match get_record(nodes, parent)? {
                    Some(record) if record.kind.is_directory() => record,
                    _ => return abort(StorageError::InvalidParent(parent)),
                };
                let index_key = name_key(parent, name);
                if names.get(&index_key)?.is_some() {
                    return abort(StorageError::DuplicateName {
                        parent,
                        name: name.to_string(),
                    });
                }

                let id = match meta.get(NEXT_ID_KEY)? {
                    Some(bytes) => decode_id(&bytes).or_else(abort)?,
                    None => ROOT_ID + 1,
                };
                meta.insert(NEXT_ID_KEY, node_key(id + 1))?;

                put_record(nodes, &NodeRecord::new_child(id, parent, name, kind))?;
                names.insert(index_key, node_key(id))?;
                parent_record.children.push(id);
                put_record(nodes, &parent_record)?;
                Ok(id)
            });
        let id = result.map_err(unwrap_tx)?;

        self.flush()?;
        debug!(id, parent, name, %kind, "created node");
        Ok(id)
    }

    fn get_child(&self, parent: NodeId, name: &str) -> Result<Option<Node>, StorageError> {
        let id = match self.names.get(name_key(parent, name)).map_err(backend)? {
            Some(bytes) => decode_id(&bytes)?,
            None => return Ok(None),
        };
        Ok(self.read_record(id)?.map(|record| record.to_node()))
    }

    fn list_children(&self, dir: NodeId) -> Result<Vec<DirEntry>, StorageError> {
        let record = self.read_record(dir)?.ok_or(StorageError::NotFound(dir))?;
        if !record.kind.is_directory() {
            return Err(StorageError::InvalidParent(dir));
        }
        let mut entries = Vec::with_capacity(record.children.len());
        for child in &record.children {
            // A child removed between the two reads is simply skipped.
            if let Some(child_record) = self.read_record(*child)? {
                entries.push(child_record.to_entry());
            }
        }
        Ok(entries)
    }

    fn get_node(&self, id: NodeId) -> Result<Option<Node>, StorageError> {
        Ok(self.read_record(id)?.map(|record| record.to_node()))
    }

    fn set_content(&self, id: NodeId, content: &str) -> Result<(), StorageError> {
        let result: Result<(), TransactionError<StorageError>> =
            self.nodes.transaction(|nodes| {
                let mut record = match get_record(nodes, id)? {
                    Some(record) => record,
                    None => return abort(StorageError::NotFound(id)),
                };
                if !record.kind.is_file() {
                    return abort(StorageError::NotAFile(id));
                }
                record.content = Some(content.to_string());
                put_record(nodes, &record)
            });
        result.map_err(unwrap_tx)?;
        self.flush()
    }

    fn delete_subtree(&self, id: NodeId) -> Result<usize, StorageError> {
        if id == ROOT_ID {
            return Err(StorageError::CannotRemoveRoot);
        }

        let result: Result<usize, TransactionError<StorageError>> = (&self.nodes, &self.names)
            .transaction(|(nodes, names)| {
                let target = match get_record(nodes, id)? {
                    Some(record) => record,
                    None => return abort(StorageError::NotFound(id)),
                };

                let mut removed = 0usize;
                let mut worklist = vec![id];
                while let Some(current) = worklist.pop() {
                    let record = match get_record(nodes, current)? {
                        Some(record) => record,
                        None => continue,
                    };
                    nodes.remove(node_key(current))?;
                    if let Some(owner) = record.parent {
                        names.remove(name_key(owner, &record.name))?;
                    }
                    worklist.extend(record.children);
                    removed += 1;
                }

                if let Some(parent) = target.parent {
                    if let Some(mut parent_record) = get_record(nodes, parent)? {
                        parent_record.children.retain(|child| *child != id);
                        put_record(nodes, &parent_record)?;
                    }
                }
                Ok(removed)
            });
        let removed = result.map_err(unwrap_tx)?;

        self.flush()?;
        debug!(id, removed, "deleted subtree");
        Ok(removed)
    }
}

fn node_key(id: NodeId) -> Vec<u8> {
    id.to_be_bytes().to_vec()
}

fn name_key(parent: NodeId, name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + name.len());
    key.extend_from_slice(&parent.to_be_bytes());
    key.extend_from_slice(name.as_bytes());
    key
}

fn decode_id(bytes: &[u8]) -> Result<NodeId, StorageError> {
    let raw: [u8; 8] = bytes
        .try_into()
        .map_err(|_| StorageError::Corrupt(format!("id has {} bytes, expected 8", bytes.len())))?;
    Ok(NodeId::from_be_bytes(raw))
}

fn decode_record(bytes: &[u8]) -> Result<NodeRecord, StorageError> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Corrupt(e.to_string()))
}

fn get_record(
    tree: &TransactionalTree,
    id: NodeId,
) -> ConflictableTransactionResult<Option<NodeRecord>, StorageError> {
    match tree.get(node_key(id))? {
        Some(bytes) => decode_record(&bytes).map(Some).or_else(abort),
        None => Ok(None),
    }
}

fn put_record(
    tree: &TransactionalTree,
    record: &NodeRecord,
) -> ConflictableTransactionResult<(), StorageError> {
    let bytes = bincode::serialize(record)
        .map_err(|e| ConflictableTransactionError::Abort(StorageError::Corrupt(e.to_string())))?;
    tree.insert(node_key(record.id), bytes)?;
    Ok(())
}

fn abort<T>(err: StorageError) -> ConflictableTransactionResult<T, StorageError> {
    Err(ConflictableTransactionError::Abort(err))
}

fn unwrap_tx(err: TransactionError<StorageError>) -> StorageError {
    match err {
        TransactionError::Abort(err) => err,
        TransactionError::Storage(err) => backend(err),
    }
}

fn backend(err: sled::Error) -> StorageError {
    StorageError::Backend(err.to_string())
}
