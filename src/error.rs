//! Error types for the store, the namespace operations and the front end.

use crate::types::{NameViolation, NodeId};
use thiserror::Error;

/// Failures reported by a [`NodeStore`](crate::store::NodeStore).
///
/// Constraint violations leave the store unchanged. `Backend`, `Corrupt` and
/// `IoError` are faults of the storage engine itself.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("an entry named '{name}' already exists in node {parent}")]
    DuplicateName { parent: NodeId, name: String },

    #[error("node {0} is not a directory")]
    InvalidParent(NodeId),

    #[error("invalid name '{name}': {violation}")]
    InvalidName {
        name: String,
        violation: NameViolation,
    },

    #[error("node {0} is not a file")]
    NotAFile(NodeId),

    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("the root directory cannot be removed")]
    CannotRemoveRoot,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Namespace error vocabulary surfaced to the shell.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("No such file or directory '{0}'")]
    NotFound(String),

    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("An item named '{0}' already exists here")]
    DuplicateName(String),

    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    #[error("'{0}' is a directory")]
    IsADirectory(String),

    #[error("'{0}' is not a file")]
    NotAFile(String),

    #[error("Invalid path '{0}'")]
    InvalidPath(String),

    #[error("Cannot remove the root directory")]
    CannotRemoveRoot,

    #[error("Parent of '{0}' is not a directory")]
    InvalidParent(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl FsError {
    /// Stable machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            FsError::NotFound(_) => "not_found",
            FsError::AlreadyExists(_) => "already_exists",
            FsError::DuplicateName(_) => "duplicate_name",
            FsError::NotADirectory(_) => "not_a_directory",
            FsError::IsADirectory(_) => "is_a_directory",
            FsError::NotAFile(_) => "not_a_file",
            FsError::InvalidPath(_) => "invalid_path",
            FsError::CannotRemoveRoot => "cannot_remove_root",
            FsError::InvalidParent(_) => "invalid_parent",
            FsError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<StorageError> for FsError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateName { name, .. } => FsError::DuplicateName(name),
            StorageError::InvalidParent(id) => FsError::InvalidParent(format!("#{}", id)),
            StorageError::InvalidName { name, .. } => FsError::InvalidPath(name),
            StorageError::NotAFile(id) => FsError::NotAFile(format!("#{}", id)),
            StorageError::NotFound(id) => FsError::NotFound(format!("#{}", id)),
            StorageError::CannotRemoveRoot => FsError::CannotRemoveRoot,
            other @ (StorageError::Backend(_)
            | StorageError::Corrupt(_)
            | StorageError::IoError(_)) => FsError::StoreUnavailable(other.to_string()),
        }
    }
}

/// Front-end errors: configuration, logging setup and wrapped namespace failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A one-shot command failed; carries the already rendered error
    #[error("{0}")]
    CommandFailed(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Fs(err.into())
    }
}
