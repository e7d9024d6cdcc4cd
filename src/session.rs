//! Shell Session
//!
//! Holds the current directory and dispatches typed commands onto the
//! namespace. The current directory changes only on a successful `cd`.

use crate::error::FsError;
use crate::namespace::Namespace;
use crate::store::DirEntry;
use crate::types::{NodeId, ROOT_ID};
use serde::Serialize;
use tracing::warn;

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { path: Option<String> },
    MakeDirectory { path: String },
    ChangeDirectory { path: String },
    Touch { path: String },
    Cat { path: String },
    Write { path: String, content: String },
    Remove { path: String },
    Pwd,
    Help { topic: Option<String> },
    Exit,
}

/// Plain data produced by a command, rendered by the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOutput {
    Listing { entries: Vec<DirEntry> },
    Content { content: String },
    Path { path: String },
    Created { id: NodeId },
    Removed { count: usize },
    Moved { id: NodeId },
    Help { topic: Option<String> },
    Done,
    Exit,
}

/// Per-shell state: the namespace handle and the current directory
pub struct Session {
    namespace: Namespace,
    current_dir: NodeId,
}

impl Session {
    /// Start a session at the root
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            current_dir: ROOT_ID,
        }
    }

    pub fn current_dir(&self) -> NodeId {
        self.current_dir
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Absolute path of the current directory
    pub fn current_path(&self) -> Result<String, FsError> {
        self.namespace.path_of(self.current_dir)
    }

    /// Execute one command against the current directory
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutput, FsError> {
        let cwd = self.current_dir;
        let ns = &self.namespace;

        match command {
            Command::List { path } => {
                let entries = ns.list(cwd, path.as_deref())?;
                Ok(CommandOutput::Listing { entries })
            }
            Command::MakeDirectory { path } => {
                let id = ns.create_directory(cwd, &path)?;
                Ok(CommandOutput::Created { id })
            }
            Command::ChangeDirectory { path } => {
                let id = ns.change_directory(cwd, &path)?;
                self.current_dir = id;
                Ok(CommandOutput::Moved { id })
            }
            Command::Touch { path } => {
                ns.create_file(cwd, &path)?;
                Ok(CommandOutput::Done)
            }
            Command::Cat { path } => {
                let content = ns.read(cwd, &path)?;
                Ok(CommandOutput::Content { content })
            }
            Command::Write { path, content } => {
                ns.write(cwd, &path, &content)?;
                Ok(CommandOutput::Done)
            }
            Command::Remove { path } => {
                let count = ns.remove(cwd, &path)?;
                Ok(CommandOutput::Removed { count })
            }
            Command::Pwd => {
                let path = ns.path_of(cwd).map_err(|err| match err {
                    FsError::NotFound(_) => {
                        warn!(stale = cwd, "current directory no longer exists");
                        FsError::NotFound(".".to_string())
                    }
                    other => other,
                })?;
                Ok(CommandOutput::Path { path })
            }
            Command::Help { topic } => Ok(CommandOutput::Help { topic }),
            Command::Exit => Ok(CommandOutput::Exit),
        }
    }
}
