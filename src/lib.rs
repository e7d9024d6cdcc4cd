//! Treefs: Hierarchical Virtual Filesystem
//!
//! A virtual filesystem of directories and text files held in an embedded
//! store as a flat table of nodes with parent pointers. Paths are resolved
//! against that table, and a line shell drives the operations while tracking
//! a current directory.

pub mod config;
pub mod error;
pub mod logging;
pub mod namespace;
pub mod resolver;
pub mod session;
pub mod shell;
pub mod store;
pub mod tooling;
pub mod types;
