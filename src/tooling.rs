//! Tooling & Integration Layer
//!
//! The command-line entry points that wire configuration, logging and the
//! store together for the `treefs` binary.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
