//! Configuration
//!
//! Layered configuration built with the `config` crate. Sources, lowest
//! precedence first: built-in defaults, the global file
//! `$XDG_CONFIG_HOME/treefs/config.toml`, an explicit `--config` file and
//! `TREEFS__<SECTION>__<KEY>` environment variables. CLI flags are applied
//! on top by the caller.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage::StorageConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Default prompt template; `{id}` is the current directory id
pub const DEFAULT_PROMPT: &str = "fs (id:{id})$ ";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreefsConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

/// Presentation settings of the shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Prompt template, `{id}` and `{path}` are substituted
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Colour directory names in listings
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the welcome banner when an interactive session starts
    #[serde(default = "default_true")]
    pub banner: bool,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            color: default_true(),
            banner: default_true(),
        }
    }
}
