//! CLI Tooling
//!
//! Command-line interface of the `treefs` binary. Global options select the
//! store and logging; subcommands pick the front end.

use crate::config::{ConfigLoader, TreefsConfig};
use crate::error::ApiError;
use crate::logging::LogOverrides;
use crate::namespace::Namespace;
use crate::session::Session;
use crate::shell::render::OutputFormat;
use crate::shell::{run_interactive, run_script, Shell};
use crate::store::{MemoryNodeStore, NodeStore, SledNodeStore};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Treefs CLI - hierarchical virtual filesystem shell
#[derive(Parser, Debug)]
#[command(name = "treefs")]
#[command(about = "Hierarchical virtual filesystem backed by an embedded store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Store directory (overrides storage.store_path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep the filesystem in memory; nothing is persisted
    #[arg(long, global = true, conflicts_with = "store")]
    pub ephemeral: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive shell (default)
    Shell,
    /// Run a single shell line from the root directory
    Exec {
        /// The line to run, e.g. `ls /docs`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
        /// Output format (text or json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run every line of a script file (`-` reads stdin), stopping at `exit`
    Run {
        /// Script path
        script: PathBuf,
    },
}

impl Cli {
    /// Subcommand to run, `shell` when none was given
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Shell)
    }

    /// Load configuration and apply the store and colour flags on top of it
    pub fn load_config(&self) -> Result<TreefsConfig, ApiError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut TreefsConfig) {
        if let Some(store) = &self.store {
            config.storage.store_path = Some(store.clone());
        }
        if self.no_color {
            config.shell.color = false;
            config.logging.color = false;
        }
    }

    /// Logging flags, applied above the environment when logging starts
    pub fn log_overrides(&self) -> LogOverrides {
        LogOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

/// CLI context: resolved configuration plus the opened namespace
pub struct CliContext {
    config: TreefsConfig,
    namespace: Namespace,
    store_path: Option<PathBuf>,
}

impl CliContext {
    /// Open the store selected by `config`, or an in-memory one when `ephemeral`
    pub fn new(config: TreefsConfig, ephemeral: bool) -> Result<Self, ApiError> {
        let (store, store_path): (Arc<dyn NodeStore>, Option<PathBuf>) = if ephemeral {
            info!("using in-memory store");
            (Arc::new(MemoryNodeStore::new()), None)
        } else {
            let path = config.storage.resolve_store_path()?;
            let store = SledNodeStore::open(&path)?;
            (Arc::new(store), Some(path))
        };

        Ok(Self {
            config,
            namespace: Namespace::new(store),
            store_path,
        })
    }

    pub fn config(&self) -> &TreefsConfig {
        &self.config
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Location of the persistent store; `None` for an ephemeral one
    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    /// A fresh shell whose session starts at the root
    pub fn shell(&self, format: OutputFormat) -> Shell {
        Shell::new(
            Session::new(self.namespace.clone()),
            self.config.shell.clone(),
        )
        .with_format(format)
    }

    /// Execute a CLI command, returning text for the caller to print.
    ///
    /// A failing `exec` line returns [`ApiError::CommandFailed`] carrying the
    /// rendered error so the caller can print it and exit non-zero.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Shell => {
                let mut shell = self.shell(OutputFormat::Text);
                run_interactive(&mut shell)?;
                Ok(String::new())
            }
            Commands::Exec { line, format } => {
                let mut shell = self.shell(*format);
                let outcome = shell.execute_line(&line.join(" "));
                if outcome.is_failure() {
                    return Err(ApiError::CommandFailed(outcome.text().to_string()));
                }
                Ok(outcome.text().to_string())
            }
            Commands::Run { script } => {
                let mut shell = self.shell(OutputFormat::Text);
                let mut stdout = std::io::stdout();
                let executed = if script.as_os_str() == "-" {
                    run_script(&mut shell, std::io::stdin().lock(), &mut stdout)?
                } else {
                    let file = File::open(script)?;
                    run_script(&mut shell, BufReader::new(file), &mut stdout)?
                };
                info!(script = %script.display(), executed, "script completed");
                Ok(String::new())
            }
        }
    }
}
