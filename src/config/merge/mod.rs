//! Merge policy: the base builder every load starts from.

pub mod service;

use super::DEFAULT_PROMPT;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the built-in defaults (lowest precedence).
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("shell.prompt", DEFAULT_PROMPT)?
        .set_default("shell.color", true)?
        .set_default("shell.banner", true)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")
}
