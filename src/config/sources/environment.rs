//! Environment variable source.
//!
//! `TREEFS__<SECTION>__<KEY>` maps onto `section.key`; the double underscore
//! keeps these apart from the single-underscore `TREEFS_LOG*` logging
//! overrides, which the config layer never sees.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};

/// Prefix of configuration variables
pub const ENV_PREFIX: &str = "TREEFS";

/// Separator between prefix, section and key
pub const ENV_SEPARATOR: &str = "__";

/// Add environment variable overlay to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true),
    ))
}
