//! MergeService: orchestrates sources and deserializes to TreefsConfig.

use super::builder_with_defaults;
use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::TreefsConfig;
use config::ConfigError;
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<TreefsConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("treefs.toml");
        std::fs::write(
            &path,
            r#"
[storage]
store_path = "/tmp/treefs-test.db"

[shell]
prompt = "vfs> "
color = false

[logging]
level = "debug"
output = "stderr"
"#,
        )
        .unwrap();

        let config = MergeService::load(Some(&path)).unwrap();
        assert_eq!(
            config.storage.store_path,
            Some(PathBuf::from("/tmp/treefs-test.db"))
        );
        assert_eq!(config.shell.prompt, "vfs> ");
        assert!(!config.shell.color);
        assert!(config.shell.banner);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.output, "stderr");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(MergeService::load(Some(&missing)).is_err());
    }
}
