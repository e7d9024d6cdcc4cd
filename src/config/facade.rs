//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::TreefsConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and the environment.
    pub fn load() -> Result<TreefsConfig, ConfigError> {
        MergeService::load(None)
    }

    /// Load configuration with an explicit file layered over the global one.
    pub fn load_from_file(path: &Path) -> Result<TreefsConfig, ConfigError> {
        MergeService::load(Some(path))
    }
}
