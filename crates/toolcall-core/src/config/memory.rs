//! In-memory configuration provider

use parking_lot::RwLock;

use super::file::ConfigFile;
use super::traits::{ConfigProvider, ConfigResult};

/// In-memory configuration provider for testing
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    config: RwLock<ConfigFile>,
}

impl MemoryConfigProvider {
    /// Create a provider holding the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding the given configuration
    pub fn with_config(config: ConfigFile) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the held configuration
    pub fn set_config(&self, config: ConfigFile) {
        *self.config.write() = config;
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn load(&self) -> ConfigResult<ConfigFile> {
        Ok(self.config.read().clone())
    }
}
