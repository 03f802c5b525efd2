//! Configuration provider trait

use super::file::ConfigFile;

/// Configuration provider abstraction
///
/// Implementations:
/// - `FileConfigProvider`: Reads from a YAML file (~/.config/toolcall/config.yaml)
/// - `MemoryConfigProvider`: In-memory for testing
///
/// Configuration is read once at session start; the session never writes back.
pub trait ConfigProvider: Send + Sync {
    /// Load the configuration, falling back to defaults when there is none
    fn load(&self) -> ConfigResult<ConfigFile>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
