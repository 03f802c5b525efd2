//! Configuration provider abstractions
//!
//! Supports multiple configuration sources:
//! - `FileConfigProvider`: YAML file-based (user/workspace level or explicit path)
//! - `MemoryConfigProvider`: In-memory for testing

mod traits;
mod memory;
mod file;

pub use traits::{ConfigProvider, ConfigError, ConfigResult};
pub use memory::MemoryConfigProvider;
pub use file::{FileConfigProvider, ConfigFile, ConfigLevel};
