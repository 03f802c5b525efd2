//! Core traits and types for credential storage

use thiserror::Error;

/// Errors that can occur during secret store operations
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Store is read-only")]
    ReadOnly,

    #[error("Store error: {0}")]
    Other(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Trait for credential sources
///
/// Implementations:
/// - Environment variables (`EnvSecretStore`)
/// - In-memory values, e.g. keys passed on the command line (`MemorySecretStore`)
/// - Chained for fallback behavior (`ChainSecretStore`)
///
/// # Example
///
/// ```
/// use toolcall_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// // store.get("openpipe") will check OPENPIPE_API_KEY
/// ```
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Retrieve a secret by key
    ///
    /// The key can be a provider name (`"openai"`, `"openpipe"`) or a direct
    /// variable name (`"OPENAI_API_KEY"`).
    fn get(&self, key: &str) -> Option<String>;

    /// Store a secret
    ///
    /// Returns `Err(SecretStoreError::ReadOnly)` if the store doesn't support writing.
    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()>;

    /// Check if a secret exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
