//! Credential storage
//!
//! The completion endpoint needs two keys: the OpenAI key and the OpenPipe
//! gateway key. Both are looked up through a `SecretStore` at request time.
//!
//! - `SecretStore` trait for implementing custom stores
//! - Built-in implementations: `EnvSecretStore`, `MemorySecretStore`, `ChainSecretStore`

mod traits;
mod env_store;
mod memory_store;
mod chain_store;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
pub use chain_store::ChainSecretStore;

/// Credential name of the OpenAI API key
pub const OPENAI_KEY: &str = "openai";

/// Credential name of the OpenPipe gateway key
pub const OPENPIPE_KEY: &str = "openpipe";
