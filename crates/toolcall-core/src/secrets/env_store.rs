//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Mapping from credential names to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("openai", vec!["OPENAI_API_KEY"]);
    // Gateway key: routes prefixed models and records requests
    m.insert("openpipe", vec!["OPENPIPE_API_KEY"]);
    m
});

/// Secret store that reads from environment variables
///
/// Read-only. Credential names map to variables:
/// - `openai` → `OPENAI_API_KEY`
/// - `openpipe` → `OPENPIPE_API_KEY`
///
/// Other keys are tried verbatim, then as `<KEY>_API_KEY`.
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Get the environment variable names for a credential
    pub fn env_vars_for(key: &str) -> Option<&'static [&'static str]> {
        ENV_VAR_MAP.get(key.to_lowercase().as_str()).map(|v| v.as_slice())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = non_empty_var(key) {
            return Some(value);
        }

        if let Some(vars) = Self::env_vars_for(key) {
            if let Some(value) = vars.iter().find_map(|v| non_empty_var(v)) {
                return Some(value);
            }
        }

        non_empty_var(&format!("{}_API_KEY", key.to_uppercase()))
    }

    fn store(&self, _key: &str, _value: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_store_read_only() {
        let store = EnvSecretStore::new();
        assert_eq!(store.name(), "env");
        assert!(matches!(store.store("test", "value"), Err(SecretStoreError::ReadOnly)));
    }

    #[test]
    fn test_env_store_get_direct() {
        env::set_var("TOOLCALL_TEST_SECRET_12345", "test_value");

        let store = EnvSecretStore::new();
        assert_eq!(
            store.get("TOOLCALL_TEST_SECRET_12345"),
            Some("test_value".to_string())
        );

        env::remove_var("TOOLCALL_TEST_SECRET_12345");
    }

    #[test]
    fn test_env_store_get_mapped() {
        env::set_var("OPENPIPE_API_KEY", "opk-test-12345");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("openpipe"), Some("opk-test-12345".to_string()));
        assert_eq!(store.get("OpenPipe"), Some("opk-test-12345".to_string()));
        assert!(store.has("OPENPIPE_API_KEY"));

        env::remove_var("OPENPIPE_API_KEY");
    }

    #[test]
    fn test_env_store_suffix_fallback() {
        env::set_var("TOOLCALLTEST_API_KEY", "suffix");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("toolcalltest"), Some("suffix".to_string()));

        env::remove_var("TOOLCALLTEST_API_KEY");
    }

    #[test]
    fn test_env_store_empty_values_ignored() {
        env::set_var("TOOLCALL_EMPTY_SECRET", "");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("TOOLCALL_EMPTY_SECRET"), None);

        env::remove_var("TOOLCALL_EMPTY_SECRET");
    }

    #[test]
    fn test_env_vars_for() {
        assert_eq!(EnvSecretStore::env_vars_for("openai"), Some(&["OPENAI_API_KEY"][..]));
        assert_eq!(EnvSecretStore::env_vars_for("gemini"), None);
    }
}
