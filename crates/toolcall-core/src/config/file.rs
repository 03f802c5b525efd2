//! File-based configuration provider (YAML)
//!
//! Supports user-level (~/.config/toolcall/config.yaml) and workspace-level (.config/toolcall/config.yaml) config.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::providers::EndpointSettings;
use crate::tools::ToolSettings;
use crate::types::Model;
use super::traits::{ConfigError, ConfigProvider, ConfigResult};

/// Configuration file structure
///
/// ```yaml
/// model: gpt-4o
/// endpoint:
///   openpipe_base: https://api.openpipe.ai/api/v1
///   timeout_secs: 60
/// tools:
///   get_current_weather: { unit: celsius, fields: [location] }
///   draft_email: { enabled: false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Initial model; defaults to gpt-4o
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,

    /// Endpoint base URLs and timeout
    #[serde(default)]
    pub endpoint: EndpointSettings,

    /// Per-tool startup settings
    #[serde(default)]
    pub tools: ToolSettings,
}

impl ConfigFile {
    /// Parse a YAML document; `source` names it in errors
    pub fn from_yaml(content: &str, source: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            path: source.to_string(),
            message: e.to_string(),
        })
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Other(format!("Failed to serialize YAML: {}", e)))
    }

    /// Configured model or the default
    pub fn model(&self) -> Model {
        self.model.unwrap_or_default()
    }
}

/// Config level (user, workspace, or an explicit file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/toolcall/config.yaml)
    User,
    /// Workspace-level config (.config/toolcall/config.yaml in workspace root)
    Workspace,
    /// A path given on the command line
    Explicit,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
            ConfigLevel::Explicit => "explicit",
        }
    }
}

/// File-based configuration provider
///
/// Reads configuration from a YAML file. A missing file is not an error; it
/// yields the default configuration.
///
/// # Example
///
/// ```no_run
/// use toolcall_core::config::{ConfigProvider, FileConfigProvider};
///
/// // Workspace config wins when present, otherwise the user config
/// let provider = FileConfigProvider::discover(".");
/// let config = provider.load().unwrap_or_default();
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    level: ConfigLevel,
    cache: RwLock<Option<ConfigFile>>,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// Create a provider for a path given explicitly
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ConfigLevel::Explicit)
    }

    /// Create a user-level config provider (~/.config/toolcall/config.yaml)
    pub fn user() -> Self {
        // XDG config directory on Linux, ~/Library/Application Support on macOS
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        let path = config_dir.join("toolcall").join("config.yaml");
        Self::new(path, ConfigLevel::User)
    }

    /// Create a workspace-level config provider (.config/toolcall/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("toolcall").join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    /// Workspace config if it exists, otherwise the user config
    pub fn discover(workspace_root: impl AsRef<Path>) -> Self {
        let workspace = Self::workspace(workspace_root);
        if workspace.exists() {
            workspace
        } else {
            Self::user()
        }
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the config level
    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> ConfigResult<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        ConfigFile::from_yaml(&content, &self.path.display().to_string())
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<ConfigFile> {
        let config = self.read()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self) -> ConfigResult<ConfigFile> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }
        self.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{TemperatureUnit, ToolName, ToolPatch};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::explicit(dir.path().join("config.yaml"));

        assert!(!provider.exists());
        let config = provider.load().unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.model(), Model::Gpt4o);
        assert_eq!(config.endpoint, EndpointSettings::default());
    }

    #[test]
    fn test_yaml_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            r#"
model: "openpipe:llama3-1-8b"
endpoint:
  timeout_secs: 30
tools:
  get_current_weather: { unit: celsius, fields: [location] }
  draft_email:
    enabled: false
"#,
        )
        .unwrap();

        let config = FileConfigProvider::explicit(&path).load().unwrap();
        assert_eq!(config.model(), Model::Llama31_8b);
        assert_eq!(config.endpoint.timeout_secs, Some(30));
        assert_eq!(config.endpoint.openai_base, crate::providers::DEFAULT_OPENAI_BASE);
        assert_eq!(
            config.tools.get(&ToolName::GetCurrentWeather),
            Some(&ToolPatch::new().unit(TemperatureUnit::Celsius).fields(["location"]))
        );
        assert_eq!(config.tools.get(&ToolName::DraftEmail), Some(&ToolPatch::new().enabled(false)));
        assert!(config.tools.get(&ToolName::ContactSupport).is_none());
    }

    #[test]
    fn test_unknown_tool_or_model_is_a_parse_error() {
        let err = ConfigFile::from_yaml("tools:\n  order_pizza: { enabled: true }\n", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == "inline"));

        let err = ConfigFile::from_yaml("model: gpt-5-turbo-max\n", "inline").unwrap_err();
        assert!(err.to_string().contains("gpt-5-turbo-max"));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ConfigFile::from_yaml("  \n", "blank").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_cache_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let provider = FileConfigProvider::explicit(&path);

        fs::write(&path, "model: gpt-4\n").unwrap();
        assert_eq!(provider.load().unwrap().model(), Model::Gpt4);

        fs::write(&path, "model: gpt-4o-mini\n").unwrap();
        // still cached
        assert_eq!(provider.load().unwrap().model(), Model::Gpt4);
        assert_eq!(provider.reload().unwrap().model(), Model::Gpt4oMini);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = ConfigFile::default();
        config.model = Some(Model::Claude3Opus);
        config.tools.insert(ToolName::SearchJiraCards, ToolPatch::new().enabled(false));

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("anthropic:claude-3-opus-20240229"));
        assert!(yaml.contains("search_jira_cards"));
        assert_eq!(ConfigFile::from_yaml(&yaml, "round-trip").unwrap(), config);
    }

    #[test]
    fn test_workspace_discovery() {
        let dir = tempdir().unwrap();
        let workspace = FileConfigProvider::workspace(dir.path());
        assert_eq!(workspace.level(), ConfigLevel::Workspace);
        assert!(workspace.path().ends_with(".config/toolcall/config.yaml"));

        fs::create_dir_all(workspace.path().parent().unwrap()).unwrap();
        fs::write(workspace.path(), "model: gpt-4\n").unwrap();

        let found = FileConfigProvider::discover(dir.path());
        assert_eq!(found.level(), ConfigLevel::Workspace);
        assert_eq!(found.load().unwrap().model(), Model::Gpt4);
    }
}
