//! Tool registry for the session's tool configuration
//!
//! The ToolRegistry is the central component for:
//! - Holding one definition per catalog tool
//! - Applying configuration changes (enabled flag, fields, options)
//! - Producing the tool specs advertised to the completion endpoint

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::Logger;
use crate::types::ToolSpec;

use super::catalog::{TemperatureUnit, ToolName};
use super::error::{RegistryError, RegistryResult};

/// Tool-specific configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOptions {
    /// The tool has no options
    None,
    /// Weather lookup
    Weather { unit: TemperatureUnit },
}

impl ToolOptions {
    fn defaults_for(tool: ToolName) -> Self {
        if tool.entry().has_unit_option() {
            ToolOptions::Weather {
                unit: TemperatureUnit::default(),
            }
        } else {
            ToolOptions::None
        }
    }

    pub fn unit(&self) -> Option<TemperatureUnit> {
        match self {
            ToolOptions::Weather { unit } => Some(*unit),
            ToolOptions::None => None,
        }
    }
}

/// Current configuration of one catalog tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    name: ToolName,
    /// Whether the tool is advertised to the model
    pub enabled: bool,
    /// Ordered, duplicate-free list of response fields (advisory)
    pub selected_fields: Vec<String>,
    /// Tool-specific options
    pub options: ToolOptions,
}

impl ToolDefinition {
    /// Definition with catalog defaults: enabled, every field selected
    pub fn new(name: ToolName) -> Self {
        Self {
            name,
            enabled: true,
            selected_fields: name
                .entry()
                .default_fields
                .iter()
                .map(|f| f.to_string())
                .collect(),
            options: ToolOptions::defaults_for(name),
        }
    }

    pub fn name(&self) -> ToolName {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.name.entry().description
    }

    /// Fields offered for selection
    pub fn available_fields(&self) -> &'static [&'static str] {
        self.name.entry().default_fields
    }

    /// JSON Schema of the tool's arguments under the current options
    pub fn parameter_schema(&self) -> Value {
        self.name.entry().schema(self.options.unit())
    }

    /// Snapshot as a wire spec
    pub fn to_spec(&self) -> ToolSpec {
        ToolSpec::function(
            self.name.as_str(),
            self.description(),
            self.parameter_schema(),
            self.selected_fields.clone(),
        )
    }
}

/// Partial update for a tool definition; `None` members are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<TemperatureUnit>,
}

impl ToolPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// Startup settings for tools, keyed by name (config file shape)
pub type ToolSettings = BTreeMap<ToolName, ToolPatch>;

fn dedup_preserving_order(fields: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(fields.len());
    for field in fields {
        if !seen.contains(&field) {
            seen.push(field);
        }
    }
    seen
}

/// Registry of the catalog tools and their configuration
pub struct ToolRegistry {
    /// One definition per catalog tool, in catalog order
    tools: Vec<ToolDefinition>,
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Create a registry with catalog defaults
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            tools: ToolName::ALL.into_iter().map(ToolDefinition::new).collect(),
            logger,
        }
    }

    /// Create a registry and apply startup settings
    pub fn with_settings(settings: &ToolSettings, logger: Arc<dyn Logger>) -> RegistryResult<Self> {
        let mut registry = Self::new(logger);
        registry.apply_settings(settings)?;
        Ok(registry)
    }

    /// Tool specs to advertise: enabled tools only, in catalog order
    pub fn list_active(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .filter(|t| t.enabled)
            .map(ToolDefinition::to_spec)
            .collect()
    }

    /// Apply a partial update to a tool
    ///
    /// Fails without touching the registry if the patch sets an option the
    /// tool does not carry.
    pub fn update(&mut self, name: ToolName, patch: ToolPatch) -> RegistryResult<()> {
        let tool = &mut self.tools[name as usize];

        if patch.unit.is_some() && tool.options.unit().is_none() {
            return Err(RegistryError::UnsupportedOption {
                tool: name,
                option: "unit",
            });
        }

        if let Some(enabled) = patch.enabled {
            tool.enabled = enabled;
        }
        if let Some(fields) = patch.fields {
            tool.selected_fields = dedup_preserving_order(fields);
        }
        if let Some(unit) = patch.unit {
            tool.options = ToolOptions::Weather { unit };
        }

        self.logger.debug(&format!(
            "[ToolRegistry] Updated {}: enabled={}, fields={:?}",
            name, tool.enabled, tool.selected_fields
        ));

        Ok(())
    }

    /// Apply a partial update to a tool named by a string
    pub fn update_by_name(&mut self, name: &str, patch: ToolPatch) -> RegistryResult<()> {
        let tool = name.parse::<ToolName>().map_err(|e| {
            self.logger.warn(&format!("[ToolRegistry] Rejected update: {}", e));
            e
        })?;
        self.update(tool, patch)
    }

    /// Apply startup settings, all or nothing
    pub fn apply_settings(&mut self, settings: &ToolSettings) -> RegistryResult<()> {
        let snapshot = self.tools.clone();

        for (name, patch) in settings {
            if let Err(e) = self.update(*name, patch.clone()) {
                self.tools = snapshot;
                return Err(e);
            }
        }

        self.logger.info(&format!(
            "[ToolRegistry] Applied settings for {} tools, {} enabled",
            settings.len(),
            self.enabled_count()
        ));
        Ok(())
    }

    /// Definition of one tool
    pub fn get(&self, name: ToolName) -> &ToolDefinition {
        &self.tools[name as usize]
    }

    /// All definitions, in catalog order
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Number of tools that would be advertised
    pub fn enabled_count(&self) -> usize {
        self.tools.iter().filter(|t| t.enabled).count()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools)
            .finish()
    }
}
