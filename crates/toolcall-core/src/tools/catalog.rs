//! The fixed tool catalog
//!
//! Tools are declared as data: one [`CatalogEntry`] per [`ToolName`], holding
//! the description, parameter declarations and default response fields. The
//! JSON Schema sent to the endpoint is built from those declarations plus the
//! tool's current options.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::error::RegistryError;

/// The six tools a session can advertise, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GetCurrentWeather,
    BrowseCompanyItems,
    ContactSupport,
    DraftEmail,
    AnalyzeSqlDatabase,
    SearchJiraCards,
}

impl ToolName {
    /// Every tool, in catalog order
    pub const ALL: [ToolName; 6] = [
        ToolName::GetCurrentWeather,
        ToolName::BrowseCompanyItems,
        ToolName::ContactSupport,
        ToolName::DraftEmail,
        ToolName::AnalyzeSqlDatabase,
        ToolName::SearchJiraCards,
    ];

    /// Function name as advertised to the endpoint
    pub fn as_str(&self) -> &'static str {
        self.entry().name
    }

    /// Static declaration for this tool
    pub fn entry(&self) -> &'static CatalogEntry {
        &CATALOG[*self as usize]
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownTool(s.to_string()))
    }
}

/// Temperature unit option of the weather tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Celsius => "celsius",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            other => Err(format!("Unknown temperature unit: {}", other)),
        }
    }
}

/// How a parameter's schema is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free-form string
    Text,
    /// String restricted to the tool's configured temperature unit
    Unit,
}

/// One declared argument of a tool
#[derive(Debug, Clone, Copy)]
pub struct ParamDecl {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub required: bool,
    pub kind: ParamKind,
}

const fn text(name: &'static str, description: &'static str) -> ParamDecl {
    ParamDecl {
        name,
        description: Some(description),
        required: true,
        kind: ParamKind::Text,
    }
}

/// Static declaration of a catalog tool
#[derive(Debug)]
pub struct CatalogEntry {
    pub tool: ToolName,
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamDecl],
    /// Fields offered for selection, all selected by default
    pub default_fields: &'static [&'static str],
}

impl CatalogEntry {
    /// Whether the tool carries a temperature-unit option
    pub fn has_unit_option(&self) -> bool {
        self.params.iter().any(|p| p.kind == ParamKind::Unit)
    }

    /// Build the parameter schema for the given option values
    pub fn schema(&self, unit: Option<TemperatureUnit>) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            let mut property = match param.kind {
                ParamKind::Text => json!({ "type": "string" }),
                ParamKind::Unit => {
                    let unit = unit.unwrap_or_default();
                    json!({ "type": "string", "enum": [unit.as_str()] })
                }
            };
            if let Some(description) = param.description {
                property["description"] = Value::from(description);
            }
            properties.insert(param.name.to_string(), property);
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Catalog declarations, indexed by `ToolName as usize`
pub static CATALOG: [CatalogEntry; 6] = [
    CatalogEntry {
        tool: ToolName::GetCurrentWeather,
        name: "get_current_weather",
        description: "Get the current weather in a given location",
        params: &[
            text("location", "The city and state, e.g. San Francisco, CA"),
            ParamDecl {
                name: "unit",
                description: None,
                required: false,
                kind: ParamKind::Unit,
            },
        ],
        default_fields: &["location", "temperature", "unit"],
    },
    CatalogEntry {
        tool: ToolName::BrowseCompanyItems,
        name: "browse_company_items",
        description: "Browse Company Items",
        params: &[text("keyword", "The Search Keyword")],
        default_fields: &["keyword"],
    },
    CatalogEntry {
        tool: ToolName::ContactSupport,
        name: "contact_support",
        description: "Contact Company Support",
        params: &[text("message", "Message to send to support")],
        default_fields: &["message"],
    },
    CatalogEntry {
        tool: ToolName::DraftEmail,
        name: "draft_email",
        description: "Draft an email",
        params: &[
            text("to", "The recipient of the email (default to 'User')"),
            text("from", "The sender of the email (default to 'Assistant')"),
            text("subject", "The subject of the email"),
            text("body", "The body of the email"),
        ],
        default_fields: &["to", "from", "subject", "body"],
    },
    CatalogEntry {
        tool: ToolName::AnalyzeSqlDatabase,
        name: "analyze_sql_database",
        description: "Analyze a SQL database",
        params: &[
            text("database", "The name of the database"),
            text("query", "The SQL query to run"),
        ],
        default_fields: &["database", "query"],
    },
    CatalogEntry {
        tool: ToolName::SearchJiraCards,
        name: "search_jira_cards",
        description: "Search through Jira cards",
        params: &[text("query", "The keyword query to run")],
        default_fields: &["query"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indexed_by_tool() {
        for tool in ToolName::ALL {
            assert_eq!(tool.entry().tool, tool);
        }
    }

    #[test]
    fn test_tool_name_parsing() {
        assert_eq!(
            "draft_email".parse::<ToolName>(),
            Ok(ToolName::DraftEmail)
        );
        assert_eq!(
            "nonexistent_tool".parse::<ToolName>(),
            Err(RegistryError::UnknownTool("nonexistent_tool".to_string()))
        );
    }

    #[test]
    fn test_tool_name_serde_matches_function_name() {
        for tool in ToolName::ALL {
            let json = serde_json::to_string(&tool).unwrap();
            assert_eq!(json, format!("\"{}\"", tool.as_str()));
        }
    }

    #[test]
    fn test_weather_schema_embeds_unit() {
        let entry = ToolName::GetCurrentWeather.entry();
        assert!(entry.has_unit_option());

        let schema = entry.schema(Some(TemperatureUnit::Celsius));
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["unit"]["enum"], json!(["celsius"]));
        assert_eq!(
            schema["properties"]["location"]["description"],
            "The city and state, e.g. San Francisco, CA"
        );
        assert_eq!(schema["required"], json!(["location"]));
    }

    #[test]
    fn test_draft_email_requires_everything() {
        let entry = ToolName::DraftEmail.entry();
        assert!(!entry.has_unit_option());
        let schema = entry.schema(None);
        assert_eq!(schema["required"], json!(["to", "from", "subject", "body"]));
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("Celsius".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!("f".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert!("kelvin".parse::<TemperatureUnit>().is_err());
    }
}
