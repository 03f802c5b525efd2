//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator for advertised tools; endpoints only accept `"function"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Function,
}

/// Tool specification in the shape the completion endpoint expects
///
/// ```json
/// {"type": "function", "function": {"name": "...", "description": "...", "parameters": {...}, "fields": [...]}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: ToolKind,
    pub function: FunctionSpec,
}

/// The function half of a [`ToolSpec`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the arguments
    pub parameters: Value,
    /// Response fields the tool should populate (advisory)
    #[serde(default)]
    pub fields: Vec<String>,
}

impl ToolSpec {
    /// Create a function tool spec
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        fields: Vec<String>,
    ) -> Self {
        Self {
            kind: ToolKind::Function,
            function: FunctionSpec {
                name: name.into(),
                description: description.into(),
                parameters,
                fields,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Tool call as returned by the endpoint, arguments still encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier, when the endpoint provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the tool being called
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Set the call identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Decode the argument payload
    pub fn parse_arguments(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.arguments)
    }
}

/// A tool call whose arguments have been decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the tool being called
    pub name: String,
    /// Decoded arguments
    pub arguments: Value,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_spec_wire_shape() {
        let spec = ToolSpec::function(
            "search_jira_cards",
            "Search through Jira cards",
            json!({"type": "object", "properties": {}, "required": []}),
            vec!["query".to_string()],
        );

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "search_jira_cards");
        assert_eq!(value["function"]["fields"], json!(["query"]));
        assert_eq!(spec.name(), "search_jira_cards");
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new("get_current_weather", r#"{"location":"Tokyo"}"#).with_id("call_1");
        assert_eq!(call.id.as_deref(), Some("call_1"));
        assert_eq!(call.parse_arguments().unwrap(), json!({"location": "Tokyo"}));

        let broken = ToolCall::new("get_current_weather", "{location: Tokyo");
        assert!(broken.parse_arguments().is_err());
    }
}
