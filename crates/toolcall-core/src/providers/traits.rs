//! Provider trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{ConversationTurn, ModelProvider, ToolCall, ToolSpec};
use super::error::ProviderResult;

/// One non-streamed completion request
///
/// Serializes to the endpoint body. `tools` is left out entirely when no
/// tool is advertised; some endpoints treat an empty list differently from
/// an absent one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Model identifier as used by the endpoint
    pub model: String,
    /// Full conversation history
    pub messages: Vec<ConversationTurn>,
    /// Tools the model may call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
    /// Always false; the dispatcher needs the whole reply at once
    pub stream: bool,
}

impl CompletionRequest {
    /// Create a request without tools
    pub fn new(model: impl Into<String>, messages: Vec<ConversationTurn>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
            stream: false,
        }
    }

    /// Attach tools; an empty list leaves the field absent
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }

    /// Provider derived from the model identifier's prefix
    pub fn provider(&self) -> ModelProvider {
        ModelProvider::from_model_id(&self.model)
    }
}

/// The assistant message of a completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// Plain text content, if any
    #[serde(default)]
    pub content: Option<String>,
    /// Structured tool invocations, in the order the endpoint listed them
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantMessage {
    /// A plain text reply
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// A reply carrying tool calls
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls: calls,
        }
    }

    /// A reply with neither text nor tool calls
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Result of a completion call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub message: AssistantMessage,
}

impl From<AssistantMessage> for CompletionResponse {
    fn from(message: AssistantMessage) -> Self {
        Self { message }
    }
}

/// Provider trait for completion endpoints
///
/// Each call is a single request/response exchange; implementations do not
/// retry.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "chat-completions", "mock")
    fn name(&self) -> &str;

    /// Run one completion
    async fn complete(&self, request: CompletionRequest) -> ProviderResult<CompletionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_empty_tools() {
        let request = CompletionRequest::new("gpt-4o", vec![ConversationTurn::user("hi")])
            .with_tools(vec![]);
        assert!(request.tools.is_none());

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("tools").is_none());
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["messages"], json!([{"role": "user", "content": "hi"}]));
    }

    #[test]
    fn test_request_with_tools() {
        let spec = ToolSpec::function("contact_support", "Contact Company Support", json!({}), vec![]);
        let request = CompletionRequest::new("openpipe:llama3-1-8b", vec![]).with_tools(vec![spec]);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["tools"][0]["function"]["name"], "contact_support");
        assert_eq!(request.provider(), ModelProvider::OpenPipe);
    }
}
