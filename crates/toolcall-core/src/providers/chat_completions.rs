//! ChatCompletionsProvider - OpenAI-compatible `/chat/completions` client
//!
//! Unprefixed models (`gpt-4o`) are sent to the OpenAI API with the OpenAI
//! key. Prefixed models (`anthropic:...`, `openpipe:...`) are sent to the
//! OpenPipe gateway with the OpenPipe key; the gateway resolves the prefix.
//!
//! Tool specs are posted as-is, including the non-standard `fields` member,
//! which is why this talks HTTP directly instead of going through a
//! provider library.
//!
//! Requests are only routed through OpenPipe, never reported to it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::Logger;
use crate::secrets::{SecretStore, OPENAI_KEY, OPENPIPE_KEY};
use crate::types::{ModelProvider, ToolCall};

use super::error::{ProviderError, ProviderResult};
use super::traits::{AssistantMessage, CompletionRequest, CompletionResponse, Provider};

/// Default OpenAI API base URL
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";

/// Default OpenPipe gateway base URL
pub const DEFAULT_OPENPIPE_BASE: &str = "https://api.openpipe.ai/api/v1";

const PROVIDER_NAME: &str = "chat-completions";

/// Where requests are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    /// Base URL for unprefixed (OpenAI) models
    pub openai_base: String,
    /// Base URL for prefixed models
    pub openpipe_base: String,
    /// Request timeout; `None` keeps the HTTP client's default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            openai_base: DEFAULT_OPENAI_BASE.to_string(),
            openpipe_base: DEFAULT_OPENPIPE_BASE.to_string(),
            timeout_secs: None,
        }
    }
}

/// Base URL and credential chosen for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    pub base_url: &'a str,
    pub credential: &'static str,
}

impl Route<'_> {
    pub fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Completion provider speaking the OpenAI chat-completions protocol
pub struct ChatCompletionsProvider {
    settings: EndpointSettings,
    secrets: Arc<dyn SecretStore>,
    http_client: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl ChatCompletionsProvider {
    /// Create a provider; fails only if the HTTP client cannot be built
    pub fn new(
        settings: EndpointSettings,
        secrets: Arc<dyn SecretStore>,
        logger: Arc<dyn Logger>,
    ) -> ProviderResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            settings,
            secrets,
            http_client: builder.build()?,
            logger,
        })
    }

    pub fn settings(&self) -> &EndpointSettings {
        &self.settings
    }

    /// Pick base URL and credential for a model's provider
    pub fn route(&self, provider: ModelProvider) -> Route<'_> {
        if provider.routes_through_gateway() {
            Route {
                base_url: &self.settings.openpipe_base,
                credential: OPENPIPE_KEY,
            }
        } else {
            Route {
                base_url: &self.settings.openai_base,
                credential: OPENAI_KEY,
            }
        }
    }

    /// Build request headers
    ///
    /// A missing key is not an error here: the request goes out without
    /// `Authorization` and the endpoint reports the problem.
    fn build_headers(&self, credential: &str) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match self.secrets.get(credential) {
            Some(key) => {
                let value = format!("Bearer {}", key).parse::<HeaderValue>().map_err(|e| {
                    ProviderError::Other(format!("Invalid API key header format: {}", e))
                })?;
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                self.logger.warn(&format!(
                    "[ChatCompletions] No '{}' credential found, sending unauthenticated request",
                    credential
                ));
            }
        }

        Ok(headers)
    }

    /// Decode a chat-completions response body
    pub fn parse_response(body: &str) -> ProviderResult<CompletionResponse> {
        let wire: WireResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::invalid_response(PROVIDER_NAME, e.to_string()))?;

        let message = match wire.choices.into_iter().next() {
            Some(choice) => choice.message.into(),
            None => AssistantMessage::empty(),
        };

        Ok(CompletionResponse { message })
    }
}

#[async_trait]
impl Provider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<CompletionResponse> {
        let route = self.route(request.provider());
        let url = route.url();
        let headers = self.build_headers(route.credential)?;

        self.logger.info(&format!(
            "[ChatCompletions] POST {} model={} messages={} tools={}",
            url,
            request.model,
            request.messages.len(),
            request.tools.as_ref().map_or(0, Vec::len)
        ));

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        self.logger.debug(&format!(
            "[ChatCompletions] Received {} ({} bytes)",
            status.as_u16(),
            body.len()
        ));

        if status.is_client_error() || status.is_server_error() {
            self.logger.error(&format!(
                "[ChatCompletions] Unexpected response {}: {}",
                status.as_u16(),
                body
            ));
            return Err(ProviderError::api_error(PROVIDER_NAME, status.as_u16(), body));
        }

        Self::parse_response(&body)
    }
}

impl std::fmt::Debug for ChatCompletionsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsProvider")
            .field("settings", &self.settings)
            .field("secrets", &self.secrets.name())
            .finish()
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: Option<String>,
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    /// Normally a JSON-encoded string; some gateways send the object itself
    #[serde(default)]
    arguments: Value,
}

impl From<WireMessage> for AssistantMessage {
    fn from(message: WireMessage) -> Self {
        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                let arguments = match tc.function.arguments {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                ToolCall {
                    id: tc.id,
                    name: tc.function.name,
                    arguments,
                }
            })
            .collect();

        AssistantMessage {
            content: message.content,
            tool_calls,
        }
    }
}
