//! Mock provider for testing
//!
//! Provides deterministic, configurable replies without network access and
//! records every request it receives, so tests can assert on exactly what a
//! dispatcher sent.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::traits::{AssistantMessage, CompletionRequest, CompletionResponse, Provider};
use crate::logging::Logger;
use crate::types::ToolCall;

/// Mock response mode
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Echo back the last user message
    #[default]
    Echo,
    /// Return a fixed text reply
    Fixed(String),
    /// Return these tool calls
    ToolCalls(Vec<ToolCall>),
    /// Fail as if the endpoint were unreachable
    Error(String),
    /// Return neither text nor tool calls
    Empty,
}

/// Mock completion provider
pub struct MockProvider {
    /// Used when the queue is empty
    mode: MockMode,
    /// One-shot replies, consumed front to back
    queued: Mutex<VecDeque<MockMode>>,
    requests: Mutex<Vec<CompletionRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    /// Create a provider with a fixed mode
    pub fn with_mode(mode: MockMode, logger: Arc<dyn Logger>) -> Self {
        Self {
            mode,
            queued: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Create an echo provider (echoes back the last user message)
    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Echo, logger)
    }

    /// Create a fixed text provider
    pub fn fixed(response: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Fixed(response.into()), logger)
    }

    /// Create a provider that answers with a single tool call
    pub fn tool_call(
        name: impl Into<String>,
        arguments: impl Into<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self::with_mode(MockMode::ToolCalls(vec![ToolCall::new(name, arguments)]), logger)
    }

    /// Create an error-producing provider
    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Error(message.into()), logger)
    }

    /// Queue a one-shot reply used before falling back to the fixed mode
    pub fn then(self, mode: MockMode) -> Self {
        self.queued.lock().push_back(mode);
        self
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn last_user_message(request: &CompletionRequest) -> String {
        request
            .messages
            .iter()
            .rev()
            .find(|m| m.is_user() && !m.content.is_empty())
            .map(|m| m.content.clone())
            .unwrap_or_else(|| "Hello from MockProvider!".to_string())
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<CompletionResponse> {
        let mode = self
            .queued
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.mode.clone());

        self.logger.debug(&format!(
            "[MockProvider] complete: model={}, mode={:?}",
            request.model, mode
        ));

        let reply = match mode {
            MockMode::Echo => Ok(AssistantMessage::text(format!(
                "Echo: {}",
                Self::last_user_message(&request)
            ))),
            MockMode::Fixed(text) => Ok(AssistantMessage::text(text)),
            MockMode::ToolCalls(calls) => Ok(AssistantMessage::tool_calls(calls)),
            MockMode::Error(message) => Err(ProviderError::Other(format!("Mock error: {}", message))),
            MockMode::Empty => Ok(AssistantMessage::empty()),
        };

        self.requests.lock().push(request);
        reply.map(CompletionResponse::from)
    }
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("mode", &self.mode)
            .field("queued", &self.queued.lock().len())
            .field("requests", &self.request_count())
            .finish()
    }
}
