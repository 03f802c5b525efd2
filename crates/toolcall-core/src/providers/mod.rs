//! Completion endpoint providers
//!
//! ## Architecture
//!
//! The dispatcher only sees the `Provider` trait: one non-streamed
//! `CompletionRequest` in, one `CompletionResponse` out.
//!
//! - `ChatCompletionsProvider` speaks the OpenAI-compatible protocol over
//!   reqwest and routes by model prefix (OpenAI vs. the OpenPipe gateway).
//! - `MockProvider` answers deterministically and records requests; used by
//!   tests and offline runs.

mod traits;
mod error;
mod chat_completions;
mod mock;

pub use traits::{AssistantMessage, CompletionRequest, CompletionResponse, Provider};
pub use error::{ProviderError, ProviderResult};
pub use chat_completions::{
    ChatCompletionsProvider, EndpointSettings, Route, DEFAULT_OPENAI_BASE, DEFAULT_OPENPIPE_BASE,
};
pub use mock::{MockMode, MockProvider};

use std::sync::Arc;

use crate::logging::Logger;
use crate::secrets::SecretStore;

/// Create a provider by kind
///
/// `"mock"` gives an echoing `MockProvider`; `"http"` (also accepted as
/// `"openai"` or `"openpipe"`) gives a `ChatCompletionsProvider`.
pub fn create_provider(
    kind: &str,
    settings: &EndpointSettings,
    secrets: Arc<dyn SecretStore>,
    logger: Arc<dyn Logger>,
) -> ProviderResult<Arc<dyn Provider>> {
    match kind.to_lowercase().as_str() {
        "mock" => Ok(Arc::new(MockProvider::echo(logger))),
        "http" | "openai" | "openpipe" => Ok(Arc::new(ChatCompletionsProvider::new(
            settings.clone(),
            secrets,
            logger,
        )?)),
        other => Err(ProviderError::Other(format!("Unknown provider kind: {}", other))),
    }
}

/// List all provider kinds accepted by `create_provider`
pub fn supported_providers() -> Vec<&'static str> {
    vec!["http", "mock"]
}
