//! Toolcall Core
//!
//! Tool-call configuration and dispatch for chat-completion endpoints.
//! This crate holds everything except the terminal front end: the fixed
//! catalog of mock tools, the per-session registry that decides which tools
//! are advertised, the dispatcher that sends the conversation and classifies
//! the reply, and the endpoint providers behind it.
//!
//! ## Dispatch
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use toolcall_core::{DispatchResult, MockProvider, NoOpLogger, Session, ToolName, ToolPatch};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::echo(NoOpLogger::shared()));
//! let mut session = Session::new(provider, NoOpLogger::shared());
//!
//! session
//!     .registry_mut()
//!     .update(ToolName::DraftEmail, ToolPatch::new().enabled(false))?;
//!
//! match session.submit("What's the weather in Tokyo?").await? {
//!     DispatchResult::Text(text) => println!("{}", text),
//!     DispatchResult::ToolCall { call, .. } => println!("Tool Call: {}", call.name),
//! }
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod providers;
pub mod tools;
pub mod dispatcher;
pub mod session;

// Re-export commonly used types
pub use types::{
    ConversationLog, ConversationTurn, MessageRole,
    Model, ModelProvider, ModelSelection, UnknownModel,
    ToolCall, ToolInvocation, ToolSpec,
};

pub use secrets::{
    SecretStore, SecretStoreError, SecretStoreResult,
    EnvSecretStore, MemorySecretStore, ChainSecretStore,
    OPENAI_KEY, OPENPIPE_KEY,
};

pub use logging::{Logger, SharedLogger, LogLevel, NoOpLogger, ConsoleLogger};

pub use config::{ConfigFile, ConfigProvider, ConfigError, FileConfigProvider, MemoryConfigProvider};

pub use providers::{
    Provider, ProviderError, ProviderResult,
    ChatCompletionsProvider, EndpointSettings, MockProvider, MockMode,
    create_provider,
};

pub use tools::{
    RegistryError, TemperatureUnit, ToolDefinition, ToolName, ToolPatch, ToolRegistry, ToolSettings,
};

pub use dispatcher::{DispatchError, DispatchResult, Dispatcher};

pub use session::Session;
