//! Interactive session
//!
//! A `Session` is the single owner of everything one chat needs: the tool
//! registry, the model selection, and the dispatcher with its conversation
//! log. It is created once, receives any number of submissions, and is
//! dropped with its state.

use std::sync::Arc;

use crate::config::ConfigFile;
use crate::dispatcher::{DispatchOutcome, DispatchResult, Dispatcher};
use crate::logging::Logger;
use crate::providers::Provider;
use crate::tools::{RegistryResult, ToolRegistry};
use crate::types::{ConversationLog, ModelSelection};

/// One interactive chat session
pub struct Session {
    registry: ToolRegistry,
    model: ModelSelection,
    dispatcher: Dispatcher,
}

impl Session {
    /// Create a session with catalog defaults and the default model
    pub fn new(provider: Arc<dyn Provider>, logger: Arc<dyn Logger>) -> Self {
        Self {
            registry: ToolRegistry::new(logger.clone()),
            model: ModelSelection::default(),
            dispatcher: Dispatcher::new(provider, logger),
        }
    }

    /// Create a session from startup configuration
    pub fn from_config(
        config: &ConfigFile,
        provider: Arc<dyn Provider>,
        logger: Arc<dyn Logger>,
    ) -> RegistryResult<Self> {
        let registry = ToolRegistry::with_settings(&config.tools, logger.clone())?;
        logger.info(&format!(
            "[Session] created: model={}, enabled tools={}",
            config.model(),
            registry.enabled_count()
        ));
        Ok(Self {
            registry,
            model: ModelSelection::new(config.model()),
            dispatcher: Dispatcher::new(provider, logger),
        })
    }

    /// Submit one user message with the current tool and model configuration
    pub async fn submit(&mut self, text: &str) -> DispatchOutcome<DispatchResult> {
        self.dispatcher.submit(&self.registry, &self.model, text).await
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Mutable access for the configuration surface
    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    pub fn model(&self) -> &ModelSelection {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ModelSelection {
        &mut self.model
    }

    /// The conversation so far
    pub fn log(&self) -> &ConversationLog {
        self.dispatcher.log()
    }

    pub fn provider_name(&self) -> &str {
        self.dispatcher.provider().name()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("model", &self.model.id())
            .field("registry", &self.registry)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
