//! Core types for tool-call dispatch
//!
//! This module contains the shared types used by the registry, dispatcher and providers.

mod message;
mod model;
mod tool;

pub use message::{ConversationLog, ConversationTurn, MessageRole};
pub use model::{Model, ModelProvider, ModelSelection, UnknownModel};
pub use tool::{FunctionSpec, ToolCall, ToolInvocation, ToolKind, ToolSpec};
