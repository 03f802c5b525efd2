//! Registry error types

use thiserror::Error;

use super::catalog::ToolName;

/// Errors that can occur while reconfiguring the tool registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Name is not one of the catalog tools
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Patch sets an option the tool does not carry
    #[error("Tool {tool} has no '{option}' option")]
    UnsupportedOption { tool: ToolName, option: &'static str },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
