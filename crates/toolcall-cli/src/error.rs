//! CLI error types

use thiserror::Error;

use toolcall_core::{ConfigError, ProviderError, RegistryError};

use crate::command::CommandError;

/// Errors surfaced by the terminal front end
///
/// Startup errors end the process; errors from a single command are printed
/// and the loop continues.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
