//! Dispatcher error types

use thiserror::Error;

use crate::providers::ProviderError;

/// Errors returned by a submission
///
/// In every case the user turn stays in the log and no assistant turn is
/// added. Nothing is retried.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The endpoint could not be reached or answered with an error
    #[error("Endpoint unavailable: {0}")]
    EndpointUnavailable(#[source] ProviderError),

    /// A tool call carried arguments that are not valid JSON
    #[error("Malformed arguments for tool call '{name}': {source}")]
    MalformedToolArguments {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The reply had neither text nor tool calls
    #[error("Endpoint returned neither text nor a tool call")]
    EmptyResponse,
}

impl From<ProviderError> for DispatchError {
    fn from(err: ProviderError) -> Self {
        Self::EndpointUnavailable(err)
    }
}

pub type DispatchOutcome<T> = Result<T, DispatchError>;
