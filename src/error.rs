use thiserror::Error;

use crate::client::ApiError;

/// Crate-level errors.
///
/// These never represent an orchestrator-visible outcome. Anything the
/// orchestrator should see as a failure is a `ProgressEvent::Failed`; a
/// `ProviderError` is a defect or an environment problem that escapes the
/// handler boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unhandled remote error during {operation}: {source}")]
    UnhandledRemoteError {
        operation: String,
        #[source]
        source: ApiError,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Operation {action} did not reach a terminal status after {invocations} invocations")]
    InvocationLimitExceeded { action: String, invocations: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<::config::ConfigError> for ProviderError {
    fn from(err: ::config::ConfigError) -> Self {
        ProviderError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
