//! # Orchestration Types
//!
//! Core types shared by every handler: the progress event returned from each
//! invocation, the callback context threaded between invocations, and the
//! closed error taxonomy surfaced to the orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::models::ResourceModel;

/// Canonical failure codes surfaced to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    InvalidRequest,
    InternalFailure,
    ServiceInternalError,
    Throttling,
    NotFound,
    AlreadyExists,
    NotStabilized,
    GeneralServiceException,
}

impl HandlerErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "InvalidRequest",
            Self::InternalFailure => "InternalFailure",
            Self::ServiceInternalError => "ServiceInternalError",
            Self::Throttling => "Throttling",
            Self::NotFound => "NotFound",
            Self::AlreadyExists => "AlreadyExists",
            Self::NotStabilized => "NotStabilized",
            Self::GeneralServiceException => "GeneralServiceException",
        }
    }
}

impl fmt::Display for HandlerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HandlerErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InvalidRequest" => Ok(Self::InvalidRequest),
            "InternalFailure" => Ok(Self::InternalFailure),
            "ServiceInternalError" => Ok(Self::ServiceInternalError),
            "Throttling" => Ok(Self::Throttling),
            "NotFound" => Ok(Self::NotFound),
            "AlreadyExists" => Ok(Self::AlreadyExists),
            "NotStabilized" => Ok(Self::NotStabilized),
            "GeneralServiceException" => Ok(Self::GeneralServiceException),
            _ => Err(format!("Invalid handler error code: {s}")),
        }
    }
}

/// State carried between invocations of one logical operation
///
/// Created empty on the first invocation and discarded once the operation is
/// terminal. Everything else is re-derived by querying the control plane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackContext {
    /// The mutating call has been issued and must not be repeated
    #[serde(default)]
    pub mutation_issued: bool,

    /// Stabilization budget left, set once stabilization begins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_timeout_seconds: Option<u64>,

    /// Number of stabilization probes performed so far
    #[serde(default)]
    pub stabilization_attempts: u32,
}

impl CallbackContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining budget, or the full timeout when stabilization has not begun
    pub fn remaining_timeout(&self, full_timeout: Duration) -> Duration {
        self.remaining_timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(full_timeout)
    }
}

/// Details of a failed invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetails {
    pub error_code: HandlerErrorCode,
    pub message: String,
    /// Hint that the orchestrator's own backoff may retry the operation
    pub retryable: bool,
}

/// Terminal payload of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessPayload {
    /// Resulting description of the resource
    Resource(ResourceModel),
    /// The resource no longer exists
    Deleted,
    /// One page of list results
    Page {
        resource_models: Vec<ResourceModel>,
        next_token: Option<String>,
    },
}

/// Result of one handler invocation
///
/// Exactly one of the three holds. `InProgress` always carries a positive
/// delay and the context to pass back on the next attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    Success(SuccessPayload),
    InProgress {
        resource_model: ResourceModel,
        callback_context: CallbackContext,
        callback_delay_seconds: u32,
    },
    Failed(FailureDetails),
}

impl ProgressEvent {
    pub fn success(model: ResourceModel) -> Self {
        Self::Success(SuccessPayload::Resource(model))
    }

    pub fn deleted() -> Self {
        Self::Success(SuccessPayload::Deleted)
    }

    pub fn page(resource_models: Vec<ResourceModel>, next_token: Option<String>) -> Self {
        Self::Success(SuccessPayload::Page {
            resource_models,
            next_token,
        })
    }

    /// In-progress event; a zero delay is raised to one second
    pub fn in_progress(
        resource_model: ResourceModel,
        callback_context: CallbackContext,
        delay: Duration,
    ) -> Self {
        let seconds = u32::try_from(delay.as_secs()).unwrap_or(u32::MAX).max(1);
        Self::InProgress {
            resource_model,
            callback_context,
            callback_delay_seconds: seconds,
        }
    }

    pub fn failed(error_code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self::Failed(FailureDetails {
            error_code,
            message: message.into(),
            retryable: false,
        })
    }

    pub fn failed_retryable(error_code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self::Failed(FailureDetails {
            error_code,
            message: message.into(),
            retryable: true,
        })
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error_code(&self) -> Option<HandlerErrorCode> {
        match self {
            Self::Failed(details) => Some(details.error_code),
            _ => None,
        }
    }

    /// Resulting model of a resource-producing success
    pub fn resource_model(&self) -> Option<&ResourceModel> {
        match self {
            Self::Success(SuccessPayload::Resource(model)) => Some(model),
            Self::InProgress { resource_model, .. } => Some(resource_model),
            _ => None,
        }
    }

    /// Status label used in logs and on the wire
    pub fn status(&self) -> OperationStatus {
        match self {
            Self::Success(_) => OperationStatus::Success,
            Self::InProgress { .. } => OperationStatus::InProgress,
            Self::Failed(_) => OperationStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    InProgress,
    Failed,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}
