//! # Orchestrator Wire Protocol
//!
//! JSON envelope the orchestrator sends for each attempt and the response the
//! provider returns. Field names follow the orchestrator's camelCase
//! convention; absent fields are omitted.

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::handlers::{Action, Provider};
use crate::models::{ResourceHandlerRequest, ResourceModel};
use crate::orchestration::types::{
    CallbackContext, FailureDetails, HandlerErrorCode, OperationStatus, ProgressEvent,
    SuccessPayload,
};

/// One attempt as sent by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest {
    pub action: Action,
    pub request: ResourceHandlerRequest,
    /// Context returned by the previous attempt, absent on the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,
}

/// Wire form of a [`ProgressEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_delay_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<ResourceModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<ResourceModel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl HandlerResponse {
    fn with_status(status: OperationStatus) -> Self {
        Self {
            status,
            error_code: None,
            message: None,
            callback_context: None,
            callback_delay_seconds: None,
            resource_model: None,
            resource_models: None,
            next_token: None,
            retryable: None,
        }
    }
}

impl From<ProgressEvent> for HandlerResponse {
    fn from(event: ProgressEvent) -> Self {
        let mut response = Self::with_status(event.status());
        match event {
            ProgressEvent::Success(SuccessPayload::Resource(model)) => {
                response.resource_model = Some(model);
            }
            ProgressEvent::Success(SuccessPayload::Deleted) => {}
            ProgressEvent::Success(SuccessPayload::Page {
                resource_models,
                next_token,
            }) => {
                response.resource_models = Some(resource_models);
                response.next_token = next_token;
            }
            ProgressEvent::InProgress {
                resource_model,
                callback_context,
                callback_delay_seconds,
            } => {
                response.resource_model = Some(resource_model);
                response.callback_context = Some(callback_context);
                response.callback_delay_seconds = Some(callback_delay_seconds);
            }
            ProgressEvent::Failed(FailureDetails {
                error_code,
                message,
                retryable,
            }) => {
                response.error_code = Some(error_code);
                response.message = Some(message);
                response.retryable = Some(retryable);
            }
        }
        response
    }
}

/// A defect escaping the handler boundary is reported as an internal failure
impl From<&ProviderError> for HandlerResponse {
    fn from(error: &ProviderError) -> Self {
        Self {
            error_code: Some(HandlerErrorCode::InternalFailure),
            message: Some(error.to_string()),
            retryable: Some(false),
            ..Self::with_status(OperationStatus::Failed)
        }
    }
}

impl Provider {
    /// Handle one JSON-encoded attempt and return the JSON-encoded response
    ///
    /// Only a malformed envelope is an `Err`; handler defects are folded into
    /// a `FAILED` response.
    pub async fn handle_json(&self, payload: &str) -> Result<String> {
        let envelope: HandlerRequest = serde_json::from_str(payload)?;
        let response = match self
            .handle(
                envelope.action,
                envelope.request,
                envelope.callback_context.unwrap_or_default(),
            )
            .await
        {
            Ok(event) => HandlerResponse::from(event),
            Err(error) => HandlerResponse::from(&error),
        };
        Ok(serde_json::to_string(&response)?)
    }
}
