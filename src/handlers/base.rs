//! # Shared Handler Plumbing
//!
//! Collaborators every workflow needs (control-plane client, error classifier,
//! stabilizer) and the steps several workflows share: the read workflow that
//! create and update finish with, and the conversion of remote and
//! stabilization failures into progress events.

use std::sync::Arc;
use tracing::{info, warn};

use crate::client::{ApiError, ControlPlaneClient};
use crate::constants::operations;
use crate::error::Result;
use crate::models::{ResourceHandlerRequest, ResourceModel};
use crate::orchestration::error_classifier::{ErrorClassifier, ErrorContext};
use crate::orchestration::stabilizer::{StabilizationError, Stabilizer};
use crate::orchestration::types::{HandlerErrorCode, ProgressEvent};
use crate::translator;

/// Collaborators shared by all handlers of one provider
#[derive(Clone)]
pub struct HandlerBase {
    pub client: Arc<dyn ControlPlaneClient>,
    pub classifier: Arc<dyn ErrorClassifier>,
    pub stabilizer: Stabilizer,
    pub type_name: String,
}

impl std::fmt::Debug for HandlerBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerBase")
            .field("client", &self.client.client_name())
            .field("classifier", &self.classifier.classifier_name())
            .field("stabilizer", &self.stabilizer)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl HandlerBase {
    pub fn new(
        client: Arc<dyn ControlPlaneClient>,
        classifier: Arc<dyn ErrorClassifier>,
        stabilizer: Stabilizer,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            classifier,
            stabilizer,
            type_name: type_name.into(),
        }
    }

    pub fn error_context(
        &self,
        request: &ResourceHandlerRequest,
        operation: &str,
        model: &ResourceModel,
    ) -> ErrorContext {
        ErrorContext::new(request.client_request_token.clone(), operation)
            .with_resource_identifier(model.arn.as_deref())
    }

    /// Route a remote failure through the classifier
    pub fn classify(
        &self,
        error: &ApiError,
        request: &ResourceHandlerRequest,
        operation: &str,
        model: &ResourceModel,
    ) -> Result<ProgressEvent> {
        let context = self.error_context(request, operation, model);
        let classification = self.classifier.classify_error(error, &context)?;
        Ok(classification.into())
    }

    /// Failure for a resource that does not exist, tagged with the correlation token
    pub fn not_found(&self, request: &ResourceHandlerRequest, identifier: &str) -> ProgressEvent {
        ProgressEvent::failed(
            HandlerErrorCode::NotFound,
            tag_message(
                request,
                &format!(
                    "Resource of type '{}' with identifier '{}' was not found.",
                    self.type_name, identifier
                ),
            ),
        )
    }

    /// Failure for a duplicate create
    pub fn already_exists(&self, request: &ResourceHandlerRequest, identifier: &str) -> ProgressEvent {
        ProgressEvent::failed(
            HandlerErrorCode::AlreadyExists,
            tag_message(
                request,
                &format!(
                    "Resource of type '{}' with identifier '{}' already exists.",
                    self.type_name, identifier
                ),
            ),
        )
    }

    pub fn not_stabilized(&self, request: &ResourceHandlerRequest, identifier: &str) -> ProgressEvent {
        ProgressEvent::failed(
            HandlerErrorCode::NotStabilized,
            tag_message(
                request,
                &format!(
                    "Resource of type '{}' with identifier '{}' did not stabilize.",
                    self.type_name, identifier
                ),
            ),
        )
    }

    /// Convert a stabilization error into the matching failure
    pub fn stabilization_failure(
        &self,
        error: StabilizationError,
        request: &ResourceHandlerRequest,
        model: &ResourceModel,
    ) -> Result<ProgressEvent> {
        match error {
            StabilizationError::TimedOut { .. } | StabilizationError::UnexpectedState { .. } => {
                warn!(
                    correlation_token = %request.client_request_token,
                    cluster_arn = model.arn.as_deref(),
                    error = %error,
                    "Cluster did not stabilize"
                );
                Ok(self.not_stabilized(request, model.primary_identifier()))
            }
            StabilizationError::InvalidRequest(api_error) => {
                warn!(
                    correlation_token = %request.client_request_token,
                    cluster_arn = model.arn.as_deref(),
                    "MSK API request failed during stabilization: {}",
                    api_error.message
                );
                Ok(ProgressEvent::failed(
                    HandlerErrorCode::InvalidRequest,
                    tag_message(request, &api_error.message),
                ))
            }
            StabilizationError::ProbeFailed(api_error) => {
                self.classify(&api_error, request, operations::STABILIZE, model)
            }
        }
    }

    /// Describe the cluster identified by `model` and report it as the result
    ///
    /// A model without an identity handle is reported as not found without
    /// calling the control plane.
    pub async fn read_model(
        &self,
        request: &ResourceHandlerRequest,
        model: &ResourceModel,
    ) -> Result<ProgressEvent> {
        let Some(arn) = model.arn.as_deref().filter(|arn| !arn.is_empty()) else {
            return Ok(self.not_found(request, model.primary_identifier()));
        };

        match self.client.describe_cluster(arn).await {
            Ok(response) => {
                info!(
                    correlation_token = %request.client_request_token,
                    cluster_arn = %arn,
                    state = %response.cluster_info.state,
                    "Successfully read cluster"
                );
                Ok(ProgressEvent::success(translator::from_describe_response(
                    &response,
                )))
            }
            Err(error) => self.classify(&error, request, operations::READ, model),
        }
    }
}

/// Prefix a message with the request's correlation token
pub fn tag_message(request: &ResourceHandlerRequest, message: &str) -> String {
    format!(
        "[ClientRequestToken: {}] {}",
        request.client_request_token, message
    )
}
