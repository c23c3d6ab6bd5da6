//! # Delete Workflow
//!
//! Issues the delete call once and probes until the control plane no longer
//! knows the cluster. Deleting a cluster that is already gone is reported as
//! `NotFound` without involving the classifier.

use async_trait::async_trait;
use tracing::{info, warn};

use super::base::{tag_message, HandlerBase};
use super::ResourceHandler;
use crate::constants::operations;
use crate::error::Result;
use crate::models::ResourceHandlerRequest;
use crate::orchestration::stabilizer::{StabilizationPolicy, StabilizationStatus};
use crate::orchestration::types::{CallbackContext, HandlerErrorCode, ProgressEvent};

#[derive(Debug, Clone)]
pub struct DeleteHandler {
    base: HandlerBase,
}

impl DeleteHandler {
    pub fn new(base: HandlerBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl ResourceHandler for DeleteHandler {
    async fn handle_request(
        &self,
        request: &ResourceHandlerRequest,
        callback_context: &CallbackContext,
    ) -> Result<ProgressEvent> {
        let model = request.desired_resource_state.clone();
        let Some(arn) = model.arn.clone().filter(|arn| !arn.is_empty()) else {
            return Ok(self.base.not_found(request, model.primary_identifier()));
        };

        let mut context = callback_context.clone();
        if !context.mutation_issued {
            match self.base.client.delete_cluster(&arn).await {
                Ok(response) => {
                    info!(
                        correlation_token = %request.client_request_token,
                        cluster_arn = %arn,
                        state = %response.state,
                        "🗑️ Cluster deletion initiated"
                    );
                }
                Err(error) if error.indicates_missing_cluster() => {
                    warn!(
                        correlation_token = %request.client_request_token,
                        cluster_arn = %arn,
                        "Cluster deletion failed because the cluster does not exist: {}",
                        error.message
                    );
                    return Ok(ProgressEvent::failed(
                        HandlerErrorCode::NotFound,
                        tag_message(request, &error.message),
                    ));
                }
                Err(error) => {
                    return self
                        .base
                        .classify(&error, request, operations::DELETE, &model)
                }
            }

            context = self
                .base
                .stabilizer
                .begin(StabilizationPolicy::Delete, &context);
        }

        let probe = self.base.client.describe_cluster(&arn).await;
        let evaluation = self.base.stabilizer.evaluate(
            StabilizationPolicy::Delete,
            probe.as_ref().map(|response| &response.cluster_info.state),
            &context,
        );

        match evaluation {
            Ok(StabilizationStatus::Stabilized) => Ok(ProgressEvent::deleted()),
            Ok(StabilizationStatus::Pending { context, delay }) => {
                Ok(ProgressEvent::in_progress(model, context, delay))
            }
            Err(error) => self.base.stabilization_failure(error, request, &model),
        }
    }

    fn operation_name(&self) -> &'static str {
        operations::DELETE
    }
}
