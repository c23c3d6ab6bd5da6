//! # Update Workflow
//!
//! Only tags are mutable on a serverless cluster. The update diffs previously
//! attached tags against desired tags, removes then adds, and reads the
//! cluster back. A failed untag stops the workflow before any tag call.

use async_trait::async_trait;
use tracing::info;

use super::base::{tag_message, HandlerBase};
use super::ResourceHandler;
use crate::constants::{operations, PREVIOUS_STATE_REQUIRED};
use crate::error::Result;
use crate::models::ResourceHandlerRequest;
use crate::orchestration::tag_reconciler::{self, TagDelta};
use crate::orchestration::types::{CallbackContext, HandlerErrorCode, ProgressEvent};

#[derive(Debug, Clone)]
pub struct UpdateHandler {
    base: HandlerBase,
}

impl UpdateHandler {
    pub fn new(base: HandlerBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl ResourceHandler for UpdateHandler {
    async fn handle_request(
        &self,
        request: &ResourceHandlerRequest,
        _callback_context: &CallbackContext,
    ) -> Result<ProgressEvent> {
        let Some(previous) = request.previous_resource_state.as_ref() else {
            return Ok(ProgressEvent::failed(
                HandlerErrorCode::InvalidRequest,
                tag_message(request, PREVIOUS_STATE_REQUIRED),
            ));
        };

        let mut model = request.desired_resource_state.clone();
        if !model.has_identity() {
            model.arn = previous.arn.clone();
        }
        let Some(arn) = model.arn.clone().filter(|arn| !arn.is_empty()) else {
            return Ok(self.base.not_found(request, model.primary_identifier()));
        };

        let delta = TagDelta::diff(
            &tag_reconciler::previously_attached_tags(request),
            &tag_reconciler::new_desired_tags(request),
        );

        if !delta.tags_to_remove.is_empty() {
            info!(
                correlation_token = %request.client_request_token,
                cluster_arn = %arn,
                account_id = request.aws_account_id.as_deref(),
                count = delta.tags_to_remove.len(),
                "Removing tags from cluster"
            );
            if let Err(error) = self
                .base
                .client
                .untag_resource(&arn, &delta.keys_to_remove())
                .await
            {
                return self
                    .base
                    .classify(&error, request, operations::UNTAG_RESOURCE, &model);
            }
        }

        if !delta.tags_to_add.is_empty() {
            info!(
                correlation_token = %request.client_request_token,
                cluster_arn = %arn,
                account_id = request.aws_account_id.as_deref(),
                count = delta.tags_to_add.len(),
                "Adding tags to cluster"
            );
            if let Err(error) = self.base.client.tag_resource(&arn, &delta.tags_to_add).await {
                return self
                    .base
                    .classify(&error, request, operations::TAG_RESOURCE, &model);
            }
        }

        self.base.read_model(request, &model).await
    }

    fn operation_name(&self) -> &'static str {
        operations::UPDATE
    }
}
