//! # Create Workflow
//!
//! Issues the create call once, then probes the new cluster on each invocation
//! until it is `ACTIVE`, and finishes by reading it back.
//!
//! ## Resumption
//!
//! The first invocation creates the cluster, captures its arn into the model
//! and marks `mutation_issued` in the callback context. Later invocations see
//! the flag and go straight to the stabilization probe, so the create call is
//! never repeated.

use async_trait::async_trait;
use tracing::{info, warn};

use super::base::HandlerBase;
use super::ResourceHandler;
use crate::client::ApiErrorKind;
use crate::constants::operations;
use crate::error::Result;
use crate::models::ResourceHandlerRequest;
use crate::orchestration::stabilizer::{StabilizationPolicy, StabilizationStatus};
use crate::orchestration::tag_reconciler;
use crate::orchestration::types::{CallbackContext, ProgressEvent};
use crate::translator;

#[derive(Debug, Clone)]
pub struct CreateHandler {
    base: HandlerBase,
}

impl CreateHandler {
    pub fn new(base: HandlerBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl ResourceHandler for CreateHandler {
    async fn handle_request(
        &self,
        request: &ResourceHandlerRequest,
        callback_context: &CallbackContext,
    ) -> Result<ProgressEvent> {
        let mut model = request.desired_resource_state.clone();
        model.tags = tag_reconciler::tags_for_create(request);

        let mut context = callback_context.clone();
        if !context.mutation_issued {
            let create_request = match translator::to_create_request(&model) {
                Ok(create_request) => create_request,
                Err(error) => {
                    return self
                        .base
                        .classify(&error, request, operations::CREATE, &model)
                }
            };
            let cluster_name = create_request.cluster_name.clone();

            match self.base.client.create_cluster(create_request).await {
                Ok(response) => {
                    info!(
                        correlation_token = %request.client_request_token,
                        cluster_arn = %response.cluster_arn,
                        state = %response.state,
                        "🚀 Cluster creation initiated"
                    );
                    if !model.has_identity() {
                        model.arn = Some(response.cluster_arn);
                    }
                }
                Err(error) if error.kind == ApiErrorKind::Conflict => {
                    warn!(
                        correlation_token = %request.client_request_token,
                        cluster_name = %cluster_name,
                        "Cluster with name already exists: {}",
                        error.message
                    );
                    return Ok(self.base.already_exists(request, &cluster_name));
                }
                Err(error) => {
                    return self
                        .base
                        .classify(&error, request, operations::CREATE, &model)
                }
            }

            context = self
                .base
                .stabilizer
                .begin(StabilizationPolicy::Create, &context);
        }

        let Some(arn) = model.arn.clone().filter(|arn| !arn.is_empty()) else {
            warn!(
                correlation_token = %request.client_request_token,
                "Create resumed without a cluster arn"
            );
            return Ok(self.base.not_found(request, model.primary_identifier()));
        };

        let probe = self.base.client.describe_cluster(&arn).await;
        let evaluation = self.base.stabilizer.evaluate(
            StabilizationPolicy::Create,
            probe.as_ref().map(|response| &response.cluster_info.state),
            &context,
        );

        match evaluation {
            Ok(StabilizationStatus::Stabilized) => self.base.read_model(request, &model).await,
            Ok(StabilizationStatus::Pending { context, delay }) => {
                Ok(ProgressEvent::in_progress(model, context, delay))
            }
            Err(error) => self.base.stabilization_failure(error, request, &model),
        }
    }

    fn operation_name(&self) -> &'static str {
        operations::CREATE
    }
}
