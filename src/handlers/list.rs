use async_trait::async_trait;
use tracing::debug;

use super::base::HandlerBase;
use super::ResourceHandler;
use crate::constants::operations;
use crate::error::Result;
use crate::models::{ResourceHandlerRequest, ResourceModel};
use crate::orchestration::types::{CallbackContext, ProgressEvent};
use crate::translator;

/// Enumerates one page of serverless clusters as identity-only models
///
/// Continuation tokens are passed through verbatim in both directions.
#[derive(Debug, Clone)]
pub struct ListHandler {
    base: HandlerBase,
    cluster_type_filter: String,
}

impl ListHandler {
    pub fn new(base: HandlerBase, cluster_type_filter: impl Into<String>) -> Self {
        Self {
            base,
            cluster_type_filter: cluster_type_filter.into(),
        }
    }
}

#[async_trait]
impl ResourceHandler for ListHandler {
    async fn handle_request(
        &self,
        request: &ResourceHandlerRequest,
        _callback_context: &CallbackContext,
    ) -> Result<ProgressEvent> {
        let list_request =
            translator::to_list_request(&self.cluster_type_filter, request.next_token.as_deref());

        match self.base.client.list_clusters(list_request).await {
            Ok(response) => {
                let models = translator::from_list_response(&response);
                debug!(
                    correlation_token = %request.client_request_token,
                    count = models.len(),
                    has_next_token = response.next_token.is_some(),
                    "Listed clusters"
                );
                Ok(ProgressEvent::page(models, response.next_token))
            }
            Err(error) => self.base.classify(
                &error,
                request,
                operations::LIST,
                &ResourceModel::default(),
            ),
        }
    }

    fn operation_name(&self) -> &'static str {
        operations::LIST
    }
}
