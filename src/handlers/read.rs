use async_trait::async_trait;

use super::base::HandlerBase;
use super::ResourceHandler;
use crate::constants::operations;
use crate::error::Result;
use crate::models::ResourceHandlerRequest;
use crate::orchestration::types::{CallbackContext, ProgressEvent};

/// Describes the cluster by its identity handle
#[derive(Debug, Clone)]
pub struct ReadHandler {
    base: HandlerBase,
}

impl ReadHandler {
    pub fn new(base: HandlerBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl ResourceHandler for ReadHandler {
    async fn handle_request(
        &self,
        request: &ResourceHandlerRequest,
        _callback_context: &CallbackContext,
    ) -> Result<ProgressEvent> {
        self.base
            .read_model(request, &request.desired_resource_state)
            .await
    }

    fn operation_name(&self) -> &'static str {
        operations::READ
    }
}
