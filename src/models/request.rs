use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::ResourceModel;

/// Everything the orchestrator supplies for one handler invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandlerRequest {
    /// Correlation token tying together logs and failures of one operation
    #[serde(default)]
    pub client_request_token: String,

    /// Desired state of the resource
    #[serde(default)]
    pub desired_resource_state: ResourceModel,

    /// Last known state, required for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_state: Option<ResourceModel>,

    /// Stack-level tags for the desired state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_resource_tags: Option<HashMap<String, String>>,

    /// Stack-level tags that were attached previously
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_tags: Option<HashMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Continuation token for list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ResourceHandlerRequest {
    /// Create a request for the given desired state with a fresh correlation token
    pub fn new(desired_resource_state: ResourceModel) -> Self {
        Self {
            client_request_token: Uuid::new_v4().to_string(),
            desired_resource_state,
            ..Default::default()
        }
    }

    pub fn with_client_request_token(mut self, token: impl Into<String>) -> Self {
        self.client_request_token = token.into();
        self
    }

    pub fn with_previous_resource_state(mut self, previous: ResourceModel) -> Self {
        self.previous_resource_state = Some(previous);
        self
    }

    pub fn with_desired_resource_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.desired_resource_tags = Some(tags);
        self
    }

    pub fn with_previous_resource_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.previous_resource_tags = Some(tags);
        self
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }

    /// Fill in a correlation token when the orchestrator sent none
    pub fn ensure_client_request_token(&mut self) -> &str {
        if self.client_request_token.is_empty() {
            self.client_request_token = Uuid::new_v4().to_string();
        }
        &self.client_request_token
    }
}
