//! # Lifecycle Handlers
//!
//! One workflow per lifecycle action, dispatched by [`Provider`].
//!
//! ## Overview
//!
//! Each handler is invoked once per orchestrator attempt and returns a
//! [`ProgressEvent`]. Handlers never wait: when the cluster is still
//! converging they return `InProgress` with a delay and a callback context,
//! and the orchestrator invokes them again. Per invocation a handler issues at
//! most one mutating call and one stabilization probe.
//!
//! ## Key Features
//!
//! - **Create / Delete**: mutation once, then resumable stabilization
//! - **Read**: describe and translate
//! - **Update**: tag reconciliation followed by a read
//! - **List**: one page, continuation token passed through
//!
//! Remote failures become `Failed` events through the error classifier;
//! only defects escape as `Err(ProviderError)`.

pub mod base;
pub mod create;
pub mod delete;
pub mod list;
pub mod read;
pub mod update;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::client::ControlPlaneClient;
use crate::config::ProviderConfig;
use crate::constants::{RESOURCE_TYPE_NAME, SERVERLESS_CLUSTER_TYPE};
use crate::error::Result;
use crate::logging::log_handler_operation;
use crate::models::ResourceHandlerRequest;
use crate::orchestration::error_classifier::{ErrorClassifier, StandardErrorClassifier};
use crate::orchestration::stabilizer::{StabilizationConfig, Stabilizer};
use crate::orchestration::types::{CallbackContext, ProgressEvent};

pub use base::HandlerBase;
pub use create::CreateHandler;
pub use delete::DeleteHandler;
pub use list::ListHandler;
pub use read::ReadHandler;
pub use update::UpdateHandler;

/// Lifecycle action requested by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Read => write!(f, "READ"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::List => write!(f, "LIST"),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "READ" => Ok(Self::Read),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "LIST" => Ok(Self::List),
            _ => Err(format!("Invalid action: {s}")),
        }
    }
}

/// One lifecycle workflow
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Run one invocation of the workflow
    async fn handle_request(
        &self,
        request: &ResourceHandlerRequest,
        callback_context: &CallbackContext,
    ) -> Result<ProgressEvent>;

    /// Operation name used in logs
    fn operation_name(&self) -> &'static str;
}

/// Entry point the orchestrator invokes for every attempt
#[derive(Debug, Clone)]
pub struct Provider {
    create: CreateHandler,
    read: ReadHandler,
    update: UpdateHandler,
    delete: DeleteHandler,
    list: ListHandler,
}

impl Provider {
    pub fn new(
        client: Arc<dyn ControlPlaneClient>,
        stabilization: StabilizationConfig,
        classifier: Arc<dyn ErrorClassifier>,
    ) -> Self {
        let base = HandlerBase::new(
            client,
            classifier,
            Stabilizer::new(stabilization),
            RESOURCE_TYPE_NAME,
        );
        Self::assemble(base, SERVERLESS_CLUSTER_TYPE)
    }

    /// Provider with the standard classifier and stabilization budgets
    pub fn with_defaults(client: Arc<dyn ControlPlaneClient>) -> Self {
        Self::new(
            client,
            StabilizationConfig::default(),
            Arc::new(StandardErrorClassifier::new()),
        )
    }

    pub fn from_config(client: Arc<dyn ControlPlaneClient>, config: &ProviderConfig) -> Self {
        let base = HandlerBase::new(
            client,
            Arc::new(StandardErrorClassifier::new()),
            Stabilizer::default(),
            config.type_name.clone(),
        );
        Self::assemble(base, &config.list_cluster_type_filter)
    }

    fn assemble(base: HandlerBase, cluster_type_filter: &str) -> Self {
        Self {
            create: CreateHandler::new(base.clone()),
            read: ReadHandler::new(base.clone()),
            update: UpdateHandler::new(base.clone()),
            delete: DeleteHandler::new(base.clone()),
            list: ListHandler::new(base, cluster_type_filter),
        }
    }

    pub fn handler(&self, action: Action) -> &dyn ResourceHandler {
        match action {
            Action::Create => &self.create,
            Action::Read => &self.read,
            Action::Update => &self.update,
            Action::Delete => &self.delete,
            Action::List => &self.list,
        }
    }

    /// Run one invocation of `action`
    ///
    /// A correlation token is generated when the request carries none.
    pub async fn handle(
        &self,
        action: Action,
        mut request: ResourceHandlerRequest,
        callback_context: CallbackContext,
    ) -> Result<ProgressEvent> {
        request.ensure_client_request_token();
        let handler = self.handler(action);
        let operation = handler.operation_name();
        let cluster_arn = request.desired_resource_state.arn.clone();

        log_handler_operation(
            operation,
            &request.client_request_token,
            cluster_arn.as_deref(),
            "STARTED",
            None,
        );

        match handler.handle_request(&request, &callback_context).await {
            Ok(event) => {
                let details = event.error_code().map(|code| code.to_string());
                log_handler_operation(
                    operation,
                    &request.client_request_token,
                    event
                        .resource_model()
                        .and_then(|model| model.arn.as_deref())
                        .or(cluster_arn.as_deref()),
                    &event.status().to_string(),
                    details.as_deref(),
                );
                Ok(event)
            }
            Err(error) => {
                crate::logging::log_error(
                    "provider",
                    operation,
                    &error.to_string(),
                    Some(&request.client_request_token),
                );
                Err(error)
            }
        }
    }
}
