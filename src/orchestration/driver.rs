//! # Local Resumption Driver
//!
//! Plays the orchestrator's role in-process: invokes the provider, honors the
//! requested delay, feeds the returned context and model back, and stops at
//! the first terminal event. Used by integration tests and local tooling.

use std::time::Duration;
use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::handlers::{Action, Provider};
use crate::models::ResourceHandlerRequest;
use crate::orchestration::types::{CallbackContext, ProgressEvent};

/// Invoke `action` until it reaches a terminal event
///
/// The same correlation token is used for every invocation. Exceeding
/// `max_invocations` is an error.
pub async fn drive_to_completion(
    provider: &Provider,
    action: Action,
    mut request: ResourceHandlerRequest,
    max_invocations: u32,
) -> Result<ProgressEvent> {
    request.ensure_client_request_token();
    let mut context = CallbackContext::new();

    for invocation in 1..=max_invocations {
        match provider.handle(action, request.clone(), context).await? {
            ProgressEvent::InProgress {
                resource_model,
                callback_context,
                callback_delay_seconds,
            } => {
                debug!(
                    action = %action,
                    invocation = invocation,
                    correlation_token = %request.client_request_token,
                    delay_seconds = callback_delay_seconds,
                    "⏳ Operation in progress, re-invoking after delay"
                );
                request.desired_resource_state = resource_model;
                context = callback_context;
                tokio::time::sleep(Duration::from_secs(u64::from(callback_delay_seconds))).await;
            }
            terminal => return Ok(terminal),
        }
    }

    Err(ProviderError::InvocationLimitExceeded {
        action: action.to_string(),
        invocations: max_invocations,
    })
}
