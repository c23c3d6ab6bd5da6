//! # Stabilization Poller
//!
//! Decides, from a single probe of the control plane, whether a mutated
//! cluster has reached its target state, must be probed again later, or has
//! failed to stabilize.
//!
//! ## Overview
//!
//! The poller never sleeps and never loops. Each handler invocation performs at
//! most one probe and hands the result to [`Stabilizer::evaluate`] together with
//! the callback context of the invocation. A pending result carries the updated
//! context (budget decremented by one delay) and the delay the orchestrator
//! should wait before invoking the handler again.
//!
//! ## Policies
//!
//! - **Create**: `ACTIVE` is stabilized, `CREATING` is pending, any other state
//!   is unexpected.
//! - **Delete**: `DELETING` is pending, any other reported state is unexpected.
//!   A probe that fails because the cluster no longer exists (not-found, or a
//!   bad request rejecting the arn) is stabilized.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::{ApiError, ApiErrorKind, ClusterState};
use crate::constants::stabilization::{CREATE_DELAY, CREATE_TIMEOUT, DELETE_DELAY, DELETE_TIMEOUT};
use crate::orchestration::types::CallbackContext;

/// Upper bound on total stabilization time and the delay between probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizationBudget {
    pub timeout: Duration,
    pub delay: Duration,
}

impl StabilizationBudget {
    pub const fn new(timeout: Duration, delay: Duration) -> Self {
        Self { timeout, delay }
    }
}

/// Budgets per stabilizing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizationConfig {
    pub create: StabilizationBudget,
    pub delete: StabilizationBudget,
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            create: StabilizationBudget::new(CREATE_TIMEOUT, CREATE_DELAY),
            delete: StabilizationBudget::new(DELETE_TIMEOUT, DELETE_DELAY),
        }
    }
}

/// Which operation is being stabilized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizationPolicy {
    Create,
    Delete,
}

impl StabilizationPolicy {
    pub fn budget(&self, config: &StabilizationConfig) -> StabilizationBudget {
        match self {
            Self::Create => config.create,
            Self::Delete => config.delete,
        }
    }

    fn is_target_state(&self, state: &ClusterState) -> bool {
        match self {
            Self::Create => *state == ClusterState::Active,
            Self::Delete => false,
        }
    }

    fn is_in_progress_state(&self, state: &ClusterState) -> bool {
        match self {
            Self::Create => *state == ClusterState::Creating,
            Self::Delete => *state == ClusterState::Deleting,
        }
    }
}

impl std::fmt::Display for StabilizationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Outcome of one stabilization probe that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StabilizationStatus {
    Stabilized,
    Pending {
        context: CallbackContext,
        delay: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StabilizationError {
    #[error("Stabilization budget exhausted after {attempts} probes, last state {state}")]
    TimedOut { state: ClusterState, attempts: u32 },

    #[error("Cluster reached unexpected state {state}")]
    UnexpectedState { state: ClusterState },

    /// Bad request during delete stabilization that does not indicate a missing cluster
    #[error("Invalid request during stabilization: {0}")]
    InvalidRequest(ApiError),

    /// Probe failure left to the error classifier
    #[error("Stabilization probe failed: {0}")]
    ProbeFailed(ApiError),
}

/// Evaluates probe results against a stabilization policy
#[derive(Debug, Clone, Default)]
pub struct Stabilizer {
    config: StabilizationConfig,
}

impl Stabilizer {
    pub fn new(config: StabilizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StabilizationConfig {
        &self.config
    }

    /// Context to carry into stabilization right after the mutating call
    pub fn begin(&self, policy: StabilizationPolicy, context: &CallbackContext) -> CallbackContext {
        let budget = policy.budget(&self.config);
        CallbackContext {
            mutation_issued: true,
            remaining_timeout_seconds: Some(
                context
                    .remaining_timeout_seconds
                    .unwrap_or(budget.timeout.as_secs()),
            ),
            stabilization_attempts: context.stabilization_attempts,
        }
    }

    /// Evaluate one probe result
    pub fn evaluate(
        &self,
        policy: StabilizationPolicy,
        probe: Result<&ClusterState, &ApiError>,
        context: &CallbackContext,
    ) -> Result<StabilizationStatus, StabilizationError> {
        let state = match probe {
            Ok(state) => state,
            Err(error) => return Self::evaluate_probe_failure(policy, error),
        };

        if policy.is_target_state(state) {
            info!(policy = %policy, state = %state, "✅ Cluster is stabilized");
            return Ok(StabilizationStatus::Stabilized);
        }

        if !policy.is_in_progress_state(state) {
            warn!(policy = %policy, state = %state, "Cluster reached unexpected state");
            return Err(StabilizationError::UnexpectedState {
                state: state.clone(),
            });
        }

        let budget = policy.budget(&self.config);
        let remaining = context.remaining_timeout(budget.timeout);
        let attempts = context.stabilization_attempts + 1;

        if remaining < budget.delay {
            warn!(
                policy = %policy,
                state = %state,
                attempts = attempts,
                "Stabilization budget exhausted"
            );
            return Err(StabilizationError::TimedOut {
                state: state.clone(),
                attempts,
            });
        }

        let remaining = remaining - budget.delay;
        debug!(
            policy = %policy,
            state = %state,
            attempts = attempts,
            remaining_seconds = remaining.as_secs(),
            "Cluster is stabilizing"
        );

        Ok(StabilizationStatus::Pending {
            context: CallbackContext {
                mutation_issued: context.mutation_issued,
                remaining_timeout_seconds: Some(remaining.as_secs()),
                stabilization_attempts: attempts,
            },
            delay: budget.delay,
        })
    }

    fn evaluate_probe_failure(
        policy: StabilizationPolicy,
        error: &ApiError,
    ) -> Result<StabilizationStatus, StabilizationError> {
        match policy {
            StabilizationPolicy::Delete if error.indicates_missing_cluster() => {
                info!(policy = %policy, "✅ Cluster is deleted");
                Ok(StabilizationStatus::Stabilized)
            }
            StabilizationPolicy::Delete if error.kind == ApiErrorKind::BadRequest => {
                Err(StabilizationError::InvalidRequest(error.clone()))
            }
            _ => Err(StabilizationError::ProbeFailed(error.clone())),
        }
    }
}
