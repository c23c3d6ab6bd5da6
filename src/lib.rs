#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Serverless Cluster Provider
//!
//! Resource-lifecycle provider for serverless message-streaming clusters.
//!
//! ## Overview
//!
//! An orchestrator invokes the provider with a declarative desired state and
//! an opaque callback context. The provider drives the cluster through create,
//! read, update, delete and list against the remote control plane and reports
//! back a progress event: success, in progress with a delay, or failed. The
//! orchestrator re-invokes until the event is terminal.
//!
//! ## Key Features
//!
//! - **Resumable workflows**: each invocation does a bounded amount of work and never sleeps
//! - **Bounded stabilization**: per-operation time budgets converted into `NotStabilized`
//! - **Error taxonomy**: every remote failure mapped to one of eight handler error codes
//! - **Tag reconciliation**: minimal add/remove sets merged from stack and resource tags
//!
//! ## Module Organization
//!
//! - [`handlers`] - Lifecycle workflows and the [`Provider`] entry point
//! - [`orchestration`] - Classifier, stabilizer, tag reconciler and progress types
//! - [`client`] - Control-plane client trait, wire types and errors
//! - [`models`] - Resource model and request envelope
//! - [`translator`] - Model to wire-type mappings
//! - [`protocol`] - JSON request/response envelopes
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cluster_provider::client::ControlPlaneClient;
//! use cluster_provider::{Action, CallbackContext, Provider, ProviderConfig, ResourceHandlerRequest};
//!
//! # async fn example(client: Arc<dyn ControlPlaneClient>) -> cluster_provider::Result<()> {
//! let config = ProviderConfig::from_env()?;
//! cluster_provider::logging::init_with_config(&config);
//!
//! let provider = Provider::from_config(client, &config);
//! let request = ResourceHandlerRequest::new(Default::default());
//! let event = provider
//!     .handle(Action::Read, request, CallbackContext::new())
//!     .await?;
//! println!("status: {}", event.status());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod protocol;
pub mod translator;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use handlers::{Action, Provider, ResourceHandler};
pub use models::{ResourceHandlerRequest, ResourceModel};
pub use orchestration::{
    drive_to_completion, CallbackContext, HandlerErrorCode, ProgressEvent, StabilizationConfig,
};
pub use protocol::{HandlerRequest, HandlerResponse};
