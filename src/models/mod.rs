//! # Resource Models
//!
//! Desired/actual state of one serverless cluster and the request envelope the
//! orchestrator hands to every handler invocation.

pub mod request;
pub mod resource;

pub use request::ResourceHandlerRequest;
pub use resource::{ClientAuthentication, Iam, ResourceModel, Sasl, VpcConfig};
