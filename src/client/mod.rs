//! # Control Plane Client Boundary
//!
//! The remote control plane is an external collaborator. This module defines
//! the async trait the handlers call, the wire types exchanged with it, and the
//! error shape every call fails with.
//!
//! ## Architecture
//!
//! - **ControlPlaneClient**: one async method per remote API the handlers use
//! - **types**: request/response structures in the remote API's vocabulary
//! - **ApiError**: a failed call, tagged with a kind from the remote vocabulary
//!
//! Credential acquisition, transport and transport-level retries belong to the
//! implementation of the trait, not to this crate.

pub mod errors;
pub mod traits;
pub mod types;

pub use errors::{ApiError, ApiErrorKind};
pub use traits::ControlPlaneClient;
pub use types::{
    ClusterInfo, ClusterState, ClusterSummary, CreateClusterRequest, CreateClusterResponse,
    DeleteClusterResponse, DescribeClusterResponse, ListClustersRequest, ListClustersResponse,
    ServerlessClientAuthentication, ServerlessInfo, WireVpcConfig,
};
