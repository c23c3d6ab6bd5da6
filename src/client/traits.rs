//! # Control Plane Client Trait
//!
//! Defines the remote calls the lifecycle handlers depend on.

use async_trait::async_trait;
use std::collections::HashMap;

use super::errors::ApiError;
use super::types::{
    CreateClusterRequest, CreateClusterResponse, DeleteClusterResponse, DescribeClusterResponse,
    ListClustersRequest, ListClustersResponse,
};

/// Remote control-plane API for serverless clusters
///
/// Implementations are expected to be already configured with credentials,
/// region and transport retry settings. Every method maps one remote call; a
/// failure carries the remote error kind so the classifier can convert it.
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    /// Create a cluster, returning its newly assigned identity and initial state
    async fn create_cluster(
        &self,
        request: CreateClusterRequest,
    ) -> Result<CreateClusterResponse, ApiError>;

    /// Describe the current state of a cluster
    async fn describe_cluster(&self, cluster_arn: &str)
        -> Result<DescribeClusterResponse, ApiError>;

    /// Start deleting a cluster
    async fn delete_cluster(&self, cluster_arn: &str) -> Result<DeleteClusterResponse, ApiError>;

    /// Attach or overwrite tags on a cluster
    async fn tag_resource(
        &self,
        cluster_arn: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), ApiError>;

    /// Remove tags from a cluster by key
    async fn untag_resource(&self, cluster_arn: &str, tag_keys: &[String])
        -> Result<(), ApiError>;

    /// Fetch one page of clusters
    async fn list_clusters(
        &self,
        request: ListClustersRequest,
    ) -> Result<ListClustersResponse, ApiError>;

    /// Client name for logging
    fn client_name(&self) -> &'static str {
        "control_plane"
    }
}
