//! Mock Control Plane Implementation for Testing
//!
//! Scripted implementation of the `ControlPlaneClient` trait. Responses are
//! queued per remote call and every call is recorded for assertions.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use cluster_provider::client::{
    ApiError, ApiErrorKind, ClusterState, ControlPlaneClient, CreateClusterRequest,
    CreateClusterResponse, DeleteClusterResponse, DescribeClusterResponse, ListClustersRequest,
    ListClustersResponse,
};

use super::builders::describe_response;

/// A remote call as received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreateCluster(CreateClusterRequest),
    DescribeCluster(String),
    DeleteCluster(String),
    TagResource(String, HashMap<String, String>),
    UntagResource(String, Vec<String>),
    ListClusters(ListClustersRequest),
}

/// Mock control plane state for tracking calls and scripting responses
#[derive(Debug, Default)]
pub struct MockControlPlaneState {
    /// Every call in the order received
    pub calls: Vec<RecordedCall>,
    pub create_responses: VecDeque<Result<CreateClusterResponse, ApiError>>,
    pub describe_responses: VecDeque<Result<DescribeClusterResponse, ApiError>>,
    /// Replayed once the describe queue is drained
    pub last_describe: Option<Result<DescribeClusterResponse, ApiError>>,
    pub delete_responses: VecDeque<Result<DeleteClusterResponse, ApiError>>,
    pub tag_responses: VecDeque<Result<(), ApiError>>,
    pub untag_responses: VecDeque<Result<(), ApiError>>,
    pub list_responses: VecDeque<Result<ListClustersResponse, ApiError>>,
}

/// Mock control plane for testing
#[derive(Debug, Clone, Default)]
pub struct MockControlPlane {
    state: Arc<Mutex<MockControlPlaneState>>,
}

impl MockControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_response(self, response: Result<CreateClusterResponse, ApiError>) -> Self {
        self.state.lock().unwrap().create_responses.push_back(response);
        self
    }

    /// Queue one successful describe per state
    pub fn with_describe_states(self, arn: &str, states: &[ClusterState]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for cluster_state in states {
                state
                    .describe_responses
                    .push_back(Ok(describe_response(arn, cluster_state.clone())));
            }
        }
        self
    }

    pub fn with_describe_response(
        self,
        response: Result<DescribeClusterResponse, ApiError>,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .describe_responses
            .push_back(response);
        self
    }

    pub fn with_delete_response(self, response: Result<DeleteClusterResponse, ApiError>) -> Self {
        self.state.lock().unwrap().delete_responses.push_back(response);
        self
    }

    pub fn with_tag_response(self, response: Result<(), ApiError>) -> Self {
        self.state.lock().unwrap().tag_responses.push_back(response);
        self
    }

    pub fn with_untag_response(self, response: Result<(), ApiError>) -> Self {
        self.state.lock().unwrap().untag_responses.push_back(response);
        self
    }

    pub fn with_list_response(self, response: Result<ListClustersResponse, ApiError>) -> Self {
        self.state.lock().unwrap().list_responses.push_back(response);
        self
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn create_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::CreateCluster(_)))
    }

    pub fn describe_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::DescribeCluster(_)))
    }

    pub fn delete_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::DeleteCluster(_)))
    }

    pub fn tag_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::TagResource(..)))
    }

    pub fn untag_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::UntagResource(..)))
    }

    pub fn list_calls(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::ListClusters(_)))
    }

    fn count(&self, predicate: impl Fn(&RecordedCall) -> bool) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    fn record(&self, call: RecordedCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn unscripted(operation: &str) -> ApiError {
    ApiError::new(
        ApiErrorKind::Client,
        format!("no scripted response for {operation}"),
    )
}

#[async_trait]
impl ControlPlaneClient for MockControlPlane {
    async fn create_cluster(
        &self,
        request: CreateClusterRequest,
    ) -> Result<CreateClusterResponse, ApiError> {
        self.record(RecordedCall::CreateCluster(request));
        self.state
            .lock()
            .unwrap()
            .create_responses
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("create_cluster")))
    }

    async fn describe_cluster(
        &self,
        cluster_arn: &str,
    ) -> Result<DescribeClusterResponse, ApiError> {
        self.record(RecordedCall::DescribeCluster(cluster_arn.to_string()));
        let mut state = self.state.lock().unwrap();
        match state.describe_responses.pop_front() {
            Some(response) => {
                state.last_describe = Some(response.clone());
                response
            }
            None => state
                .last_describe
                .clone()
                .unwrap_or_else(|| Err(ApiError::not_found("Cluster not found"))),
        }
    }

    async fn delete_cluster(&self, cluster_arn: &str) -> Result<DeleteClusterResponse, ApiError> {
        self.record(RecordedCall::DeleteCluster(cluster_arn.to_string()));
        self.state
            .lock()
            .unwrap()
            .delete_responses
            .pop_front()
            .unwrap_or_else(|| {
                Ok(DeleteClusterResponse {
                    cluster_arn: cluster_arn.to_string(),
                    state: ClusterState::Deleting,
                })
            })
    }

    async fn tag_resource(
        &self,
        cluster_arn: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), ApiError> {
        self.record(RecordedCall::TagResource(
            cluster_arn.to_string(),
            tags.clone(),
        ));
        self.state
            .lock()
            .unwrap()
            .tag_responses
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn untag_resource(&self, cluster_arn: &str, tag_keys: &[String]) -> Result<(), ApiError> {
        self.record(RecordedCall::UntagResource(
            cluster_arn.to_string(),
            tag_keys.to_vec(),
        ));
        self.state
            .lock()
            .unwrap()
            .untag_responses
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn list_clusters(
        &self,
        request: ListClustersRequest,
    ) -> Result<ListClustersResponse, ApiError> {
        self.record(RecordedCall::ListClusters(request));
        self.state
            .lock()
            .unwrap()
            .list_responses
            .pop_front()
            .unwrap_or_else(|| Ok(ListClustersResponse::default()))
    }

    fn client_name(&self) -> &'static str {
        "mock_control_plane"
    }
}
