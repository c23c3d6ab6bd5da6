use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use cluster_provider::client::{
    ClusterInfo, ClusterState, ClusterSummary, CreateClusterResponse, DescribeClusterResponse,
    ListClustersResponse, ServerlessClientAuthentication, ServerlessInfo, WireVpcConfig,
};
use cluster_provider::models::{ClientAuthentication, ResourceModel, VpcConfig};
use cluster_provider::orchestration::{
    CallbackContext, FailureDetails, ProgressEvent, StabilizationBudget, StabilizationConfig,
    StandardErrorClassifier, SuccessPayload,
};
use cluster_provider::{Provider, ResourceHandlerRequest};

use super::mock_control_plane::MockControlPlane;

pub const TEST_TOKEN: &str = "test-token-1";
pub const CLUSTER_NAME: &str = "C1";
pub const CLUSTER_ARN: &str = "arn:1";

pub fn tags(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Desired model for a new cluster named `C1`
pub fn desired_model() -> ResourceModel {
    ResourceModel {
        arn: None,
        cluster_name: Some(CLUSTER_NAME.to_string()),
        client_authentication: Some(ClientAuthentication::iam(true)),
        vpc_configs: vec![VpcConfig {
            subnet_ids: BTreeSet::from(["subnet-1".to_string(), "subnet-2".to_string()]),
            security_groups: BTreeSet::from(["sg-1".to_string()]),
        }],
        tags: HashMap::new(),
    }
}

/// Desired model of the existing cluster `arn:1`
pub fn existing_model() -> ResourceModel {
    ResourceModel {
        arn: Some(CLUSTER_ARN.to_string()),
        ..desired_model()
    }
}

pub fn request_for(model: ResourceModel) -> ResourceHandlerRequest {
    ResourceHandlerRequest::new(model).with_client_request_token(TEST_TOKEN)
}

pub fn cluster_info(arn: &str, state: ClusterState) -> ClusterInfo {
    ClusterInfo {
        cluster_arn: arn.to_string(),
        cluster_name: CLUSTER_NAME.to_string(),
        state,
        serverless: ServerlessInfo {
            client_authentication: ServerlessClientAuthentication { iam_enabled: true },
            vpc_configs: vec![WireVpcConfig {
                subnet_ids: vec!["subnet-1".to_string(), "subnet-2".to_string()],
                security_group_ids: vec!["sg-1".to_string()],
            }],
        },
        tags: HashMap::new(),
    }
}

pub fn describe_response(arn: &str, state: ClusterState) -> DescribeClusterResponse {
    DescribeClusterResponse {
        cluster_info: cluster_info(arn, state),
    }
}

pub fn create_response(arn: &str) -> CreateClusterResponse {
    CreateClusterResponse {
        cluster_arn: arn.to_string(),
        cluster_name: CLUSTER_NAME.to_string(),
        state: ClusterState::Creating,
    }
}

pub fn list_response(arns: &[&str], next_token: Option<&str>) -> ListClustersResponse {
    ListClustersResponse {
        cluster_info_list: Some(
            arns.iter()
                .map(|arn| ClusterSummary {
                    cluster_arn: arn.to_string(),
                    cluster_name: Some(CLUSTER_NAME.to_string()),
                    state: Some(ClusterState::Active),
                })
                .collect(),
        ),
        next_token: next_token.map(str::to_string),
    }
}

/// Short budgets so timeout paths are reachable in a handful of invocations
pub fn fast_stabilization() -> StabilizationConfig {
    StabilizationConfig {
        create: StabilizationBudget::new(Duration::from_secs(90), Duration::from_secs(30)),
        delete: StabilizationBudget::new(Duration::from_secs(60), Duration::from_secs(30)),
    }
}

pub fn provider_for(mock: &MockControlPlane) -> Provider {
    Provider::with_defaults(Arc::new(mock.clone()))
}

pub fn fast_provider_for(mock: &MockControlPlane) -> Provider {
    Provider::new(
        Arc::new(mock.clone()),
        fast_stabilization(),
        Arc::new(StandardErrorClassifier::new()),
    )
}

/// Unwrap a failed event, panicking with the actual event otherwise
pub fn expect_failure(event: ProgressEvent) -> FailureDetails {
    match event {
        ProgressEvent::Failed(details) => details,
        other => panic!("Expected Failed, got {other:?}"),
    }
}

/// Unwrap an in-progress event into its model, context and delay
pub fn expect_in_progress(event: ProgressEvent) -> (ResourceModel, CallbackContext, u32) {
    match event {
        ProgressEvent::InProgress {
            resource_model,
            callback_context,
            callback_delay_seconds,
        } => (resource_model, callback_context, callback_delay_seconds),
        other => panic!("Expected InProgress, got {other:?}"),
    }
}

/// Unwrap a resource-producing success
pub fn expect_resource(event: ProgressEvent) -> ResourceModel {
    match event {
        ProgressEvent::Success(SuccessPayload::Resource(model)) => model,
        other => panic!("Expected Success with a resource, got {other:?}"),
    }
}
