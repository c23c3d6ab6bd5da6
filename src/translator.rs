//! # Translator
//!
//! Pure mappings between the resource model and the control plane's wire
//! types. Handlers call these only at request construction and response
//! parsing boundaries.

use std::collections::BTreeSet;

use crate::client::{
    ApiError, ApiErrorKind, ClusterInfo, CreateClusterRequest, DescribeClusterResponse,
    ListClustersRequest, ListClustersResponse, ServerlessClientAuthentication, ServerlessInfo,
    WireVpcConfig,
};
use crate::models::{ClientAuthentication, ResourceModel, VpcConfig};

/// Build the create request from the desired model
///
/// Fails with a locally raised invalid-argument error when the model has no
/// cluster name, so the classifier reports it as an invalid request.
pub fn to_create_request(model: &ResourceModel) -> Result<CreateClusterRequest, ApiError> {
    let cluster_name = model
        .cluster_name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                ApiErrorKind::InvalidArgument,
                "Property validation failure: ClusterName is required",
            )
        })?;

    Ok(CreateClusterRequest {
        cluster_name,
        serverless: ServerlessInfo {
            client_authentication: ServerlessClientAuthentication {
                iam_enabled: model.iam_enabled(),
            },
            vpc_configs: model
                .vpc_configs
                .iter()
                .map(|vpc| WireVpcConfig {
                    subnet_ids: vpc.subnet_ids.iter().cloned().collect(),
                    security_group_ids: vpc.security_groups.iter().cloned().collect(),
                })
                .collect(),
        },
        tags: model.tags.clone(),
    })
}

/// Map a describe response to the canonical resource model
pub fn from_describe_response(response: &DescribeClusterResponse) -> ResourceModel {
    from_cluster_info(&response.cluster_info)
}

pub fn from_cluster_info(info: &ClusterInfo) -> ResourceModel {
    ResourceModel {
        arn: Some(info.cluster_arn.clone()),
        cluster_name: Some(info.cluster_name.clone()),
        client_authentication: Some(ClientAuthentication::iam(
            info.serverless.client_authentication.iam_enabled,
        )),
        vpc_configs: info
            .serverless
            .vpc_configs
            .iter()
            .map(|vpc| VpcConfig {
                subnet_ids: vpc.subnet_ids.iter().cloned().collect::<BTreeSet<_>>(),
                security_groups: vpc.security_group_ids.iter().cloned().collect(),
            })
            .collect(),
        tags: info.tags.clone(),
    }
}

/// List request restricted to one cluster type, passing the token through
pub fn to_list_request(cluster_type_filter: &str, next_token: Option<&str>) -> ListClustersRequest {
    ListClustersRequest {
        cluster_type_filter: cluster_type_filter.to_string(),
        next_token: next_token.map(str::to_string),
    }
}

/// Identity-only models for every entry of a list page
pub fn from_list_response(response: &ListClustersResponse) -> Vec<ResourceModel> {
    response
        .cluster_info_list
        .iter()
        .flatten()
        .map(|summary| ResourceModel::identity_only(summary.cluster_arn.clone()))
        .collect()
}
