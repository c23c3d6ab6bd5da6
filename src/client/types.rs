use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Lifecycle state reported by the control plane
///
/// States this crate has never seen are kept verbatim in `Unknown` so a
/// describe response never fails to parse; the stabilizer treats them as
/// unexpected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClusterState {
    Active,
    Creating,
    Deleting,
    Failed,
    Healing,
    Maintenance,
    RebootingBroker,
    Updating,
    Unknown(String),
}

impl ClusterState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Creating => "CREATING",
            Self::Deleting => "DELETING",
            Self::Failed => "FAILED",
            Self::Healing => "HEALING",
            Self::Maintenance => "MAINTENANCE",
            Self::RebootingBroker => "REBOOTING_BROKER",
            Self::Updating => "UPDATING",
            Self::Unknown(state) => state,
        }
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ClusterState {
    fn from(s: &str) -> Self {
        match s {
            "ACTIVE" => Self::Active,
            "CREATING" => Self::Creating,
            "DELETING" => Self::Deleting,
            "FAILED" => Self::Failed,
            "HEALING" => Self::Healing,
            "MAINTENANCE" => Self::Maintenance,
            "REBOOTING_BROKER" => Self::RebootingBroker,
            "UPDATING" => Self::Updating,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Serialize for ClusterState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClusterState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ClusterState::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessClientAuthentication {
    pub iam_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVpcConfig {
    pub subnet_ids: Vec<String>,
    #[serde(default)]
    pub security_group_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessInfo {
    #[serde(default)]
    pub client_authentication: ServerlessClientAuthentication,
    #[serde(default)]
    pub vpc_configs: Vec<WireVpcConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClusterRequest {
    pub cluster_name: String,
    pub serverless: ServerlessInfo,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClusterResponse {
    pub cluster_arn: String,
    pub cluster_name: String,
    pub state: ClusterState,
}

/// Full cluster description returned by describe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub cluster_arn: String,
    pub cluster_name: String,
    pub state: ClusterState,
    #[serde(default)]
    pub serverless: ServerlessInfo,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeClusterResponse {
    pub cluster_info: ClusterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClusterResponse {
    pub cluster_arn: String,
    pub state: ClusterState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersRequest {
    pub cluster_type_filter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Entry of a list page; only the identity is consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub cluster_arn: String,
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub state: Option<ClusterState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersResponse {
    #[serde(default)]
    pub cluster_info_list: Option<Vec<ClusterSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}
