use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Full desired or actual state of one serverless cluster
///
/// Property names follow the resource type schema (PascalCase). The `arn` is
/// assigned by the control plane on first creation and is absent before that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceModel {
    /// Identity handle assigned by the control plane
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    /// Human-chosen cluster name, immutable after creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,

    /// Client authentication mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_authentication: Option<ClientAuthentication>,

    /// Network placement of the cluster
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vpc_configs: Vec<VpcConfig>,

    /// Resource-level tags
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientAuthentication {
    pub sasl: Sasl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sasl {
    pub iam: Iam,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Iam {
    pub enabled: bool,
}

/// Subnets and security groups the cluster is reachable from
///
/// Both collections are sets in the schema; `BTreeSet` keeps comparisons
/// independent of the order the control plane returns them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfig {
    pub subnet_ids: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub security_groups: BTreeSet<String>,
}

impl ResourceModel {
    /// Model carrying only the identity handle, as produced by list
    pub fn identity_only(arn: impl Into<String>) -> Self {
        Self {
            arn: Some(arn.into()),
            ..Default::default()
        }
    }

    /// Whether the control plane has ever assigned an identity to this model
    pub fn has_identity(&self) -> bool {
        self.arn.as_deref().is_some_and(|arn| !arn.is_empty())
    }

    /// Identifier used in failure messages: the arn when known, the name otherwise
    pub fn primary_identifier(&self) -> &str {
        self.arn
            .as_deref()
            .or(self.cluster_name.as_deref())
            .unwrap_or("")
    }

    /// IAM authentication flag, defaulting to disabled when unset
    pub fn iam_enabled(&self) -> bool {
        self.client_authentication
            .as_ref()
            .map(|auth| auth.sasl.iam.enabled)
            .unwrap_or(false)
    }
}

impl ClientAuthentication {
    pub fn iam(enabled: bool) -> Self {
        Self {
            sasl: Sasl {
                iam: Iam { enabled },
            },
        }
    }
}
