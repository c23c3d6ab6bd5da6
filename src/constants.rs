//! # Provider Constants
//!
//! Fixed names, message templates and stabilization budgets that define the
//! operational boundaries of the serverless cluster provider.

use std::time::Duration;

/// Resource type name reported in failure messages
pub const RESOURCE_TYPE_NAME: &str = "AWS::MSK::ServerlessCluster";

/// Cluster type filter applied to every list call
pub const SERVERLESS_CLUSTER_TYPE: &str = "SERVERLESS";

/// Operation names used for logging and call recording
pub mod operations {
    pub const CREATE: &str = "AWS-MSK-ServerlessCluster::Create";
    pub const READ: &str = "AWS-MSK-ServerlessCluster::Read";
    pub const UPDATE: &str = "AWS-MSK-ServerlessCluster::Update";
    pub const DELETE: &str = "AWS-MSK-ServerlessCluster::Delete";
    pub const LIST: &str = "AWS-MSK-ServerlessCluster::List";
    pub const TAG_RESOURCE: &str = "AWS-MSK-ServerlessCluster::TagResource";
    pub const UNTAG_RESOURCE: &str = "AWS-MSK-ServerlessCluster::UntagResource";
    pub const STABILIZE: &str = "AWS-MSK-ServerlessCluster::Stabilize";
}

/// Remote API vocabulary the engine relies on
pub mod remote {
    /// Parameter name the control plane reports for a malformed identity handle
    pub const PARAM_CLUSTER_ARN: &str = "clusterArn";

    /// Message fragment the control plane uses for syntactically invalid parameters
    pub const INVALID_PARAMETER_MESSAGE: &str = "One or more of the parameters are not valid";

    /// Fragment embedded in generic service error messages for 5xx responses
    pub const SERVER_ERROR_STATUS_MARKER: &str = "Status Code: 5";
}

/// Stabilization budgets per operation
pub mod stabilization {
    use super::Duration;

    pub const CREATE_TIMEOUT: Duration = Duration::from_secs(120 * 60);
    pub const CREATE_DELAY: Duration = Duration::from_secs(30);
    pub const DELETE_TIMEOUT: Duration = Duration::from_secs(75 * 60);
    pub const DELETE_DELAY: Duration = Duration::from_secs(30);
}

/// Message returned when an update arrives without a previous state
pub const PREVIOUS_STATE_REQUIRED: &str = "PreviousResourceState is required.";
