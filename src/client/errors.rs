//! # Control Plane Error Types
//!
//! A failed remote call, tagged with a kind from the remote API's fixed
//! vocabulary. The error classifier turns these into handler outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::remote::{
    INVALID_PARAMETER_MESSAGE, PARAM_CLUSTER_ARN, SERVER_ERROR_STATUS_MARKER,
};

/// Remote error vocabulary plus the two locally raised shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    BadRequest,
    Forbidden,
    Unauthorized,
    InternalServerError,
    ServiceUnavailable,
    TooManyRequests,
    NotFound,
    Conflict,
    /// Remote service error without a more specific kind
    Service,
    /// Raised locally while building a request
    InvalidArgument,
    /// Client-side failure (transport, signing, response parsing)
    Client,
}

impl ApiErrorKind {
    /// Whether the error came back from the remote service
    pub fn is_service_error(&self) -> bool {
        !matches!(self, Self::InvalidArgument | Self::Client)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "BadRequestException",
            Self::Forbidden => "ForbiddenException",
            Self::Unauthorized => "UnauthorizedException",
            Self::InternalServerError => "InternalServerErrorException",
            Self::ServiceUnavailable => "ServiceUnavailableException",
            Self::TooManyRequests => "TooManyRequestsException",
            Self::NotFound => "NotFoundException",
            Self::Conflict => "ConflictException",
            Self::Service => "ServiceException",
            Self::InvalidArgument => "InvalidArgument",
            Self::Client => "ClientException",
        };
        f.write_str(name)
    }
}

/// A failed control-plane call
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// HTTP status hint, when the transport surfaced one
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Offending parameter reported with bad-request errors
    #[serde(default)]
    pub invalid_parameter: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            invalid_parameter: None,
            request_id: None,
        }
    }

    pub fn bad_request(message: impl Into<String>, invalid_parameter: Option<&str>) -> Self {
        Self {
            invalid_parameter: invalid_parameter.map(str::to_string),
            ..Self::new(ApiErrorKind::BadRequest, message).with_status_code(400)
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message).with_status_code(404)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Conflict, message).with_status_code(409)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::TooManyRequests, message).with_status_code(429)
    }

    pub fn service(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            status_code,
            ..Self::new(ApiErrorKind::Service, message)
        }
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Server-side (5xx-class) failure, from the status hint or the message
    pub fn is_server_error(&self) -> bool {
        if let Some(code) = self.status_code {
            return (500..600).contains(&code);
        }
        self.message.contains(SERVER_ERROR_STATUS_MARKER)
    }

    /// Bad request rejecting the identity handle as syntactically invalid
    ///
    /// Some backends stop recognising the arn of a destroyed cluster and report
    /// it this way instead of returning not-found.
    pub fn is_invalid_cluster_arn(&self) -> bool {
        self.kind == ApiErrorKind::BadRequest
            && self.invalid_parameter.as_deref() == Some(PARAM_CLUSTER_ARN)
            && self.message.contains(INVALID_PARAMETER_MESSAGE)
    }

    /// Resource is gone, either reported directly or through an invalid arn
    pub fn indicates_missing_cluster(&self) -> bool {
        self.kind == ApiErrorKind::NotFound || self.is_invalid_cluster_arn()
    }
}
