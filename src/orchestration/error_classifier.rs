//! # Remote Error Classification
//!
//! Turns opaque control-plane failures into the closed handler error taxonomy.
//!
//! ## Overview
//!
//! Every remote-call failure that a handler does not treat as expected control
//! flow is routed through an [`ErrorClassifier`]. The standard classifier is an
//! ordered decision table: the first rule whose predicate matches decides the
//! error code, whether the orchestrator may retry, and how the failure is
//! logged. New remote error kinds are supported by inserting a rule, without
//! reordering the existing ones.
//!
//! ## Decision Table
//!
//! | # | Remote error | Handler error code | Retryable |
//! |---|---|---|---|
//! | 1 | locally raised invalid argument | `InvalidRequest` | no |
//! | 2 | bad request | `InvalidRequest` | no |
//! | 3 | forbidden / unauthorized | `InvalidRequest` | no |
//! | 4 | internal server error | `InternalFailure` | no |
//! | 5 | service unavailable | `ServiceInternalError` | yes |
//! | 6 | too many requests | `Throttling` | yes |
//! | 7 | not found | `NotFound` | no |
//! | 8 | any other service error | `ServiceInternalError` (5xx) or `GeneralServiceException` | no |
//!
//! Errors no rule matches (client-side failures) are returned as
//! [`ProviderError::UnhandledRemoteError`] so they propagate as defects.
//!
//! ## Usage
//!
//! ```rust
//! use cluster_provider::client::ApiError;
//! use cluster_provider::orchestration::error_classifier::{
//!     ErrorClassifier, ErrorContext, StandardErrorClassifier,
//! };
//! use cluster_provider::orchestration::types::HandlerErrorCode;
//!
//! let classifier = StandardErrorClassifier::new();
//! let context = ErrorContext::new("token-1", "AWS-MSK-ServerlessCluster::Read");
//! let error = ApiError::too_many_requests("Rate exceeded");
//!
//! let classification = classifier.classify_error(&error, &context).unwrap();
//! assert_eq!(classification.error_code, HandlerErrorCode::Throttling);
//! assert!(classification.is_retryable);
//! ```

use serde::Serialize;
use tracing::{error, warn};

use crate::client::{ApiError, ApiErrorKind};
use crate::error::ProviderError;
use crate::orchestration::types::{FailureDetails, HandlerErrorCode, ProgressEvent};

/// Context of the invocation in which the error occurred
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Correlation token of the invocation
    pub client_request_token: String,

    /// Remote operation that failed
    pub operation: String,

    /// Identity of the resource, when known
    pub resource_identifier: Option<String>,
}

impl ErrorContext {
    pub fn new(client_request_token: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            client_request_token: client_request_token.into(),
            operation: operation.into(),
            resource_identifier: None,
        }
    }

    pub fn with_resource_identifier(mut self, identifier: Option<&str>) -> Self {
        self.resource_identifier = identifier.map(str::to_string);
        self
    }

    /// Prefix every failure message with the correlation token
    pub fn tagged_message(&self, message: &str) -> String {
        format!("[ClientRequestToken: {}] {}", self.client_request_token, message)
    }
}

/// Result of error classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorClassification {
    /// Handler error code surfaced to the orchestrator
    pub error_code: HandlerErrorCode,

    /// Whether the orchestrator's own backoff may retry
    pub is_retryable: bool,

    /// Caller-visible message, tagged with the correlation token
    pub error_message: String,

    /// Name of the rule that matched
    pub rule: &'static str,
}

impl From<ErrorClassification> for ProgressEvent {
    fn from(classification: ErrorClassification) -> Self {
        ProgressEvent::Failed(FailureDetails {
            error_code: classification.error_code,
            message: classification.error_message,
            retryable: classification.is_retryable,
        })
    }
}

/// How a classified failure is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    /// Request could not be built from the resource properties
    PropertyValidation,
    /// The control plane rejected the request
    ApiRequestFailed,
    /// The control plane failed on its side
    SelfServiceInternalFailure,
}

/// How the caller-visible message is built from the remote error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// The raw remote message
    Raw,
    /// The raw message followed by the quoted offending parameter
    WithInvalidParameter,
}

/// One row of the decision table
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub name: &'static str,
    pub applies: fn(&ApiError) -> bool,
    pub error_code: fn(&ApiError) -> HandlerErrorCode,
    pub retryable: bool,
    pub message_format: MessageFormat,
    pub log_category: LogCategory,
}

/// Trait for error classification strategies
pub trait ErrorClassifier: Send + Sync {
    /// Classify a remote failure into a handler outcome
    ///
    /// Returns `Err` for error shapes the classifier does not recognize.
    fn classify_error(
        &self,
        error: &ApiError,
        context: &ErrorContext,
    ) -> Result<ErrorClassification, ProviderError>;

    /// Get the classifier name for identification
    fn classifier_name(&self) -> &'static str;

    /// Check if this classifier can handle the given error
    fn can_classify(&self, error: &ApiError) -> bool;
}

fn is_invalid_argument(error: &ApiError) -> bool {
    error.kind == ApiErrorKind::InvalidArgument
}

fn is_bad_request(error: &ApiError) -> bool {
    error.kind == ApiErrorKind::BadRequest
}

fn is_access_denied(error: &ApiError) -> bool {
    matches!(
        error.kind,
        ApiErrorKind::Forbidden | ApiErrorKind::Unauthorized
    )
}

fn is_internal_server_error(error: &ApiError) -> bool {
    error.kind == ApiErrorKind::InternalServerError
}

fn is_service_unavailable(error: &ApiError) -> bool {
    error.kind == ApiErrorKind::ServiceUnavailable
}

fn is_too_many_requests(error: &ApiError) -> bool {
    error.kind == ApiErrorKind::TooManyRequests
}

fn is_not_found(error: &ApiError) -> bool {
    error.kind == ApiErrorKind::NotFound
}

fn is_remote_service_error(error: &ApiError) -> bool {
    error.kind.is_service_error()
}

fn server_side_or_general(error: &ApiError) -> HandlerErrorCode {
    if error.is_server_error() {
        HandlerErrorCode::ServiceInternalError
    } else {
        HandlerErrorCode::GeneralServiceException
    }
}

/// The standard decision table, in precedence order
pub const STANDARD_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "invalid_argument",
        applies: is_invalid_argument,
        error_code: |_| HandlerErrorCode::InvalidRequest,
        retryable: false,
        message_format: MessageFormat::Raw,
        log_category: LogCategory::PropertyValidation,
    },
    ClassificationRule {
        name: "bad_request",
        applies: is_bad_request,
        error_code: |_| HandlerErrorCode::InvalidRequest,
        retryable: false,
        message_format: MessageFormat::WithInvalidParameter,
        log_category: LogCategory::ApiRequestFailed,
    },
    ClassificationRule {
        name: "access_denied",
        applies: is_access_denied,
        error_code: |_| HandlerErrorCode::InvalidRequest,
        retryable: false,
        message_format: MessageFormat::Raw,
        log_category: LogCategory::ApiRequestFailed,
    },
    ClassificationRule {
        name: "internal_server_error",
        applies: is_internal_server_error,
        error_code: |_| HandlerErrorCode::InternalFailure,
        retryable: false,
        message_format: MessageFormat::Raw,
        log_category: LogCategory::SelfServiceInternalFailure,
    },
    ClassificationRule {
        name: "service_unavailable",
        applies: is_service_unavailable,
        error_code: |_| HandlerErrorCode::ServiceInternalError,
        retryable: true,
        message_format: MessageFormat::Raw,
        log_category: LogCategory::SelfServiceInternalFailure,
    },
    ClassificationRule {
        name: "too_many_requests",
        applies: is_too_many_requests,
        error_code: |_| HandlerErrorCode::Throttling,
        retryable: true,
        message_format: MessageFormat::Raw,
        log_category: LogCategory::ApiRequestFailed,
    },
    ClassificationRule {
        name: "not_found",
        applies: is_not_found,
        error_code: |_| HandlerErrorCode::NotFound,
        retryable: false,
        message_format: MessageFormat::Raw,
        log_category: LogCategory::ApiRequestFailed,
    },
    ClassificationRule {
        name: "service_error",
        applies: is_remote_service_error,
        error_code: server_side_or_general,
        retryable: false,
        message_format: MessageFormat::Raw,
        log_category: LogCategory::ApiRequestFailed,
    },
];

/// Standard classifier driven by an ordered rule table
#[derive(Debug, Clone)]
pub struct StandardErrorClassifier {
    rules: Vec<ClassificationRule>,
}

impl Default for StandardErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardErrorClassifier {
    /// Create a classifier with the standard decision table
    pub fn new() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
        }
    }

    /// Create a classifier with a custom decision table
    pub fn with_rules(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// Insert a rule ahead of the rule with the given name, or append it
    pub fn insert_rule_before(mut self, before: &str, rule: ClassificationRule) -> Self {
        let position = self
            .rules
            .iter()
            .position(|existing| existing.name == before)
            .unwrap_or(self.rules.len());
        self.rules.insert(position, rule);
        self
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    fn matching_rule(&self, error: &ApiError) -> Option<&ClassificationRule> {
        self.rules.iter().find(|rule| (rule.applies)(error))
    }

    fn build_message(rule: &ClassificationRule, error: &ApiError, context: &ErrorContext) -> String {
        match (rule.message_format, error.invalid_parameter.as_deref()) {
            (MessageFormat::WithInvalidParameter, Some(parameter)) => {
                context.tagged_message(&format!("{} '{}'", error.message, parameter))
            }
            _ => context.tagged_message(&error.message),
        }
    }

    fn log_classification(
        rule: &ClassificationRule,
        error: &ApiError,
        context: &ErrorContext,
        error_code: HandlerErrorCode,
    ) {
        match rule.log_category {
            LogCategory::PropertyValidation => warn!(
                correlation_token = %context.client_request_token,
                operation = %context.operation,
                rule = rule.name,
                error_code = %error_code,
                "Property validation failure: {}",
                error.message
            ),
            LogCategory::ApiRequestFailed => warn!(
                correlation_token = %context.client_request_token,
                operation = %context.operation,
                resource = context.resource_identifier.as_deref(),
                remote_kind = %error.kind,
                request_id = error.request_id.as_deref(),
                rule = rule.name,
                error_code = %error_code,
                "MSK API request failed: {}",
                error.message
            ),
            LogCategory::SelfServiceInternalFailure => error!(
                correlation_token = %context.client_request_token,
                operation = %context.operation,
                resource = context.resource_identifier.as_deref(),
                remote_kind = %error.kind,
                request_id = error.request_id.as_deref(),
                rule = rule.name,
                error_code = %error_code,
                "MSK Self-Service Internal Failure: {}",
                error.message
            ),
        }
    }
}

impl ErrorClassifier for StandardErrorClassifier {
    fn classify_error(
        &self,
        error: &ApiError,
        context: &ErrorContext,
    ) -> Result<ErrorClassification, ProviderError> {
        let Some(rule) = self.matching_rule(error) else {
            error!(
                correlation_token = %context.client_request_token,
                operation = %context.operation,
                remote_kind = %error.kind,
                "MSK API request failed: {}",
                error.message
            );
            return Err(ProviderError::UnhandledRemoteError {
                operation: context.operation.clone(),
                source: error.clone(),
            });
        };

        let error_code = (rule.error_code)(error);
        Self::log_classification(rule, error, context, error_code);

        Ok(ErrorClassification {
            error_code,
            is_retryable: rule.retryable,
            error_message: Self::build_message(rule, error, context),
            rule: rule.name,
        })
    }

    fn classifier_name(&self) -> &'static str {
        "standard_error_classifier"
    }

    fn can_classify(&self, error: &ApiError) -> bool {
        self.matching_rule(error).is_some()
    }
}
