//! # Structured Logging Module
//!
//! Environment-aware structured logging for handler invocations. Console
//! output is always on; JSON records can be added for log shipping.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{default_log_level, ProviderConfig};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging from the environment
pub fn init_structured_logging() {
    let environment = get_environment();
    let config = ProviderConfig {
        log_level: std::env::var("PROVIDER_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level(&environment).to_string()),
        json_logs: std::env::var("PROVIDER_JSON_LOGS")
            .map(|value| value == "true")
            .unwrap_or(false),
        environment,
        ..ProviderConfig::default()
    };
    init_with_config(&config);
}

/// Initialize structured logging from loaded configuration
///
/// Only the first call has an effect. An already installed global subscriber
/// is left in place.
pub fn init_with_config(config: &ProviderConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let console = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(true)
            .with_filter(EnvFilter::new(&config.log_level));

        let json = config.json_logs.then(|| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false)
                .with_ansi(false)
                .with_filter(EnvFilter::new(&config.log_level))
        });

        if tracing_subscriber::registry()
            .with(console)
            .with(json)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %config.environment,
            json_logs = config.json_logs,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("PROVIDER_ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Log start or completion of a handler invocation
pub fn log_handler_operation(
    operation: &str,
    correlation_token: &str,
    cluster_arn: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        correlation_token = %correlation_token,
        cluster_arn = cluster_arn,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📋 HANDLER_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
