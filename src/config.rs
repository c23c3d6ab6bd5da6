//! # Provider Configuration
//!
//! Runtime settings for the provider process. Values are layered: built-in
//! defaults, then an optional `provider.toml`, then `PROVIDER_*` environment
//! variables (e.g. `PROVIDER_LOG_LEVEL=warn`).
//!
//! Stabilization budgets are not configured here; they are fixed per operation
//! in [`StabilizationConfig`](crate::orchestration::stabilizer::StabilizationConfig).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{RESOURCE_TYPE_NAME, SERVERLESS_CLUSTER_TYPE};
use crate::error::{ProviderError, Result};

/// Default file consulted by [`ProviderConfig::load`] when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "provider.toml";

const ENV_PREFIX: &str = "PROVIDER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Deployment environment (development, test, production)
    pub environment: String,
    /// Log filter directive, e.g. `info` or `cluster_provider=debug`
    pub log_level: String,
    /// Emit JSON log records in addition to console output
    pub json_logs: bool,
    /// Resource type name used in failure messages
    pub type_name: String,
    /// Cluster type filter applied to list calls
    pub list_cluster_type_filter: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let environment = "development".to_string();
        Self {
            log_level: default_log_level(&environment).to_string(),
            environment,
            json_logs: false,
            type_name: RESOURCE_TYPE_NAME.to_string(),
            list_cluster_type_filter: SERVERLESS_CLUSTER_TYPE.to_string(),
        }
    }
}

/// Log level implied by an environment name
pub fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

impl ProviderConfig {
    /// Load layered configuration
    ///
    /// A missing file is not an error; a malformed one is. Without an explicit
    /// `environment`, `APP_ENV` is consulted; without an explicit `log_level`,
    /// the level follows the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        use ::config::{Config, Environment, File};

        let mut builder = Config::builder();
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if file.exists() {
            builder = builder.add_source(File::from(file));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let built = builder.build()?;
        let environment_set = built.get_string("environment").is_ok();
        let log_level_set = built.get_string("log_level").is_ok();

        let mut loaded: ProviderConfig = built.try_deserialize()?;
        if !environment_set {
            if let Ok(environment) = std::env::var("APP_ENV") {
                loaded.environment = environment;
            }
        }
        if !log_level_set {
            loaded.log_level = default_log_level(&loaded.environment).to_string();
        }
        loaded.validate()?;

        tracing::debug!(
            environment = %loaded.environment,
            type_name = %loaded.type_name,
            config_file = %file.display(),
            "Provider configuration loaded"
        );
        Ok(loaded)
    }

    /// Configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(environment) = lookup("PROVIDER_ENVIRONMENT").or_else(|| lookup("APP_ENV")) {
            config.log_level = default_log_level(&environment).to_string();
            config.environment = environment;
        }

        if let Some(log_level) = lookup("PROVIDER_LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Some(json_logs) = lookup("PROVIDER_JSON_LOGS") {
            config.json_logs = json_logs.parse().map_err(|e| {
                ProviderError::Configuration(format!("Invalid json_logs: {e}"))
            })?;
        }

        if let Some(type_name) = lookup("PROVIDER_TYPE_NAME") {
            config.type_name = type_name;
        }

        if let Some(filter) = lookup("PROVIDER_LIST_CLUSTER_TYPE_FILTER") {
            config.list_cluster_type_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.type_name.trim().is_empty() {
            return Err(ProviderError::Configuration(
                "type_name must not be empty".to_string(),
            ));
        }
        if self.list_cluster_type_filter.trim().is_empty() {
            return Err(ProviderError::Configuration(
                "list_cluster_type_filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
