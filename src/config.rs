//! Configuration for the control-plane client
//!
//! `ApiConfig` is loaded from a JSON file and/or environment variables;
//! command-line flags override both. Only the endpoint is mandatory.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the control-plane endpoint URL
pub const ENDPOINT_ENV: &str = "GRIDCTL_ENDPOINT";

/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "GRIDCTL_TOKEN";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the control-plane endpoint
    #[serde(default)]
    pub endpoint: String,

    /// Static bearer token sent with every request
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of retries per call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("gridctl/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Load configuration: file (if given), then environment for the fields
    /// the file left unset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    Error::config(format!("Failed to read config file {}: {e}", p.display()))
                })?;
                serde_json::from_str(&content)
                    .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
            }
            None => Self::default(),
        };

        if config.endpoint.trim().is_empty() {
            if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
                config.endpoint = endpoint;
            }
        }
        if config.auth_token.is_none() {
            config.auth_token = std::env::var(TOKEN_ENV)
                .ok()
                .filter(|t| !t.trim().is_empty());
        }

        Ok(config)
    }

    /// Set the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the bearer token
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the retry budget
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Validate that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::config(format!(
                "No endpoint configured (set {ENDPOINT_ENV}, use --endpoint, or add \"endpoint\" to the config file)"
            )));
        }
        url::Url::parse(&self.endpoint)?;
        Ok(())
    }
}
