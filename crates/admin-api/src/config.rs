//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Configuration management for the admin API

use admin_auth::AuthConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Admin API configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP server configuration
    pub http: HttpConfig,

    /// Authorization core configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// First-run account provisioning
    pub bootstrap: BootstrapConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// HTTP server address
    pub address: String,

    /// HTTP server port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,

    /// Log incoming requests
    pub enable_request_logging: bool,

    /// Log completed responses
    pub enable_response_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_request_logging: true,
            enable_response_logging: true,
        }
    }
}

/// Bootstrap admin account, created on startup when both fields are set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl BootstrapConfig {
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_email, &self.admin_password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from a file, with `ADMIN_API_` environment overrides
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        Self::load(Some(path))
    }

    /// Load configuration from an optional file and the environment
    ///
    /// Nested keys use `__`, e.g. `ADMIN_API_AUTH__SESSION__SECRET`.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("ADMIN_API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Get HTTP server address
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.http.address, self.http.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.http.address.is_empty() {
            return Err(ApiError::Configuration(
                "HTTP address cannot be empty".to_string(),
            ));
        }

        self.auth
            .validate()
            .map_err(|e| ApiError::Configuration(format!("Auth config: {}", e)))?;

        let bootstrap = &self.bootstrap;
        if bootstrap.admin_email.is_some() != bootstrap.admin_password.is_some() {
            return Err(ApiError::Configuration(
                "Bootstrap admin requires both admin_email and admin_password".to_string(),
            ));
        }

        Ok(())
    }
}
