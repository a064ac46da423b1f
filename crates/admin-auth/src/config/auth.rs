//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Main authorization configuration

use serde::{Deserialize, Serialize};

use super::rbac::RbacConfig;
use super::session::SessionConfig;
use super::user::UserConfig;
use crate::error::{AuthError, AuthResult};

/// Authorization core configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Session configuration
    pub session: SessionConfig,

    /// Account store configuration
    pub users: UserConfig,

    /// Role-based access control configuration
    pub rbac: RbacConfig,
}

impl AuthConfig {
    /// Validate the configuration
    pub fn validate(&self) -> AuthResult<()> {
        if self.session.secret.is_empty() {
            return Err(AuthError::configuration(
                "Session secret cannot be empty".to_string(),
            ));
        }

        if self.session.expiration_secs == 0 {
            return Err(AuthError::configuration(
                "Session expiration must be greater than zero".to_string(),
            ));
        }

        if self.session.expiration_secs > crate::MAX_SESSION_EXPIRATION_SECS {
            return Err(AuthError::configuration(format!(
                "Session expiration cannot exceed {} seconds",
                crate::MAX_SESSION_EXPIRATION_SECS
            )));
        }

        if self.users.min_password_length == 0 {
            return Err(AuthError::configuration(
                "Minimum password length must be at least 1".to_string(),
            ));
        }

        if !(crate::MIN_BCRYPT_COST..=crate::MAX_BCRYPT_COST).contains(&self.users.bcrypt_cost) {
            return Err(AuthError::configuration(format!(
                "bcrypt cost must be between {} and {}",
                crate::MIN_BCRYPT_COST,
                crate::MAX_BCRYPT_COST
            )));
        }

        Ok(())
    }

    /// Create configuration from environment variables
    ///
    /// Variables are prefixed with `AUTH_`:
    ///
    /// - `AUTH_SESSION_SECRET`: token signing secret (required)
    /// - `AUTH_SESSION_EXPIRATION_SECS`: session lifetime (default: 604800)
    /// - `AUTH_SESSION_ISSUER`: token issuer (default: "storefront-admin")
    /// - `AUTH_SESSION_AUDIENCE`: token audience (default: "storefront-admin-dashboard")
    /// - `AUTH_USERS_MIN_PASSWORD_LENGTH`: minimum password length (default: 6)
    /// - `AUTH_USERS_BCRYPT_COST`: bcrypt work factor (default: 10)
    /// - `AUTH_RBAC_DEFAULT_ROLE`: role for new accounts (default: "editor")
    pub fn from_env() -> AuthResult<Self> {
        let mut config = Self::default();

        match std::env::var("AUTH_SESSION_SECRET") {
            Ok(secret) => config.session.secret = secret,
            Err(_) => {
                return Err(AuthError::configuration(
                    "AUTH_SESSION_SECRET environment variable is required".to_string(),
                ))
            }
        }

        if let Ok(expiration) = std::env::var("AUTH_SESSION_EXPIRATION_SECS") {
            config.session.expiration_secs = parse_var("AUTH_SESSION_EXPIRATION_SECS", &expiration)?;
        }

        if let Ok(issuer) = std::env::var("AUTH_SESSION_ISSUER") {
            config.session.issuer = issuer;
        }

        if let Ok(audience) = std::env::var("AUTH_SESSION_AUDIENCE") {
            config.session.audience = audience;
        }

        if let Ok(length) = std::env::var("AUTH_USERS_MIN_PASSWORD_LENGTH") {
            config.users.min_password_length = parse_var("AUTH_USERS_MIN_PASSWORD_LENGTH", &length)?;
        }

        if let Ok(cost) = std::env::var("AUTH_USERS_BCRYPT_COST") {
            config.users.bcrypt_cost = parse_var("AUTH_USERS_BCRYPT_COST", &cost)?;
        }

        if let Ok(role) = std::env::var("AUTH_RBAC_DEFAULT_ROLE") {
            config.rbac.default_role = role.parse()?;
        }

        config.validate()?;

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> AuthResult<T> {
    value
        .parse()
        .map_err(|_| AuthError::configuration(format!("{} must be a valid number", name)))
}
