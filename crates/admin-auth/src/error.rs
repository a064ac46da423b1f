//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error types for the authorization core

use thiserror::Error;

/// Authorization result type
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors raised by the catalog, account store and session layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Invalid permission: {0}")]
    InvalidPermission(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    AccountInactive(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session invalid: {0}")]
    SessionInvalid(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Session revoked: {0}")]
    SessionRevoked(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn unknown_role(role: &str) -> Self {
        Self::UnknownRole(role.to_string())
    }

    pub fn invalid_permission(token: &str) -> Self {
        Self::InvalidPermission(token.to_string())
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials("Invalid email or password".to_string())
    }

    pub fn account_inactive() -> Self {
        Self::AccountInactive("Account is inactive".to_string())
    }

    pub fn user_not_found(msg: String) -> Self {
        Self::UserNotFound(msg)
    }

    pub fn conflict(msg: String) -> Self {
        Self::Conflict(msg)
    }

    pub fn validation(msg: String) -> Self {
        Self::Validation(msg)
    }

    pub fn session_invalid(msg: String) -> Self {
        Self::SessionInvalid(msg)
    }

    pub fn session_expired(msg: String) -> Self {
        Self::SessionExpired(msg)
    }

    pub fn session_revoked(msg: String) -> Self {
        Self::SessionRevoked(msg)
    }

    pub fn hashing(msg: String) -> Self {
        Self::Hashing(msg)
    }

    pub fn configuration(msg: String) -> Self {
        Self::Configuration(msg)
    }

    pub fn internal(msg: String) -> Self {
        Self::Internal(msg)
    }

    /// Whether the error describes a rejected login attempt
    pub fn is_login_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials(_) | Self::AccountInactive(_)
        )
    }

    /// Whether the error means the presented session cannot be used
    pub fn is_session_failure(&self) -> bool {
        matches!(
            self,
            Self::SessionInvalid(_) | Self::SessionExpired(_) | Self::SessionRevoked(_)
        )
    }
}
