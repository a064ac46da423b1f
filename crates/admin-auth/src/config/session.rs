//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Session configuration

use serde::{Deserialize, Serialize};

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    pub secret: String,

    /// Session lifetime in seconds
    pub expiration_secs: u64,

    /// Token issuer
    pub issuer: String,

    /// Token audience
    pub audience: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_secs: crate::DEFAULT_SESSION_EXPIRATION_SECS,
            issuer: "storefront-admin".to_string(),
            audience: "storefront-admin-dashboard".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert!(!config.secret.is_empty());
        assert_eq!(config.expiration_secs, 7 * 24 * 60 * 60);
        assert_eq!(config.issuer, "storefront-admin");
    }
}
