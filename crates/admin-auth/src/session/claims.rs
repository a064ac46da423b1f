//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Session token claims

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{AuthError, AuthResult};
use crate::roles::Role;
use crate::users::AdminUser;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,

    /// Not before
    pub nbf: i64,

    /// Token ID, used for revocation
    pub jti: String,

    /// Role at sign-in time. Informational only: sessions are resolved
    /// against the account store.
    pub role: Role,
}

impl SessionClaims {
    pub fn new(user: &AdminUser, config: &SessionConfig) -> AuthResult<Self> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(config.expiration_secs)
            .ok()
            .and_then(|secs| now.checked_add(secs))
            .ok_or_else(|| {
                AuthError::configuration(format!(
                    "Session expiration of {} seconds is out of range",
                    config.expiration_secs
                ))
            })?;

        Ok(Self {
            sub: user.id.clone(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now,
            exp,
            nbf: now,
            jti: Uuid::new_v4().to_string(),
            role: user.role,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RolePermissionMap;

    #[test]
    fn test_claims_lifetime() {
        let user = AdminUser::new(
            "ed@example.com".to_string(),
            "Ed".to_string(),
            String::new(),
            Role::Editor,
            RolePermissionMap::lookup(Role::Editor),
        );
        let config = SessionConfig::default();
        let claims = SessionClaims::new(&user, &config).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
        assert_eq!(claims.role, Role::Editor);
        assert!(!claims.is_expired());
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }

    #[test]
    fn test_claims_reject_unrepresentable_lifetime() {
        let user = AdminUser::new(
            "ed@example.com".to_string(),
            "Ed".to_string(),
            String::new(),
            Role::Editor,
            RolePermissionMap::lookup(Role::Editor),
        );

        for expiration_secs in [u64::MAX, i64::MAX as u64] {
            let config = SessionConfig {
                expiration_secs,
                ..SessionConfig::default()
            };
            assert!(matches!(
                SessionClaims::new(&user, &config),
                Err(AuthError::Configuration(_))
            ));
        }
    }
}
