//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Session payloads and the validated principal built from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AuthError, AuthResult};
use crate::permissions::{Permission, PermissionSet};
use crate::roles::Role;

/// User record as carried by a session payload
///
/// Fields arrive untyped; [`AuthenticatedPrincipal::try_from`] validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// The signed-in user as seen by authorization checks
///
/// Immutable once built. A new session resolution produces a new principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedPrincipal {
    id: String,
    email: String,
    name: Option<String>,
    role: Role,
    permissions: PermissionSet,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
}

impl AuthenticatedPrincipal {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            role,
            permissions: permissions.into_iter().collect(),
            is_active: true,
            last_login: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }
}

impl TryFrom<SessionUser> for AuthenticatedPrincipal {
    type Error = AuthError;

    fn try_from(user: SessionUser) -> AuthResult<Self> {
        if user.id.trim().is_empty() {
            return Err(AuthError::validation(
                "Session user has no id".to_string(),
            ));
        }

        if user.email.trim().is_empty() {
            return Err(AuthError::validation(format!(
                "Session user {} has no email",
                user.id
            )));
        }

        let role: Role = match user.role.as_deref() {
            Some(role) => role.parse()?,
            None => {
                return Err(AuthError::validation(format!(
                    "Session user {} has no role",
                    user.id
                )))
            }
        };

        // malformed tokens grant nothing; the rest of the payload still counts
        let permissions: PermissionSet = user
            .permissions
            .unwrap_or_default()
            .iter()
            .filter_map(|token| match token.parse::<Permission>() {
                Ok(permission) => Some(permission),
                Err(e) => {
                    warn!("Dropping permission from session payload of {}: {}", user.id, e);
                    None
                }
            })
            .collect();

        // accounts deactivated after sign-in are not principals
        let is_active = user.is_active.unwrap_or(true);
        if !is_active {
            return Err(AuthError::account_inactive());
        }

        Ok(Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role,
            permissions,
            is_active,
            last_login: user.last_login,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> SessionUser {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ingest_valid_payload() {
        let user = payload(
            r#"{
                "id": "u1",
                "email": "ed@example.com",
                "name": "Ed",
                "role": "editor",
                "permissions": ["products.view", "orders.edit"],
                "isActive": true,
                "lastLogin": "2025-01-01T00:00:00Z"
            }"#,
        );
        let principal = AuthenticatedPrincipal::try_from(user).unwrap();
        assert_eq!(principal.role(), Role::Editor);
        assert_eq!(principal.name(), Some("Ed"));
        assert!(principal.permissions().contains(&Permission::ORDERS_EDIT));
        assert!(principal.last_login().is_some());
    }

    #[test]
    fn test_missing_permissions_means_none() {
        let user = payload(r#"{"id": "u1", "email": "a@b.c", "role": "manager"}"#);
        let principal = AuthenticatedPrincipal::try_from(user).unwrap();
        assert!(principal.permissions().is_empty());
        assert!(principal.is_active());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let user = payload(r#"{"id": "u1", "email": "a@b.c", "role": "owner"}"#);
        assert_eq!(
            AuthenticatedPrincipal::try_from(user),
            Err(AuthError::unknown_role("owner"))
        );
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let user = payload(r#"{"id": "u1", "email": "a@b.c"}"#);
        assert!(matches!(
            AuthenticatedPrincipal::try_from(user),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_permission_is_dropped() {
        let user = payload(
            r#"{"id": "u1", "email": "a@b.c", "role": "editor", "permissions": ["products", "Orders.View", "products.view"]}"#,
        );
        let principal = AuthenticatedPrincipal::try_from(user).unwrap();
        assert_eq!(principal.permissions().to_strings(), vec!["products.view"]);
        assert_eq!(principal.role(), Role::Editor);
    }

    #[test]
    fn test_inactive_account_is_rejected() {
        let user = payload(
            r#"{"id": "u1", "email": "a@b.c", "role": "editor", "isActive": false}"#,
        );
        assert_eq!(
            AuthenticatedPrincipal::try_from(user),
            Err(AuthError::account_inactive())
        );
    }
}
