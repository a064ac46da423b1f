//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Admin account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::permissions::{Permission, PermissionSet};
use crate::principal::SessionUser;
use crate::roles::Role;

/// A stored admin account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub permissions: PermissionSet,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    pub(crate) fn new(
        email: String,
        name: String,
        password_hash: String,
        role: Role,
        permissions: PermissionSet,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            password_hash,
            role,
            permissions,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Session payload for this account
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: Some(self.name.clone()),
            role: Some(self.role.to_string()),
            permissions: Some(self.permissions.to_strings()),
            is_active: Some(self.is_active),
            last_login: self.last_login,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input for provisioning an account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    /// Explicit grants replacing the role defaults
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password: password.into(),
            role: None,
            permissions: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = Some(permissions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::AuthenticatedPrincipal;
    use crate::roles::RolePermissionMap;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = AdminUser::new(
            "ed@example.com".to_string(),
            "Ed".to_string(),
            "$2b$04$hash".to_string(),
            Role::Editor,
            RolePermissionMap::lookup(Role::Editor),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "editor");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn test_session_user_round_trips_into_principal() {
        let user = AdminUser::new(
            "acc@example.com".to_string(),
            "Acc".to_string(),
            String::new(),
            Role::Accounts,
            RolePermissionMap::lookup(Role::Accounts),
        );
        let principal = AuthenticatedPrincipal::try_from(user.to_session_user()).unwrap();
        assert_eq!(principal.id(), user.id);
        assert_eq!(principal.role(), Role::Accounts);
        assert_eq!(principal.permissions(), &user.permissions);
    }

    #[test]
    fn test_new_user_payload() {
        let new_user: NewUser = serde_json::from_str(
            r#"{"email": "m@example.com", "name": "M", "password": "secret1", "role": "manager"}"#,
        )
        .unwrap();
        assert_eq!(new_user.role, Some(Role::Manager));
        assert!(new_user.permissions.is_none());
    }
}
