//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Access requirements and denial reasons

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::permissions::Permission;
use crate::roles::Role;

/// A single value or a list of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(values: [T; N]) -> Self {
        OneOrMany::Many(values.into())
    }
}

/// What a guarded view or route demands of the principal
///
/// Both fields are optional. An absent or empty field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<OneOrMany<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<OneOrMany<Permission>>,
}

impl AccessRequirement {
    /// Requirement satisfied by any authenticated principal
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn roles(mut self, roles: impl Into<OneOrMany<Role>>) -> Self {
        self.roles = Some(roles.into());
        self
    }

    pub fn permissions(mut self, permissions: impl Into<OneOrMany<Permission>>) -> Self {
        self.permissions = Some(permissions.into());
        self
    }

    pub fn required_roles(&self) -> &[Role] {
        match &self.roles {
            Some(roles) => roles.as_slice(),
            None => &[],
        }
    }

    pub fn required_permissions(&self) -> &[Permission] {
        match &self.permissions {
            Some(permissions) => permissions.as_slice(),
            None => &[],
        }
    }
}

/// Why an access check failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Denial {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("role {role} is not among the required roles")]
    RoleMismatch { role: Role },

    #[error("missing {} required permission(s)", .missing.len())]
    PermissionMismatch { missing: Vec<Permission> },
}

impl Denial {
    /// Default notice shown when a blocking guard has no fallback
    pub fn notice(&self) -> &'static str {
        match self {
            Denial::NotAuthenticated => "You need to be logged in to access this page.",
            Denial::RoleMismatch { .. } => {
                "You don't have the required role to access this page."
            }
            Denial::PermissionMismatch { .. } => {
                "You don't have the required permissions to access this page."
            }
        }
    }
}
