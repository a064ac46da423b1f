//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Default role to permission assignments
//!
//! The map is consulted when an account is provisioned or its role is reset.
//! Authorization decisions only ever read the permissions carried by the
//! principal.

use tracing::warn;

use super::Role;
use crate::error::AuthResult;
use crate::permissions::{Permission, PermissionSet};

static ADMIN: &[Permission] = &[Permission::ALL];

static MANAGER: &[Permission] = &[
    Permission::PRODUCTS_VIEW,
    Permission::PRODUCTS_CREATE,
    Permission::PRODUCTS_EDIT,
    Permission::PRODUCTS_DELETE,
    Permission::ORDERS_VIEW,
    Permission::ORDERS_CREATE,
    Permission::ORDERS_EDIT,
    Permission::ORDERS_FULFILL,
    Permission::CUSTOMERS_VIEW,
    Permission::CUSTOMERS_CREATE,
    Permission::CUSTOMERS_EDIT,
    Permission::ANALYTICS_VIEW,
    Permission::REPORTS_VIEW,
    Permission::REPORTS_EXPORT,
    Permission::MARKETING_VIEW,
    Permission::MARKETING_CREATE,
    Permission::MARKETING_EDIT,
    Permission::PAYMENTS_VIEW,
    Permission::PAYMENTS_PROCESS,
    Permission::PAYMENTS_REFUND,
];

static EDITOR: &[Permission] = &[
    Permission::PRODUCTS_VIEW,
    Permission::PRODUCTS_CREATE,
    Permission::PRODUCTS_EDIT,
    // limited order and customer access
    Permission::ORDERS_VIEW,
    Permission::ORDERS_EDIT,
    Permission::CUSTOMERS_VIEW,
    Permission::CUSTOMERS_EDIT,
    Permission::MARKETING_VIEW,
    Permission::MARKETING_CREATE,
    Permission::MARKETING_EDIT,
];

static ACCOUNTS: &[Permission] = &[
    Permission::ORDERS_VIEW,
    Permission::ORDERS_EDIT,
    Permission::ORDERS_FULFILL,
    Permission::CUSTOMERS_VIEW,
    Permission::CUSTOMERS_EDIT,
    Permission::ANALYTICS_VIEW,
    Permission::REPORTS_VIEW,
    Permission::REPORTS_EXPORT,
    Permission::PAYMENTS_VIEW,
    Permission::PAYMENTS_PROCESS,
    Permission::PAYMENTS_REFUND,
];

/// Static role to permission map
pub struct RolePermissionMap;

impl RolePermissionMap {
    /// Declared grants for `role`, in declaration order
    pub fn grants(role: Role) -> &'static [Permission] {
        match role {
            Role::Admin => ADMIN,
            Role::Manager => MANAGER,
            Role::Editor => EDITOR,
            Role::Accounts => ACCOUNTS,
        }
    }

    pub fn lookup(role: Role) -> PermissionSet {
        Self::grants(role).iter().cloned().collect()
    }

    /// Lookup by untyped role name
    pub fn lookup_name(name: &str) -> AuthResult<PermissionSet> {
        let role: Role = name.parse()?;
        Ok(Self::lookup(role))
    }

    /// Lookup by untyped role name, treating an unknown role as having no
    /// permissions
    pub fn permissions_for_name(name: &str) -> PermissionSet {
        match Self::lookup_name(name) {
            Ok(permissions) => permissions,
            Err(e) => {
                warn!("{}, granting no permissions", e);
                PermissionSet::new()
            }
        }
    }

    pub fn entries() -> impl Iterator<Item = (Role, &'static [Permission])> {
        Role::ALL.into_iter().map(|role| (role, Self::grants(role)))
    }
}
