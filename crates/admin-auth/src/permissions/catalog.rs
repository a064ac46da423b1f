//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Static permission catalog
//!
//! The catalog is fixed at compile time. Every token is exposed as an
//! associated constant on [`Permission`] and listed once under its resource
//! group.

use serde::Serialize;

use super::Permission;

/// A named group of related catalog permissions
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PermissionGroup {
    pub name: &'static str,
    pub label: &'static str,
    pub permissions: &'static [Permission],
}

macro_rules! declare_permission_catalog {
    ($($group:literal ($label:literal) {
        $($name:ident = $token:literal),* $(,)?
    }),* $(,)?) => {
        impl Permission {
            $($(
            pub const $name: Self = Self::from_static($token);
            )*)*
        }

        static GROUPS: &[PermissionGroup] = &[
            $(
            PermissionGroup {
                name: $group,
                label: $label,
                permissions: &[$(Permission::$name),*],
            },
            )*
        ];
    };
}

declare_permission_catalog!(
    "users" ("User Management") {
        USERS_VIEW = "users.view",
        USERS_CREATE = "users.create",
        USERS_EDIT = "users.edit",
        USERS_DELETE = "users.delete",
    },
    "products" ("Product Management") {
        PRODUCTS_VIEW = "products.view",
        PRODUCTS_CREATE = "products.create",
        PRODUCTS_EDIT = "products.edit",
        PRODUCTS_DELETE = "products.delete",
    },
    "orders" ("Order Management") {
        ORDERS_VIEW = "orders.view",
        ORDERS_CREATE = "orders.create",
        ORDERS_EDIT = "orders.edit",
        ORDERS_DELETE = "orders.delete",
        ORDERS_FULFILL = "orders.fulfill",
    },
    "customers" ("Customer Management") {
        CUSTOMERS_VIEW = "customers.view",
        CUSTOMERS_CREATE = "customers.create",
        CUSTOMERS_EDIT = "customers.edit",
        CUSTOMERS_DELETE = "customers.delete",
    },
    "analytics" ("Analytics & Reports") {
        ANALYTICS_VIEW = "analytics.view",
        REPORTS_VIEW = "reports.view",
        REPORTS_EXPORT = "reports.export",
    },
    "settings" ("Settings") {
        SETTINGS_VIEW = "settings.view",
        SETTINGS_EDIT = "settings.edit",
    },
    "marketing" ("Marketing") {
        MARKETING_VIEW = "marketing.view",
        MARKETING_CREATE = "marketing.create",
        MARKETING_EDIT = "marketing.edit",
    },
    "payments" ("Payments") {
        PAYMENTS_VIEW = "payments.view",
        PAYMENTS_PROCESS = "payments.process",
        PAYMENTS_REFUND = "payments.refund",
    },
);

/// Catalog permissions grouped by resource group, in declaration order
pub fn groups() -> &'static [PermissionGroup] {
    GROUPS
}

/// Every catalog permission, in declaration order
pub fn catalog() -> impl Iterator<Item = &'static Permission> {
    GROUPS.iter().flat_map(|group| group.permissions.iter())
}

/// Whether `permission` is a catalog entry. The wildcard is not.
pub fn is_known(permission: &Permission) -> bool {
    catalog().any(|known| known == permission)
}

pub(crate) fn find(token: &str) -> Option<&'static Permission> {
    catalog().find(|known| known.as_str() == token)
}
