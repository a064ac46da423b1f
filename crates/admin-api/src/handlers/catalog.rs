//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Permission catalog and role handlers

use admin_auth::{
    permissions, AccessRequirement, Permission, PermissionGroup, Role, RolePermissionMap,
};
use axum::{Extension, Json};
use serde::Serialize;

use crate::{error::ApiResult, middleware::CurrentSession};

/// Catalog view for the signed-in user
#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
    pub role: Role,
    /// Permissions held by the caller
    pub granted: Vec<String>,
    pub groups: &'static [PermissionGroup],
}

/// Role and its default grants
#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub role: Role,
    pub description: &'static str,
    pub permissions: &'static [Permission],
}

/// Permission catalog plus the caller's own grants
pub async fn permissions_handler(
    Extension(session): Extension<CurrentSession>,
) -> ApiResult<Json<PermissionsResponse>> {
    let principal = session.require(&AccessRequirement::authenticated())?;

    Ok(Json(PermissionsResponse {
        role: principal.role(),
        granted: principal.permissions().to_strings(),
        groups: permissions::groups(),
    }))
}

/// Roles and their default grants
pub async fn roles_handler(
    Extension(session): Extension<CurrentSession>,
) -> ApiResult<Json<Vec<RoleSummary>>> {
    session.require(&AccessRequirement::authenticated().permissions(Permission::USERS_VIEW))?;

    let roles = RolePermissionMap::entries()
        .map(|(role, permissions)| RoleSummary {
            role,
            description: role.description(),
            permissions,
        })
        .collect();

    Ok(Json(roles))
}
