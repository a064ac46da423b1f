//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Account provisioning handlers

use admin_auth::{
    has_permission, AccessRequirement, AdminUser, AuthenticatedPrincipal, NewUser, Permission,
    Role, RolePermissionMap,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    middleware::CurrentSession,
    rest::AppState,
};

/// Access update body
///
/// A role change without a permission list resets the account to the role's
/// default grants.
#[derive(Debug, Deserialize)]
pub struct UpdateAccessRequest {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

/// Activation update body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActiveRequest {
    pub is_active: bool,
}

/// Callers may only hand out grants they hold themselves, and only a
/// wildcard holder may assign the admin role
fn ensure_can_grant(
    principal: &AuthenticatedPrincipal,
    role: Option<Role>,
    permissions: &[Permission],
) -> ApiResult<()> {
    if role == Some(Role::Admin) && !principal.permissions().is_wildcard() {
        return Err(ApiError::Forbidden(
            "Only a full-access administrator can assign the admin role".to_string(),
        ));
    }

    let withheld: Vec<&str> = permissions
        .iter()
        .filter(|permission| !has_permission(Some(principal), permission))
        .map(Permission::as_str)
        .collect();
    if !withheld.is_empty() {
        warn!(
            "{} tried to grant permissions they do not hold: {}",
            principal.email(),
            withheld.join(", ")
        );
        return Err(ApiError::Forbidden(format!(
            "You cannot grant permissions you do not hold: {}",
            withheld.join(", ")
        )));
    }

    Ok(())
}

/// List accounts
pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> ApiResult<Json<Vec<AdminUser>>> {
    session.require(&AccessRequirement::authenticated().permissions(Permission::USERS_VIEW))?;
    Ok(Json(state.auth.users().list_users().await))
}

/// Provision an account
pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<AdminUser>)> {
    let principal =
        session.require(&AccessRequirement::authenticated().permissions(Permission::USERS_CREATE))?;

    let role = new_user
        .role
        .unwrap_or(state.auth.config().rbac.default_role);
    let granted = match &new_user.permissions {
        Some(permissions) => permissions.as_slice(),
        None => RolePermissionMap::grants(role),
    };
    ensure_can_grant(principal, Some(role), granted)?;

    let user = state.auth.users().create_user(new_user).await?;
    info!("{} provisioned {} as {}", principal.email(), user.email, user.role);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Change an account's role and/or permissions
pub async fn update_permissions_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<UpdateAccessRequest>,
) -> ApiResult<Json<AdminUser>> {
    let principal =
        session.require(&AccessRequirement::authenticated().permissions(Permission::USERS_EDIT))?;

    let users = state.auth.users();
    let user = match (request.role, request.permissions) {
        (None, None) => {
            return Err(ApiError::Validation(
                "Provide a role, a permission list, or both".to_string(),
            ))
        }
        (Some(role), None) => {
            ensure_can_grant(principal, Some(role), RolePermissionMap::grants(role))?;
            users.set_role(&user_id, role, true).await?
        }
        (None, Some(permissions)) => {
            ensure_can_grant(principal, None, &permissions)?;
            users.set_permissions(&user_id, permissions).await?
        }
        (Some(role), Some(permissions)) => {
            ensure_can_grant(principal, Some(role), &permissions)?;
            users.set_access(&user_id, role, permissions).await?
        }
    };

    Ok(Json(user))
}

/// Activate or deactivate an account
pub async fn update_active_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<UpdateActiveRequest>,
) -> ApiResult<Json<AdminUser>> {
    let principal =
        session.require(&AccessRequirement::authenticated().permissions(Permission::USERS_EDIT))?;

    if principal.id() == user_id && !request.is_active {
        return Err(ApiError::Validation(
            "You cannot deactivate your own account".to_string(),
        ));
    }

    let user = state.auth.users().set_active(&user_id, request.is_active).await?;
    Ok(Json(user))
}
