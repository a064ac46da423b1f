//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Sign-in, session and sign-out handlers

use admin_auth::{AuthError, SessionUser, SignIn};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::ApiResult, extract::ApiJson, middleware::CurrentSession, rest::AppState};

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Current session body
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
}

/// Logout response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub signed_out: bool,
}

/// Sign in with email and password
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<SignIn>> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AuthError::invalid_credentials().into());
    }

    let sign_in = state
        .auth
        .sessions()
        .sign_in(&request.email, &request.password)
        .await?;

    Ok(Json(sign_in))
}

/// Current session user, or `null` when signed out
pub async fn session_handler(
    Extension(session): Extension<CurrentSession>,
) -> Json<Option<SessionResponse>> {
    Json(session.user.map(|user| SessionResponse { user }))
}

/// Revoke the presented session token
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> ApiResult<Json<LogoutResponse>> {
    let Some(token) = session.token else {
        return Ok(Json(LogoutResponse { signed_out: false }));
    };

    state.auth.sessions().sign_out(&token).await?;
    if let Some(principal) = session.principal {
        info!("User {} signed out", principal.email());
    }

    Ok(Json(LogoutResponse { signed_out: true }))
}
