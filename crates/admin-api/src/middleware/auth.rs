//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Session resolution middleware
//!
//! Every request gets a [`CurrentSession`] extension. Requests without a
//! usable bearer token carry an empty one; handlers decide whether that is
//! acceptable.

use admin_auth::{authorize, AccessRequirement, AuthenticatedPrincipal, SessionUser};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    error::{ApiError, ApiResult},
    rest::AppState,
};

/// Session attached to a request
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    /// Bearer token as presented
    pub token: Option<String>,

    /// Session payload the token resolved to
    pub user: Option<SessionUser>,

    /// Validated principal
    pub principal: Option<AuthenticatedPrincipal>,
}

impl CurrentSession {
    pub fn principal(&self) -> Option<&AuthenticatedPrincipal> {
        self.principal.as_ref()
    }

    /// Authorize the request, returning the principal on success
    pub fn require(&self, requirement: &AccessRequirement) -> ApiResult<&AuthenticatedPrincipal> {
        authorize(self.principal(), requirement)?;
        self.principal()
            .ok_or_else(|| ApiError::Internal("Authorized request has no principal".to_string()))
    }
}

/// Extract the bearer token from the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Session middleware
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers());
    let mut session = CurrentSession {
        token,
        ..CurrentSession::default()
    };

    if let Some(token) = &session.token {
        if let Some(user) = state.auth.sessions().get_session(token).await {
            match AuthenticatedPrincipal::try_from(user.clone()) {
                Ok(principal) => {
                    debug!("Request authenticated as {}", principal.email());
                    session.principal = Some(principal);
                    session.user = Some(user);
                }
                Err(e) => warn!("Session payload rejected: {}", e),
            }
        }
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}
