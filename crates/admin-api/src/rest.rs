//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! REST router

use admin_auth::AuthManager;
use axum::{
    body::Body,
    http::{Request, Response},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Span};
use uuid::Uuid;

use crate::{
    config::ApiConfig,
    handlers::{
        create_user_handler, health_handler, list_users_handler, login_handler, logout_handler,
        permissions_handler, roles_handler, session_handler, update_active_handler,
        update_permissions_handler,
    },
    middleware::session_middleware,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub auth: Arc<AuthManager>,
}

/// Create the REST router
pub fn create_rest_router(state: AppState) -> Router {
    let log_requests = state.config.logging.enable_request_logging;
    let log_responses = state.config.logging.enable_response_logging;

    // every event inside a request carries its request id
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            info_span!(
                "request",
                request_id = %Uuid::new_v4(),
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(move |_request: &Request<Body>, _span: &Span| {
            if log_requests {
                info!("Incoming request");
            }
        })
        .on_response(move |response: &Response<Body>, latency: Duration, _span: &Span| {
            if log_responses {
                info!(
                    status = %response.status(),
                    duration_ms = latency.as_millis() as u64,
                    "Request completed"
                );
            }
        });

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(trace)
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/session", get(session_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/permissions", get(permissions_handler))
        .route("/roles", get(roles_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/:id/permissions", put(update_permissions_handler))
        .route("/users/:id/active", put(update_active_handler))
}
