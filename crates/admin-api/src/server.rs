//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Admin API server

use admin_auth::{init_auth_system, AuthManager};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

use crate::{
    config::ApiConfig,
    error::{ApiError, ApiResult},
    rest::{create_rest_router, AppState},
};

/// Admin API server
pub struct AdminApiServer {
    config: Arc<ApiConfig>,
    auth: Arc<AuthManager>,
}

impl AdminApiServer {
    /// Validate configuration, build the auth core and seed the bootstrap admin
    pub async fn new(config: ApiConfig) -> ApiResult<Self> {
        tracing::info!("Initializing admin API server v{}", crate::ADMIN_API_VERSION);
        config.validate()?;

        let auth = init_auth_system(config.auth.clone()).await?;

        if let Some((email, password)) = config.bootstrap.admin_credentials() {
            auth.users().seed_admin(email, password).await?;
        }

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
        })
    }

    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.auth
    }

    pub fn router(&self) -> Router {
        create_rest_router(AppState {
            config: self.config.clone(),
            auth: self.auth.clone(),
        })
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> ApiResult<()> {
        let address = self.config.http_address();
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to bind {}: {}", address, e)))?;
        tracing::info!("HTTP server listening on {}", address);

        let cleanup = tokio::spawn({
            let auth = self.auth.clone();
            async move {
                let mut interval =
                    tokio::time::interval(Duration::from_secs(crate::REVOCATION_CLEANUP_INTERVAL_SECS));
                loop {
                    interval.tick().await;
                    auth.sessions().cleanup_revoked().await;
                }
            }
        });

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::Internal(format!("HTTP server error: {}", e)));

        cleanup.abort();
        self.auth.shutdown().await?;
        tracing::info!("HTTP server stopped");
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("HTTP server received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_seeds_bootstrap_admin() {
        let mut config = ApiConfig::default();
        config.auth.users.bcrypt_cost = admin_auth::MIN_BCRYPT_COST;
        config.bootstrap.admin_email = Some("admin@example.com".to_string());
        config.bootstrap.admin_password = Some("admin123".to_string());

        let server = AdminApiServer::new(config).await.unwrap();
        let admin = server
            .auth()
            .users()
            .get_user_by_email("admin@example.com")
            .await
            .unwrap();
        assert!(admin.permissions.is_wildcard());
    }

    #[tokio::test]
    async fn test_server_rejects_invalid_config() {
        let mut config = ApiConfig::default();
        config.auth.session.secret = String::new();
        assert!(matches!(
            AdminApiServer::new(config).await,
            Err(ApiError::Configuration(_))
        ));
    }
}
