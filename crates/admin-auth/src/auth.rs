//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Main authorization manager

use std::sync::Arc;
use tracing::info;

use crate::config::AuthConfig;
use crate::error::AuthResult;
use crate::session::{LocalSessionProvider, SessionManager, SessionTracker};
use crate::users::UserManager;

/// Owns the account store and the session manager
pub struct AuthManager {
    config: AuthConfig,
    users: Arc<UserManager>,
    sessions: Arc<SessionManager>,
}

impl AuthManager {
    pub async fn new(config: AuthConfig) -> AuthResult<Self> {
        config.validate()?;

        let users = Arc::new(UserManager::new(config.users.clone(), &config.rbac).await?);
        let sessions = Arc::new(SessionManager::new(config.session.clone(), users.clone())?);

        Ok(Self {
            config,
            users,
            sessions,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn users(&self) -> &Arc<UserManager> {
        &self.users
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Session tracker for an in-process client
    pub fn tracker(&self) -> SessionTracker<LocalSessionProvider> {
        SessionTracker::new(LocalSessionProvider::new(self.sessions.clone()))
    }

    pub async fn shutdown(&self) -> AuthResult<()> {
        let removed = self.sessions.cleanup_revoked().await;
        info!("Auth manager shut down, {} expired revocations dropped", removed);
        Ok(())
    }
}
