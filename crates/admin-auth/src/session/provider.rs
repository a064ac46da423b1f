//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Session provider abstraction

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AuthResult;
use crate::principal::SessionUser;

use super::manager::SessionManager;

/// Source of the current session
///
/// `get_session` resolves to `None` when nobody is signed in. Errors mean the
/// session could not be fetched at all.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn get_session(&self) -> AuthResult<Option<SessionUser>>;

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SessionUser>;

    async fn sign_out(&self) -> AuthResult<()>;
}

#[async_trait]
impl<P: SessionProvider + ?Sized> SessionProvider for Arc<P> {
    async fn get_session(&self) -> AuthResult<Option<SessionUser>> {
        (**self).get_session().await
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SessionUser> {
        (**self).sign_in(email, password).await
    }

    async fn sign_out(&self) -> AuthResult<()> {
        (**self).sign_out().await
    }
}

/// Provider backed by an in-process [`SessionManager`] and a token slot
pub struct LocalSessionProvider {
    manager: Arc<SessionManager>,
    token: RwLock<Option<String>>,
}

impl LocalSessionProvider {
    pub fn new(manager: Arc<SessionManager>) -> Self {
        Self {
            manager,
            token: RwLock::new(None),
        }
    }

    /// Provider resuming an existing session token
    pub fn with_token(manager: Arc<SessionManager>, token: String) -> Self {
        Self {
            manager,
            token: RwLock::new(Some(token)),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    async fn get_session(&self) -> AuthResult<Option<SessionUser>> {
        let token = self.token.read().await.clone();
        match token {
            Some(token) => Ok(self.manager.get_session(&token).await),
            None => Ok(None),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SessionUser> {
        let sign_in = self.manager.sign_in(email, password).await?;
        *self.token.write().await = Some(sign_in.token);
        Ok(sign_in.user)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let token = self.token.write().await.take();
        if let Some(token) = token {
            self.manager.sign_out(&token).await?;
        }
        Ok(())
    }
}
