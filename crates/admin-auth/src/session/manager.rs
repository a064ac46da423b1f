//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Server-side session management

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{AuthError, AuthResult};
use crate::principal::SessionUser;
use crate::users::UserManager;

use super::claims::SessionClaims;
use super::stats::SessionStats;

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignIn {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

/// Issues, resolves and revokes session tokens
pub struct SessionManager {
    /// Session configuration
    config: SessionConfig,

    /// Account store sessions resolve against
    users: Arc<UserManager>,

    encoding_key: EncodingKey,

    decoding_key: DecodingKey,

    /// Revoked token IDs and the time their token expires
    revoked: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,

    /// Statistics
    stats: Arc<RwLock<SessionStats>>,
}

impl SessionManager {
    pub fn new(config: SessionConfig, users: Arc<UserManager>) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::configuration(
                "Session secret cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
            users,
            revoked: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(SessionStats::default())),
        })
    }

    /// Check credentials and issue a session token
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignIn> {
        let user = self.users.authenticate(email, password).await?;
        let claims = SessionClaims::new(&user, &self.config)?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("Failed to sign session token: {}", e)))?;

        {
            let mut stats = self.stats.write().await;
            stats.increment_sessions_issued();
        }

        info!("Signed in {} as {}", user.email, user.role);
        Ok(SignIn {
            token,
            expires_at: claims.expires_at(),
            user: user.to_session_user(),
        })
    }

    /// Decode a token and check it has not been revoked
    pub async fn validate_token(&self, token: &str) -> AuthResult<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        let claims = match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                let mut stats = self.stats.write().await;
                stats.increment_validation_failures();
                return Err(match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        AuthError::session_expired("Session has expired".to_string())
                    }
                    _ => AuthError::session_invalid(e.to_string()),
                });
            }
        };

        let revoked = self.revoked.read().await;
        if revoked.contains_key(&claims.jti) {
            return Err(AuthError::session_revoked(format!(
                "Session {} was signed out",
                claims.jti
            )));
        }

        Ok(claims)
    }

    /// Resolve a token to the current state of its account
    ///
    /// Returns `None` when the token is unusable or the account no longer
    /// exists or is inactive.
    pub async fn get_session(&self, token: &str) -> Option<SessionUser> {
        let claims = match self.validate_token(token).await {
            Ok(claims) => claims,
            Err(e) => {
                debug!("No session: {}", e);
                return None;
            }
        };

        let user = self.users.get_user_by_id(&claims.sub).await?;
        if !user.is_active {
            debug!("No session: account {} is inactive", user.email);
            return None;
        }

        Some(user.to_session_user())
    }

    /// Revoke a token until it would have expired anyway
    ///
    /// Tokens that are already unusable are ignored.
    pub async fn sign_out(&self, token: &str) -> AuthResult<()> {
        let claims = match self.validate_token(token).await {
            Ok(claims) => claims,
            Err(e) if e.is_session_failure() => {
                debug!("Sign-out of unusable session ignored: {}", e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        {
            let mut revoked = self.revoked.write().await;
            revoked.insert(claims.jti.clone(), claims.expires_at());
        }

        {
            let mut stats = self.stats.write().await;
            stats.increment_sessions_revoked();
        }

        info!("Signed out session for user {}", claims.sub);
        Ok(())
    }

    /// Forget revocations whose tokens have expired
    pub async fn cleanup_revoked(&self) -> usize {
        let now = Utc::now();
        let mut revoked = self.revoked.write().await;
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > now);

        let removed = before - revoked.len();
        if removed > 0 {
            debug!("Removed {} expired revocations", removed);
        }
        removed
    }

    pub async fn get_stats(&self) -> SessionStats {
        let stats = self.stats.read().await;
        stats.clone()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RbacConfig, UserConfig};
    use crate::roles::Role;
    use crate::users::NewUser;

    async fn setup() -> (Arc<UserManager>, SessionManager) {
        let users = Arc::new(
            UserManager::new(
                UserConfig {
                    bcrypt_cost: crate::MIN_BCRYPT_COST,
                    ..UserConfig::default()
                },
                &RbacConfig::default(),
            )
            .await
            .unwrap(),
        );
        users
            .create_user(NewUser::new("acc@example.com", "Acc", "secret1").with_role(Role::Accounts))
            .await
            .unwrap();
        let sessions = SessionManager::new(SessionConfig::default(), users.clone()).unwrap();
        (users, sessions)
    }

    #[tokio::test]
    async fn test_sign_in_and_resolve() {
        let (_, sessions) = setup().await;
        let sign_in = sessions.sign_in("ACC@example.com", "secret1").await.unwrap();

        assert_eq!(sign_in.user.role.as_deref(), Some("accounts"));
        assert!(sign_in.user.last_login.is_some());
        assert!(sign_in.expires_at > Utc::now());

        let session = sessions.get_session(&sign_in.token).await.unwrap();
        assert_eq!(session.email, "acc@example.com");
        assert_eq!(session.permissions, sign_in.user.permissions);
    }

    #[tokio::test]
    async fn test_sign_in_failures() {
        let (_, sessions) = setup().await;
        assert_eq!(
            sessions.sign_in("acc@example.com", "nope-nope").await.unwrap_err().to_string(),
            "Invalid email or password"
        );
        assert!(sessions.get_session("not-a-token").await.is_none());
    }

    #[tokio::test]
    async fn test_session_reflects_current_account_state() {
        let (users, sessions) = setup().await;
        let sign_in = sessions.sign_in("acc@example.com", "secret1").await.unwrap();

        users
            .set_permissions(&sign_in.user.id, vec![crate::permissions::Permission::ALL])
            .await
            .unwrap();
        let session = sessions.get_session(&sign_in.token).await.unwrap();
        assert_eq!(session.permissions, Some(vec!["all".to_string()]));

        users.set_active(&sign_in.user.id, false).await.unwrap();
        assert!(sessions.get_session(&sign_in.token).await.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() {
        let (_, sessions) = setup().await;
        let sign_in = sessions.sign_in("acc@example.com", "secret1").await.unwrap();

        sessions.sign_out(&sign_in.token).await.unwrap();
        assert!(sessions.get_session(&sign_in.token).await.is_none());
        assert!(matches!(
            sessions.validate_token(&sign_in.token).await,
            Err(AuthError::SessionRevoked(_))
        ));

        // second sign-out is a no-op
        sessions.sign_out(&sign_in.token).await.unwrap();
        assert_eq!(sessions.get_stats().await.sessions_revoked, 1);
        assert_eq!(sessions.cleanup_revoked().await, 0);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (users, sessions) = setup().await;
        let user = users.get_user_by_email("acc@example.com").await.unwrap();
        let config = SessionConfig::default();

        let mut claims = SessionClaims::new(&user, &config).unwrap();
        claims.iat -= 3600;
        claims.nbf -= 3600;
        claims.exp = Utc::now().timestamp() - 60;
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            sessions.validate_token(&token).await,
            Err(AuthError::SessionExpired(_))
        ));
        assert!(sessions.get_session(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_foreign_secret_is_rejected() {
        let (users, sessions) = setup().await;
        let user = users.get_user_by_email("acc@example.com").await.unwrap();
        let claims = SessionClaims::new(&user, &SessionConfig::default()).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"someone-else"),
        )
        .unwrap();

        assert!(matches!(
            sessions.validate_token(&token).await,
            Err(AuthError::SessionInvalid(_))
        ));
    }
}
