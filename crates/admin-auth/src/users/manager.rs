//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Account store

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

use crate::config::{RbacConfig, UserConfig};
use crate::error::{AuthError, AuthResult};
use crate::permissions::{Permission, PermissionSet};
use crate::roles::{Role, RolePermissionMap};

use super::model::{AdminUser, NewUser};
use super::password::{hash_password, verify_password};
use super::stats::UserStats;

/// In-memory admin account store
#[derive(Debug)]
pub struct UserManager {
    /// User configuration
    config: UserConfig,

    /// Role for accounts created without one
    default_role: Role,

    /// Users keyed by ID
    users: Arc<RwLock<HashMap<String, AdminUser>>>,

    /// Normalized email to user ID mapping
    email_to_id: Arc<RwLock<HashMap<String, String>>>,

    /// Statistics
    stats: Arc<RwLock<UserStats>>,

    /// Hash checked against when no account matches a login
    unmatched_hash: OnceCell<String>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserManager {
    pub async fn new(config: UserConfig, rbac: &RbacConfig) -> AuthResult<Self> {
        Ok(Self {
            config,
            default_role: rbac.default_role,
            users: Arc::new(RwLock::new(HashMap::new())),
            email_to_id: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(UserStats::default())),
            unmatched_hash: OnceCell::new(),
        })
    }

    /// Provision a new account
    ///
    /// Without an explicit permission list the account receives the default
    /// grants for its role.
    pub async fn create_user(&self, new_user: NewUser) -> AuthResult<AdminUser> {
        let email = normalize_email(&new_user.email);
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::validation(format!(
                "Invalid email address: {}",
                new_user.email
            )));
        }

        let name = new_user.name.trim().to_string();
        if name.is_empty() {
            return Err(AuthError::validation("Name is required".to_string()));
        }

        self.validate_password(&new_user.password)?;

        let role = new_user.role.unwrap_or(self.default_role);
        let permissions = match new_user.permissions {
            Some(permissions) => permissions.into_iter().collect(),
            None => RolePermissionMap::lookup(role),
        };

        let password_hash = hash_password(&new_user.password, self.config.bcrypt_cost).await?;
        let user = AdminUser::new(email.clone(), name, password_hash, role, permissions);

        {
            let mut email_map = self.email_to_id.write().await;
            if email_map.contains_key(&email) {
                return Err(AuthError::conflict(format!(
                    "User with email {} already exists",
                    email
                )));
            }

            let mut users = self.users.write().await;
            users.insert(user.id.clone(), user.clone());
            email_map.insert(email, user.id.clone());
        }

        {
            let mut stats = self.stats.write().await;
            stats.increment_users_created();
        }

        info!("Created user: {} ({})", user.email, user.role);
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Option<AdminUser> {
        let users = self.users.read().await;
        users.get(user_id).cloned()
    }

    /// Lookup by email, ignoring case and surrounding whitespace
    pub async fn get_user_by_email(&self, email: &str) -> Option<AdminUser> {
        let user_id = {
            let email_map = self.email_to_id.read().await;
            email_map.get(&normalize_email(email)).cloned()
        };

        match user_id {
            Some(user_id) => self.get_user_by_id(&user_id).await,
            None => None,
        }
    }

    /// All accounts, oldest first
    pub async fn list_users(&self) -> Vec<AdminUser> {
        let users = self.users.read().await;
        let mut list: Vec<AdminUser> = users.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
        list
    }

    pub async fn verify_password(&self, user_id: &str, password: &str) -> AuthResult<bool> {
        let user = self
            .get_user_by_id(user_id)
            .await
            .ok_or_else(|| AuthError::user_not_found(user_id.to_string()))?;

        {
            let mut stats = self.stats.write().await;
            stats.increment_password_verifications();
        }

        verify_password(password, &user.password_hash).await
    }

    /// Check credentials and stamp the login
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthResult<AdminUser> {
        let Some(user) = self.get_user_by_email(email).await else {
            debug!("Login rejected: no account for {}", normalize_email(email));
            self.verify_unmatched(password).await;
            self.record_failed_login().await;
            return Err(AuthError::invalid_credentials());
        };

        if !self.verify_password(&user.id, password).await? {
            warn!("Login rejected: wrong password for {}", user.email);
            self.record_failed_login().await;
            return Err(AuthError::invalid_credentials());
        }

        if !user.is_active {
            warn!("Login rejected: account {} is inactive", user.email);
            self.record_failed_login().await;
            return Err(AuthError::account_inactive());
        }

        self.record_login(&user.id).await
    }

    /// Spend one bcrypt verification when no account matches, so unknown
    /// emails take as long to reject as wrong passwords
    async fn verify_unmatched(&self, password: &str) {
        let hash = self
            .unmatched_hash
            .get_or_try_init(|| hash_password("unmatched-account", self.config.bcrypt_cost))
            .await;

        match hash {
            Ok(hash) => {
                if let Err(e) = verify_password(password, hash).await {
                    warn!("Unmatched login verification failed: {}", e);
                }
            }
            Err(e) => warn!("Failed to prepare unmatched login hash: {}", e),
        }
    }

    /// Stamp `last_login` on a successful sign-in
    pub async fn record_login(&self, user_id: &str) -> AuthResult<AdminUser> {
        let user = self
            .update_user(user_id, |user| {
                user.last_login = Some(chrono::Utc::now());
            })
            .await?;

        {
            let mut stats = self.stats.write().await;
            stats.increment_logins();
        }

        Ok(user)
    }

    /// Replace an account's grants
    pub async fn set_permissions(
        &self,
        user_id: &str,
        permissions: Vec<Permission>,
    ) -> AuthResult<AdminUser> {
        let permissions: PermissionSet = permissions.into_iter().collect();
        let user = self
            .update_user(user_id, |user| user.permissions = permissions)
            .await?;

        info!("Updated permissions for {}: {}", user.email, user.permissions);
        Ok(user)
    }

    /// Change an account's role, optionally resetting its grants to the
    /// role defaults
    pub async fn set_role(
        &self,
        user_id: &str,
        role: Role,
        reset_permissions: bool,
    ) -> AuthResult<AdminUser> {
        let user = self
            .update_user(user_id, |user| {
                user.role = role;
                if reset_permissions {
                    user.permissions = RolePermissionMap::lookup(role);
                }
            })
            .await?;

        info!("Changed role for {} to {}", user.email, user.role);
        Ok(user)
    }

    /// Replace role and permission list in one update
    pub async fn set_access(
        &self,
        user_id: &str,
        role: Role,
        permissions: Vec<Permission>,
    ) -> AuthResult<AdminUser> {
        let permissions: PermissionSet = permissions.into_iter().collect();
        let user = self
            .update_user(user_id, |user| {
                user.role = role;
                user.permissions = permissions;
            })
            .await?;

        info!(
            "Changed access for {} to {}: {}",
            user.email, user.role, user.permissions
        );
        Ok(user)
    }

    pub async fn set_active(&self, user_id: &str, is_active: bool) -> AuthResult<AdminUser> {
        let user = self
            .update_user(user_id, |user| user.is_active = is_active)
            .await?;

        info!(
            "{} account {}",
            if is_active { "Activated" } else { "Deactivated" },
            user.email
        );
        Ok(user)
    }

    /// Create the bootstrap admin unless an account with that email exists
    pub async fn seed_admin(&self, email: &str, password: &str) -> AuthResult<AdminUser> {
        if let Some(existing) = self.get_user_by_email(email).await {
            info!("Admin user already exists: {}", existing.email);
            return Ok(existing);
        }

        let new_user = NewUser::new(email, "Admin User", password)
            .with_role(Role::Admin)
            .with_permissions(vec![Permission::ALL]);

        match self.create_user(new_user).await {
            Ok(user) => {
                info!("Seeded admin user: {}", user.email);
                Ok(user)
            }
            // lost a race with a concurrent seed
            Err(AuthError::Conflict(_)) => self
                .get_user_by_email(email)
                .await
                .ok_or_else(|| AuthError::internal(format!("Admin user {} vanished", email))),
            Err(e) => Err(e),
        }
    }

    pub async fn get_stats(&self) -> UserStats {
        let stats = self.stats.read().await;
        stats.clone()
    }

    fn validate_password(&self, password: &str) -> AuthResult<()> {
        if password.chars().count() < self.config.min_password_length {
            return Err(AuthError::validation(format!(
                "Password must be at least {} characters",
                self.config.min_password_length
            )));
        }

        Ok(())
    }

    async fn record_failed_login(&self) {
        let mut stats = self.stats.write().await;
        stats.increment_failed_login_attempts();
    }

    async fn update_user<F>(&self, user_id: &str, update: F) -> AuthResult<AdminUser>
    where
        F: FnOnce(&mut AdminUser),
    {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| AuthError::user_not_found(user_id.to_string()))?;

        update(user);
        user.touch();
        Ok(user.clone())
    }
}
