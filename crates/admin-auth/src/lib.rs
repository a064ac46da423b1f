//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role and permission authorization for the storefront admin dashboard
//!
//! This crate holds the authorization core of the dashboard: a static
//! permission catalog, the default role to permission map, a pure evaluator
//! over the signed-in principal, and access guards that decide what a view
//! shows while the session resolves or when access is denied.
//!
//! # Features
//!
//! - **Permission catalog**: `<resource>.<action>` tokens grouped by area, plus
//!   the `all` wildcard
//! - **Roles**: `admin`, `manager`, `editor` and `accounts`, each with default grants
//! - **Evaluator**: `has_permission`, `has_role`, `has_all_permissions`,
//!   `is_authenticated` and `authorize`
//! - **Guards**: blocking [`ProtectedRoute`] and conditional [`RoleGuard`]
//! - **Accounts and sessions**: bcrypt-backed account store, signed session
//!   tokens and a client-side [`SessionTracker`]
//!
//! # Quick Start
//!
//! ```rust
//! use admin_auth::{
//!     authorize, has_permission, AccessRequirement, AuthenticatedPrincipal, Denial,
//!     Permission, Role, RolePermissionMap,
//! };
//!
//! let editor = AuthenticatedPrincipal::new(
//!     "u1",
//!     "editor@example.com",
//!     Role::Editor,
//!     RolePermissionMap::lookup(Role::Editor),
//! );
//!
//! assert!(has_permission(Some(&editor), &Permission::PRODUCTS_VIEW));
//!
//! let managers_only = AccessRequirement::authenticated().roles([Role::Admin, Role::Manager]);
//! assert_eq!(
//!     authorize(Some(&editor), &managers_only),
//!     Err(Denial::RoleMismatch { role: Role::Editor })
//! );
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod guard;
pub mod permissions;
pub mod principal;
pub mod requirement;
pub mod roles;
pub mod session;
pub mod users;

// Re-export commonly used types
pub use auth::AuthManager;
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use evaluator::{
    authorize, check_requirement, has_all_permissions, has_permission, has_role, is_authenticated,
};
pub use guard::{GuardState, GuardView, ProtectedRoute, RoleGuard};
pub use permissions::{Permission, PermissionGroup, PermissionSet};
pub use principal::{AuthenticatedPrincipal, SessionUser};
pub use requirement::{AccessRequirement, Denial, OneOrMany};
pub use roles::{Role, RolePermissionMap};
pub use session::{
    LocalSessionProvider, SessionManager, SessionProvider, SessionState, SessionTracker, SignIn,
};
pub use users::{AdminUser, NewUser, UserManager, UserStats};

/// Authorization core version
pub const AUTH_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default session lifetime in seconds (7 days)
pub const DEFAULT_SESSION_EXPIRATION_SECS: u64 = 7 * 24 * 60 * 60;

/// Longest session lifetime accepted, in seconds
pub const MAX_SESSION_EXPIRATION_SECS: u64 = i32::MAX as u64;

/// Default minimum password length
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Lowest bcrypt work factor accepted
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt work factor accepted
pub const MAX_BCRYPT_COST: u32 = 31;

/// Initialize the authorization system
pub async fn init_auth_system(config: AuthConfig) -> AuthResult<AuthManager> {
    tracing::info!("Initializing authorization system v{}", AUTH_VERSION);

    let auth_manager = AuthManager::new(config).await?;

    tracing::info!("Authorization system initialization completed");
    Ok(auth_manager)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auth_system_initialization() {
        let result = init_auth_system(AuthConfig::default()).await;
        assert!(result.is_ok());
    }
}
