//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Password hashing
//!
//! bcrypt is CPU bound, so both operations run on the blocking thread pool.

use crate::error::{AuthError, AuthResult};

/// Hash a password with bcrypt at the given cost
pub async fn hash_password(password: &str, cost: u32) -> AuthResult<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, cost).map_err(|e| AuthError::hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::hashing(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::verify(password, &hash).map_err(|e| AuthError::hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::hashing(format!("Task join error: {}", e)))?
}
