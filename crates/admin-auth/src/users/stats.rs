//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Account store statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Account store statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserStats {
    /// Number of accounts created
    pub users_created: u64,

    /// Number of password verifications
    pub password_verifications: u64,

    /// Number of successful logins
    pub logins: u64,

    /// Number of rejected login attempts
    pub failed_login_attempts: u64,

    /// Last account created
    pub last_user_created: Option<DateTime<Utc>>,

    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,
}

impl UserStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_users_created(&mut self) {
        self.users_created += 1;
        self.last_user_created = Some(Utc::now());
    }

    pub fn increment_password_verifications(&mut self) {
        self.password_verifications += 1;
    }

    pub fn increment_logins(&mut self) {
        self.logins += 1;
        self.last_login = Some(Utc::now());
    }

    pub fn increment_failed_login_attempts(&mut self) {
        self.failed_login_attempts += 1;
    }
}
