//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Session statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Session statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    /// Sessions issued
    pub sessions_issued: u64,

    /// Sessions revoked by sign-out
    pub sessions_revoked: u64,

    /// Tokens that failed validation
    pub validation_failures: u64,

    /// Last session issued
    pub last_session_issued: Option<DateTime<Utc>>,
}

impl SessionStats {
    pub fn increment_sessions_issued(&mut self) {
        self.sessions_issued += 1;
        self.last_session_issued = Some(Utc::now());
    }

    pub fn increment_sessions_revoked(&mut self) {
        self.sessions_revoked += 1;
    }

    pub fn increment_validation_failures(&mut self) {
        self.validation_failures += 1;
    }
}
