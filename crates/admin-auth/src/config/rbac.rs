//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role-based access control configuration

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Role-based access control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RbacConfig {
    /// Role given to accounts created without an explicit role
    pub default_role: Role,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            default_role: Role::Editor,
        }
    }
}
