//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! User configuration

use serde::{Deserialize, Serialize};

/// Account store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Password minimum length
    pub min_password_length: usize,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            min_password_length: crate::DEFAULT_MIN_PASSWORD_LENGTH,
            bcrypt_cost: crate::DEFAULT_BCRYPT_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_default() {
        let config = UserConfig::default();
        assert_eq!(config.min_password_length, 6);
        assert_eq!(config.bcrypt_cost, 10);
    }
}
