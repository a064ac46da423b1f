//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Admin account store

pub mod manager;
pub mod model;
pub mod password;
pub mod stats;

pub use manager::UserManager;
pub use model::{AdminUser, NewUser};
pub use stats::UserStats;
