//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! HTTP request handlers

pub mod auth;
pub mod catalog;
pub mod health;
pub mod users;

pub use auth::{login_handler, logout_handler, session_handler};
pub use catalog::{permissions_handler, roles_handler};
pub use health::health_handler;
pub use users::{
    create_user_handler, list_users_handler, update_active_handler, update_permissions_handler,
};
