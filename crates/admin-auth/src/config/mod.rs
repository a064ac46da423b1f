//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Authorization configuration module

pub mod auth;
pub mod rbac;
pub mod session;
pub mod user;

pub use auth::AuthConfig;
pub use rbac::RbacConfig;
pub use session::SessionConfig;
pub use user::UserConfig;
