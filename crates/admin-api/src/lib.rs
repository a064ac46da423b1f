//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! HTTP admin API for the storefront dashboard
//!
//! Exposes sign-in, session lookup and sign-out, plus permission-gated
//! account provisioning, on top of the `admin-auth` core.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod rest;
pub mod server;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use extract::ApiJson;
pub use rest::{create_rest_router, AppState};
pub use server::AdminApiServer;

/// Admin API version
pub const ADMIN_API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interval between sweeps of expired session revocations, in seconds
pub const REVOCATION_CLEANUP_INTERVAL_SECS: u64 = 60 * 60;
