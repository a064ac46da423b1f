//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! HTTP middleware

pub mod auth;

pub use auth::{bearer_token, session_middleware, CurrentSession};
