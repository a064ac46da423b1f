//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Session issuing, providers and client-side tracking

pub mod claims;
pub mod manager;
pub mod provider;
pub mod stats;
pub mod tracker;

pub use claims::SessionClaims;
pub use manager::{SessionManager, SignIn};
pub use provider::{LocalSessionProvider, SessionProvider};
pub use stats::SessionStats;
pub use tracker::{SessionState, SessionTracker};
