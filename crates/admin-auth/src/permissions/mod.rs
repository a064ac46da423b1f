//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Permission catalog and permission tokens

pub mod catalog;
pub mod model;

pub use catalog::{catalog, groups, is_known, PermissionGroup};
pub use model::{Permission, PermissionSet, WILDCARD};
