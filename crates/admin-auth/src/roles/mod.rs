//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Roles and their default permissions

pub mod map;
pub mod model;

pub use map::RolePermissionMap;
pub use model::Role;
