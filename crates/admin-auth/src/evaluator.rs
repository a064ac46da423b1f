//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Authorization evaluator
//!
//! Pure checks over an optional principal. Absence of a principal never
//! errors; it simply fails every check except an unrestricted
//! [`check_requirement`].

use tracing::debug;

use crate::permissions::Permission;
use crate::principal::AuthenticatedPrincipal;
use crate::requirement::{AccessRequirement, Denial, OneOrMany};
use crate::roles::Role;

/// True iff the principal holds `permission` or the wildcard
pub fn has_permission(principal: Option<&AuthenticatedPrincipal>, permission: &Permission) -> bool {
    principal.map_or(false, |p| p.permissions().grants(permission))
}

/// True iff the principal's role is one of `roles`. No hierarchy applies.
pub fn has_role(principal: Option<&AuthenticatedPrincipal>, roles: impl Into<OneOrMany<Role>>) -> bool {
    role_among(principal, roles.into().as_slice())
}

/// AND over [`has_permission`]; true for an empty list
pub fn has_all_permissions(
    principal: Option<&AuthenticatedPrincipal>,
    permissions: &[Permission],
) -> bool {
    permissions
        .iter()
        .all(|permission| has_permission(principal, permission))
}

pub fn is_authenticated(principal: Option<&AuthenticatedPrincipal>) -> bool {
    principal.is_some()
}

/// Full evaluation: authentication, then roles, then permissions
pub fn authorize(
    principal: Option<&AuthenticatedPrincipal>,
    requirement: &AccessRequirement,
) -> Result<(), Denial> {
    if !is_authenticated(principal) {
        debug!("Access denied: no authenticated principal");
        return Err(Denial::NotAuthenticated);
    }

    check_requirement(principal, requirement)
}

/// Role and permission checks without the authentication step
///
/// An unrestricted requirement passes even without a principal.
pub fn check_requirement(
    principal: Option<&AuthenticatedPrincipal>,
    requirement: &AccessRequirement,
) -> Result<(), Denial> {
    let roles = requirement.required_roles();
    if !roles.is_empty() && !role_among(principal, roles) {
        debug!(
            "Access denied: role {:?} not in {:?}",
            principal.map(|p| p.role()),
            roles
        );
        return Err(match principal {
            Some(p) => Denial::RoleMismatch { role: p.role() },
            None => Denial::NotAuthenticated,
        });
    }

    let missing: Vec<Permission> = requirement
        .required_permissions()
        .iter()
        .filter(|permission| !has_permission(principal, permission))
        .cloned()
        .collect();

    if !missing.is_empty() {
        debug!("Access denied: missing permissions {:?}", missing);
        return Err(match principal {
            Some(_) => Denial::PermissionMismatch { missing },
            None => Denial::NotAuthenticated,
        });
    }

    Ok(())
}

fn role_among(principal: Option<&AuthenticatedPrincipal>, roles: &[Role]) -> bool {
    principal.map_or(false, |p| roles.contains(&p.role()))
}
