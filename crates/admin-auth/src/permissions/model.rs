//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Permission tokens and permission sets

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::catalog;
use crate::error::{AuthError, AuthResult};

/// Reserved token granting every permission, present or future
pub const WILDCARD: &str = "all";

/// A `<resource>.<action>` capability token, or the `all` wildcard
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// The wildcard permission
    pub const ALL: Self = Self::from_static(WILDCARD);

    pub(crate) const fn from_static(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }

    /// Resource half of the token, `None` for the wildcard
    pub fn resource(&self) -> Option<&str> {
        self.0.split_once('.').map(|(resource, _)| resource)
    }

    /// Action half of the token, `None` for the wildcard
    pub fn action(&self) -> Option<&str> {
        self.0.split_once('.').map(|(_, action)| action)
    }
}

fn is_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
}

impl FromStr for Permission {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        if s == WILDCARD {
            return Ok(Self::ALL);
        }

        let Some((resource, action)) = s.split_once('.') else {
            return Err(AuthError::invalid_permission(s));
        };

        if !is_segment(resource) || !is_segment(action) {
            return Err(AuthError::invalid_permission(s));
        }

        Ok(match catalog::find(s) {
            Some(known) => known.clone(),
            None => Self(Cow::Owned(s.to_string())),
        })
    }
}

impl TryFrom<String> for Permission {
    type Error = AuthError;

    fn try_from(value: String) -> AuthResult<Self> {
        value.parse()
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.0.into_owned()
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, duplicate-free collection of permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of raw tokens, failing on the first malformed one
    pub fn parse<I, S>(tokens: I) -> AuthResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| token.as_ref().parse::<Permission>())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Literal membership, without wildcard expansion
    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.contains(&Permission::ALL)
    }

    /// Whether holding this set satisfies `permission`
    pub fn grants(&self, permission: &Permission) -> bool {
        self.is_wildcard() || self.contains(permission)
    }

    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    pub fn remove(&mut self, permission: &Permission) -> bool {
        self.0.remove(permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<T: IntoIterator<Item = Permission>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::collections::btree_set::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for PermissionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let tokens: Vec<&str> = self.0.iter().map(Permission::as_str).collect();
        write!(f, "{}", tokens.join(","))
    }
}
