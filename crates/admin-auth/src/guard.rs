//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Access guards
//!
//! Guards decide what a view shows for the current session state. They do
//! not render anything themselves: the caller supplies its own content type
//! `C` and turns the returned [`GuardView`] into output.

use tracing::debug;

use crate::evaluator::{authorize, check_requirement};
use crate::requirement::{AccessRequirement, Denial};
use crate::session::SessionState;

/// Guard state derived from a session state and a requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authorized,
    Unauthorized(Denial),
}

/// What a guarded view should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView<C> {
    /// Loading affordance while the session resolves
    Loading,
    /// The protected content
    Content(C),
    /// The caller's fallback
    Fallback(C),
    /// Built-in notice for the denial
    Notice(Denial),
    Nothing,
}

impl<C> GuardView<C> {
    pub fn content(&self) -> Option<&C> {
        match self {
            GuardView::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, GuardView::Content(_))
    }
}

/// Blocking guard for whole pages
///
/// Shows a loading affordance while the session resolves and an explicit
/// denial (the fallback, or a default notice) when access fails.
#[derive(Debug, Clone)]
pub struct ProtectedRoute<C> {
    requirement: AccessRequirement,
    fallback: Option<C>,
}

impl<C: Clone> ProtectedRoute<C> {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self {
            requirement,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: C) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    pub fn state(&self, session: &SessionState) -> GuardState {
        match session {
            SessionState::Loading => GuardState::Loading,
            SessionState::Resolved(principal) => {
                match authorize(principal.as_ref(), &self.requirement) {
                    Ok(()) => GuardState::Authorized,
                    Err(denial) => GuardState::Unauthorized(denial),
                }
            }
        }
    }

    /// `content` is only invoked when access is granted
    pub fn render(&self, session: &SessionState, content: impl FnOnce() -> C) -> GuardView<C> {
        match self.state(session) {
            GuardState::Loading => GuardView::Loading,
            GuardState::Authorized => GuardView::Content(content()),
            GuardState::Unauthorized(denial) => {
                debug!("Protected route denied: {}", denial);
                match &self.fallback {
                    Some(fallback) => GuardView::Fallback(fallback.clone()),
                    None => GuardView::Notice(denial),
                }
            }
        }
    }
}

/// Conditional guard for fragments inside a page
///
/// Shows nothing while loading or on failure unless a fallback is given, and
/// performs no separate authentication check.
#[derive(Debug, Clone)]
pub struct RoleGuard<C> {
    requirement: AccessRequirement,
    fallback: Option<C>,
}

impl<C: Clone> RoleGuard<C> {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self {
            requirement,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: C) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    pub fn state(&self, session: &SessionState) -> GuardState {
        match session {
            SessionState::Loading => GuardState::Loading,
            SessionState::Resolved(principal) => {
                match check_requirement(principal.as_ref(), &self.requirement) {
                    Ok(()) => GuardState::Authorized,
                    Err(denial) => GuardState::Unauthorized(denial),
                }
            }
        }
    }

    pub fn render(&self, session: &SessionState, content: impl FnOnce() -> C) -> GuardView<C> {
        match self.state(session) {
            GuardState::Loading => GuardView::Nothing,
            GuardState::Authorized => GuardView::Content(content()),
            GuardState::Unauthorized(_) => match &self.fallback {
                Some(fallback) => GuardView::Fallback(fallback.clone()),
                None => GuardView::Nothing,
            },
        }
    }
}
