//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Client-side session tracking
//!
//! The tracker owns the observable session state. Each refresh moves it to
//! [`SessionState::Loading`], fetches once from the provider and publishes
//! the result. When refreshes overlap, only the most recently started one
//! may publish.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::AuthResult;
use crate::principal::AuthenticatedPrincipal;

use super::provider::SessionProvider;

/// Observable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    /// `None` when nobody is signed in or the session could not be used
    Resolved(Option<AuthenticatedPrincipal>),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn principal(&self) -> Option<&AuthenticatedPrincipal> {
        match self {
            SessionState::Resolved(principal) => principal.as_ref(),
            SessionState::Loading => None,
        }
    }
}

/// Tracks the current principal for one client
pub struct SessionTracker<P> {
    provider: P,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
}

impl<P: SessionProvider> SessionTracker<P> {
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            provider,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn principal(&self) -> Option<AuthenticatedPrincipal> {
        self.state.borrow().principal().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Resolve the session again
    ///
    /// Returns the published state, or the current state if a newer refresh
    /// superseded this one.
    pub async fn refresh(&self) -> SessionState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(SessionState::Loading);

        let principal = match self.provider.get_session().await {
            Ok(Some(user)) => match AuthenticatedPrincipal::try_from(user) {
                Ok(principal) => Some(principal),
                Err(e) => {
                    warn!("Discarding unusable session payload: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to fetch session: {}", e);
                None
            }
        };

        self.publish(generation, SessionState::Resolved(principal));
        self.state()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SessionState> {
        let user = self.provider.sign_in(email, password).await?;
        info!("Signed in as {}", user.email);
        Ok(self.refresh().await)
    }

    /// Sign out and clear the principal, even if the provider call fails
    pub async fn sign_out(&self) -> AuthResult<()> {
        let result = self.provider.sign_out().await;
        if let Err(e) = &result {
            warn!("Sign-out failed: {}", e);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(generation, SessionState::Resolved(None));
        result
    }

    fn publish(&self, generation: u64, state: SessionState) {
        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = state;
            true
        });

        if !published {
            debug!("Discarded stale session resolution {}", generation);
        }
    }
}
