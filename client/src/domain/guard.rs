//! Session guard reacting to authorisation failures from the backend.
//!
//! The backend answers `401 Unauthorized` or `403 Forbidden` whenever a
//! token is missing, expired or insufficient. The guard folds both into one
//! outcome: drop the stored credentials and tell the caller to send the user
//! back through sign-in. Every other fault passes through untouched.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::BackendError;
use crate::domain::session::SessionStore;

/// What the caller should do about a backend fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    /// Fault says nothing about the session; surface it as-is.
    Ignore,
    /// Credentials were rejected; the user must sign in again.
    ReauthenticateRequired,
}

/// Classify a backend fault without touching stored credentials.
///
/// Only `401` and `403` demand reauthentication. Transport and decode faults
/// say nothing about the session, and other statuses are server-side
/// problems retrying may fix.
#[must_use]
pub const fn classify(error: &BackendError) -> GuardAction {
    match error {
        BackendError::Status {
            code: 401 | 403, ..
        } => GuardAction::ReauthenticateRequired,
        BackendError::Status { .. }
        | BackendError::Transport { .. }
        | BackendError::Decode { .. } => GuardAction::Ignore,
    }
}

/// Clears stored credentials whenever the backend rejects them.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    store: Arc<SessionStore>,
}

impl SessionGuard {
    /// Guard the given store.
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Classify `error`, clearing the store when reauthentication is
    /// required.
    #[must_use]
    pub fn intercept(&self, error: &BackendError) -> GuardAction {
        let action = classify(error);
        if action == GuardAction::ReauthenticateRequired {
            self.store.clear();
            warn!(error = %error, "backend rejected credentials, session cleared");
        }
        action
    }
}
