//! Session state shared between the backend client and the session guard.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before credentials reach the store. The store
//! itself hands out snapshots so no lock is held while a request is in
//! flight.

use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use zeroize::Zeroizing;

/// Domain error returned when session credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// Token was missing or blank once trimmed.
    EmptyToken,
}

impl fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "bearer token must not be empty"),
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// Bearer credential presented to the backend on mutating calls.
///
/// ## Invariants
/// - The wrapped value is non-empty after trimming.
/// - The value is zeroised on drop and redacted from `Debug` output, so it
///   only leaves the process inside an `Authorization` header.
///
/// # Examples
/// ```
/// use client::domain::session::BearerToken;
///
/// let token = BearerToken::new("abc123").unwrap();
/// assert_eq!(token.as_str(), "abc123");
/// assert_eq!(format!("{token:?}"), "BearerToken(redacted)");
/// ```
#[derive(Clone)]
pub struct BearerToken {
    value: Zeroizing<String>,
}

impl BearerToken {
    /// Wrap a raw token value.
    ///
    /// # Errors
    /// Returns [`SessionValidationError::EmptyToken`] when the value is
    /// blank once trimmed.
    pub fn new(value: &str) -> Result<Self, SessionValidationError> {
        if value.trim().is_empty() {
            return Err(SessionValidationError::EmptyToken);
        }
        Ok(Self {
            value: Zeroizing::new(value.to_owned()),
        })
    }

    /// Raw header value; attach to `Authorization` headers, never to logs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(redacted)")
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.value.as_str() == other.value.as_str()
    }
}

impl Eq for BearerToken {}

/// Coarse authorisation label stored alongside the token.
///
/// The client never interprets the value; route guards on the rendering
/// side decide what an `admin` may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    /// Wrap a raw role label.
    pub fn new(value: &str) -> Self {
        Self(value.to_owned())
    }

    /// Label as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: BearerToken,
    role: Role,
}

impl Session {
    /// Pair a validated token with its role label.
    #[must_use]
    pub fn new(token: BearerToken, role: Role) -> Self {
        Self { token, role }
    }

    /// Token presented to the backend.
    #[must_use]
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Stored authorisation label.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }
}

/// Shared credential store read by the backend client and cleared by the
/// session guard.
///
/// One store is shared across every controller for the lifetime of the app.
/// Reads clone the credentials out, so callers never hold the lock across an
/// await point.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create an empty, signed-out store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored session after a successful sign-in.
    pub fn establish(&self, session: Session) {
        *self.write_lock() = Some(session);
    }

    /// Drop stored credentials, returning the store to the signed-out state.
    pub fn clear(&self) {
        *self.write_lock() = None;
    }

    /// Snapshot of the stored token, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<BearerToken> {
        self.read_lock().as_ref().map(|s| s.token().clone())
    }

    /// Snapshot of the stored role, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read_lock().as_ref().map(|s| s.role().clone())
    }

    /// True while credentials are stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_lock().is_some()
    }

    // Writers only ever replace the Option wholesale, so a poisoned lock
    // still holds a coherent value.
    fn read_lock(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_tokens_are_rejected(#[case] raw: &str) {
        let err = BearerToken::new(raw).expect_err("blank tokens must fail");
        assert_eq!(err, SessionValidationError::EmptyToken);
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let token = BearerToken::new("super-secret").expect("token should validate");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(rendered, "BearerToken(redacted)");
    }

    #[test]
    fn store_hands_out_snapshots_after_sign_in() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.bearer_token(), None);

        let token = BearerToken::new("abc123").expect("token should validate");
        store.establish(Session::new(token.clone(), Role::new("admin")));

        assert!(store.is_authenticated());
        assert_eq!(store.bearer_token(), Some(token));
        assert_eq!(store.role().map(|r| r.as_str().to_owned()), Some("admin".to_owned()));
    }

    #[test]
    fn clearing_signs_the_store_out() {
        let store = SessionStore::new();
        let token = BearerToken::new("abc123").expect("token should validate");
        store.establish(Session::new(token, Role::new("admin")));

        store.clear();

        assert!(!store.is_authenticated());
        assert_eq!(store.bearer_token(), None);
        assert_eq!(store.role(), None);
    }

    #[test]
    fn establishing_twice_keeps_only_the_newest_session() {
        let store = SessionStore::new();
        let first = BearerToken::new("first").expect("token should validate");
        let second = BearerToken::new("second").expect("token should validate");
        store.establish(Session::new(first, Role::new("user")));
        store.establish(Session::new(second.clone(), Role::new("admin")));

        assert_eq!(store.bearer_token(), Some(second));
    }
}
