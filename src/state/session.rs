//! Session store: the client's single source of truth for "who is logged in".
//!
//! DESIGN
//! ======
//! The store is an explicitly constructed value owned by the application
//! context, never a process-wide singleton. Every mutation goes through
//! `&mut self`, so callers never observe a half-written session.
//!
//! Expiry is detected lazily. `status` is a pure read that reports
//! `Valid | Expired | Absent`; `check_session` is the predicate the route
//! guard uses, and it clears an expired session explicitly at the call site.
//!
//! ERROR HANDLING
//! ==============
//! Login failures propagate typed and leave state untouched. Logout failures
//! are logged and swallowed: local state is always cleared, even when the
//! server cannot be reached or the logout future is dropped mid-flight.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SESSION_EXPIRY;
use crate::error::LoginError;
use crate::net::api::AuthApi;
use crate::net::types::{LoginRequest, LoginUser};

// =============================================================================
// MODEL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
    Viewer,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl From<LoginUser> for Identity {
    fn from(user: LoginUser) -> Self {
        Self { id: user.user_id, username: user.username, role: user.role }
    }
}

/// An installed session. `expires_at` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub expires_at: Option<u64>,
}

/// Result of inspecting the store without mutating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// A session with an expiry still in the future.
    Valid,
    /// A session whose expiry is at or before now.
    Expired,
    /// No expiry information (no session, or an identity installed without one).
    Absent,
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    session: Option<Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(|s| &s.identity)
    }

    /// Role of the current identity. Derived, so it cannot drift from it.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity().map(|i| i.role)
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<u64> {
        self.session.as_ref().and_then(|s| s.expires_at)
    }

    /// Verify credentials with the auth service and install the session.
    ///
    /// # Errors
    ///
    /// Propagates the service's [`LoginError`]; the store is left unchanged.
    pub async fn login<A>(&mut self, api: &A, username: &str, password: &str) -> Result<Session, LoginError>
    where
        A: AuthApi + ?Sized,
    {
        let request = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        let response = api.login(&request).await?;
        Ok(self.install_at(response.data.into(), now_ms()))
    }

    fn install_at(&mut self, identity: Identity, now: u64) -> Session {
        let expires_at = now.saturating_add(duration_ms(SESSION_EXPIRY));
        info!(username = %identity.username, role = %identity.role, expires_at, "session established");
        let session = Session { identity, expires_at: Some(expires_at) };
        self.session = Some(session.clone());
        session
    }

    /// Revoke the server session and clear local state.
    ///
    /// Never fails from the caller's point of view.
    pub async fn logout<A>(&mut self, api: &A)
    where
        A: AuthApi + ?Sized,
    {
        let guard = ClearOnDrop(&mut self.session);
        match api.logout().await {
            Ok(_) => debug!("server session revoked"),
            Err(e) => warn!(error = %e, "logout request failed; clearing local session anyway"),
        }
        drop(guard);
    }

    /// Install an identity without a network round trip and without expiry.
    ///
    /// The route guard treats such a session as having no expiry information
    /// and redirects; use [`Self::set_identity_with_expiry`] for admission.
    pub fn set_identity(&mut self, identity: Identity) {
        self.session = Some(Session { identity, expires_at: None });
    }

    pub fn set_identity_with_expiry(&mut self, identity: Identity, expires_at: u64) {
        self.session = Some(Session { identity, expires_at: Some(expires_at) });
    }

    pub fn clear_auth(&mut self) {
        self.session = None;
    }

    /// Pure inspection against the current wall clock.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status_at(now_ms())
    }

    #[must_use]
    pub fn status_at(&self, now: u64) -> SessionStatus {
        match self.expires_at() {
            None => SessionStatus::Absent,
            Some(expires_at) if expires_at <= now => SessionStatus::Expired,
            Some(_) => SessionStatus::Valid,
        }
    }

    /// Validity predicate. Clears the session when it has expired.
    pub fn check_session(&mut self) -> bool {
        self.check_session_at(now_ms())
    }

    pub(crate) fn check_session_at(&mut self, now: u64) -> bool {
        match self.status_at(now) {
            SessionStatus::Valid => true,
            SessionStatus::Absent => false,
            SessionStatus::Expired => {
                debug!("session expired; clearing");
                self.clear_auth();
                false
            }
        }
    }
}

struct ClearOnDrop<'a>(&'a mut Option<Session>);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        *self.0 = None;
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn duration_ms(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
