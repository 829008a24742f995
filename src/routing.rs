//! Route table and the protected-route guard.
//!
//! DESIGN
//! ======
//! The guard is evaluated on every navigation into a protected route and
//! never caches: a session can expire while a view is mounted, so each
//! evaluation calls `SessionStore::check_session` again. A denied request
//! is redirected to `/login` with the original location attached so the
//! login flow can return there.

use crate::config::DEFAULT_DESTINATION;
use crate::state::session::SessionStore;

pub const LOGIN_ROUTE: &str = "/login";

/// A navigable location. Only the path is meaningful to this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
}

impl Location {
    #[must_use]
    pub fn new(pathname: impl Into<String>) -> Self {
        Self { pathname: pathname.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Dashboard,
    Nodes,
    NodeDetail(String),
    Comparison,
    AlertRules,
    AlertHistory,
    Export,
    NotFound,
}

impl Route {
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = if trimmed.len() > 1 { trimmed.trim_end_matches('/') } else { trimmed };
        match trimmed {
            "" | "/" => Self::Root,
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/nodes" => Self::Nodes,
            "/comparison" => Self::Comparison,
            "/alerts/rules" => Self::AlertRules,
            "/alerts/history" => Self::AlertHistory,
            "/export" => Self::Export,
            other => match other.strip_prefix("/nodes/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::NodeDetail(id.to_owned()),
                _ => Self::NotFound,
            },
        }
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Root | Self::Login | Self::NotFound)
    }
}

/// Outcome of evaluating the guard for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Replace the current entry with `to`; `from` is restored after login.
    Redirect { to: Location, from: Location },
}

/// Gate a navigation to `requested` on the session's validity.
pub fn guard(session: &mut SessionStore, requested: &Location) -> GuardDecision {
    if session.check_session() {
        return GuardDecision::Allow;
    }
    tracing::debug!(path = %requested.pathname, "protected route denied; redirecting to login");
    GuardDecision::Redirect { to: Location::new(LOGIN_ROUTE), from: requested.clone() }
}

/// Where to go after a successful login. A recorded `/login` never counts.
#[must_use]
pub fn post_login_destination(from: Option<&Location>) -> Location {
    from.filter(|l| Route::parse(&l.pathname) != Route::Login)
        .cloned()
        .unwrap_or_else(|| Location::new(DEFAULT_DESTINATION))
}

#[cfg(test)]
#[path = "routing_test.rs"]
mod tests;
