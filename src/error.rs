//! Error taxonomy for API calls and login attempts.
//!
//! DESIGN
//! ======
//! Transport-level failures (`ApiError`) are kept apart from typed login
//! rejections (`LoginError`). The login flow branches on the rejection kind
//! to pick its messaging; everything it does not recognize collapses into a
//! generic connectivity failure.

use time::OffsetDateTime;

// =============================================================================
// API ERROR
// =============================================================================

/// Errors produced by raw HTTP calls against the Node Pulse API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The API returned a non-success HTTP status.
    #[error("unexpected response status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// LOGIN ERROR
// =============================================================================

pub const CODE_INVALID_CREDENTIALS: &str = "ERR_INVALID_CREDENTIALS";
pub const CODE_ACCOUNT_LOCKED: &str = "ERR_ACCOUNT_LOCKED";
pub const CODE_RATE_LIMITED: &str = "ERR_RATE_LIMITED";
/// Code the API server actually emits for throttled logins.
pub const CODE_RATE_LIMIT_EXCEEDED: &str = "ERR_RATE_LIMIT_EXCEEDED";

/// A failed login attempt, typed by the reason the API gave.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown user or wrong password.
    #[error("{message}")]
    InvalidCredentials { message: String, remaining_attempts: Option<u32> },

    /// Too many failed attempts; the account is locked for a while.
    #[error("{message}")]
    AccountLocked {
        message: String,
        locked_until: Option<OffsetDateTime>,
        lock_duration_minutes: Option<u32>,
    },

    /// The client is being throttled.
    #[error("{message}")]
    RateLimited { message: String },

    /// A structured rejection with a code this client has no branch for.
    #[error("login rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The attempt failed below the API contract.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LoginError {
    /// Wire error code for this failure, or `None` for transport failures.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { .. } => Some(CODE_INVALID_CREDENTIALS),
            Self::AccountLocked { .. } => Some(CODE_ACCOUNT_LOCKED),
            Self::RateLimited { .. } => Some(CODE_RATE_LIMITED),
            Self::Rejected { code, .. } => Some(code),
            Self::Api(_) => None,
        }
    }

    /// Build a typed failure from the `{code, message, details}` error body.
    #[must_use]
    pub fn from_code(code: &str, message: String, details: Option<&crate::net::types::LoginErrorDetails>) -> Self {
        match code {
            CODE_INVALID_CREDENTIALS => Self::InvalidCredentials {
                message,
                remaining_attempts: details.and_then(|d| d.remaining_attempts),
            },
            CODE_ACCOUNT_LOCKED => Self::AccountLocked {
                message,
                locked_until: details
                    .and_then(|d| d.locked_until.as_deref())
                    .and_then(parse_rfc3339),
                lock_duration_minutes: details.and_then(|d| d.lock_duration_minutes),
            },
            CODE_RATE_LIMITED | CODE_RATE_LIMIT_EXCEEDED => Self::RateLimited { message },
            other => Self::Rejected { code: other.to_owned(), message },
        }
    }
}

fn parse_rfc3339(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339).ok()
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
