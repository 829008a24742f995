//! Login page state: form validation, submission, and failure messaging.
//!
//! DESIGN
//! ======
//! `LoginPage` is the view model behind the login form. Validation is a pure
//! function run before any network call. `submit` drives one attempt through
//! the session store and maps the outcome onto inline messages, toasts, and
//! a redirect instruction for the caller to act on after `delay`.
//!
//! The loading flag doubles as the data-layer guard against double
//! submission, and it is cleared on every terminal path.

use std::time::Duration;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::config::LOGIN_REDIRECT_DELAY;
use crate::error::LoginError;
use crate::net::api::AuthApi;
use crate::routing::{Location, post_login_destination};
use crate::state::session::SessionStore;
use crate::state::toast::{ToastKind, ToastQueue};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 32;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const MSG_CONNECTION_FAILED: &str = "Connection failed. Please check your network connection.";

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    fn new(field: Field, message: &str) -> Self {
        Self { field, message: message.to_owned() }
    }
}

/// Check the form locally. Username errors come before password errors;
/// at most one error is reported per field.
#[must_use]
pub fn validate_credentials(username: &str, password: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let username_len = username.chars().count();
    if username.trim().is_empty() {
        errors.push(ValidationError::new(Field::Username, "Username is required"));
    } else if username_len < USERNAME_MIN {
        errors.push(ValidationError::new(Field::Username, "Username must be at least 3 characters"));
    } else if username_len > USERNAME_MAX {
        errors.push(ValidationError::new(Field::Username, "Username must be less than 50 characters"));
    }

    let password_len = password.chars().count();
    if password.is_empty() {
        errors.push(ValidationError::new(Field::Password, "Password is required"));
    } else if password_len < PASSWORD_MIN {
        errors.push(ValidationError::new(Field::Password, "Password must be at least 8 characters"));
    } else if password_len > PASSWORD_MAX {
        errors.push(ValidationError::new(Field::Password, "Password must be less than 32 characters"));
    } else {
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !(has_upper && has_lower && has_digit) {
            errors.push(ValidationError::new(
                Field::Password,
                "Password must contain at least one uppercase letter, one lowercase letter, and one digit",
            ));
        }
    }

    errors
}

// =============================================================================
// PAGE STATE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// An attempt is already in flight.
    Busy,
    /// Logged in. Navigate to `redirect_to` once `delay` has elapsed.
    Success { redirect_to: Location, delay: Duration },
    /// The attempt failed; inline messages and toasts describe why.
    Failed,
}

#[derive(Clone, Debug, Default)]
pub struct LoginPage {
    pub username: String,
    pub password: String,
    pub errors: Vec<ValidationError>,
    pub api_error: Option<String>,
    pub account_locked_message: Option<String>,
    pub loading: bool,
    /// Location that triggered the redirect to this page, if any.
    pub redirect_from: Option<Location>,
}

impl LoginPage {
    #[must_use]
    pub fn new(redirect_from: Option<Location>) -> Self {
        Self { redirect_from, ..Self::default() }
    }

    /// First validation message for `field`, for inline display.
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Whether the submit control should be disabled.
    #[must_use]
    pub fn submit_disabled(&self) -> bool {
        self.loading
    }

    /// Validate and submit the form.
    pub async fn submit<A>(&mut self, session: &mut SessionStore, api: &A, toasts: &ToastQueue) -> SubmitOutcome
    where
        A: AuthApi + ?Sized,
    {
        if self.loading {
            return SubmitOutcome::Busy;
        }

        self.api_error = None;
        self.account_locked_message = None;

        self.errors = validate_credentials(&self.username, &self.password);
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid;
        }

        let username = self.username.trim().to_owned();
        let loading = LoadingFlag::raise(&mut self.loading);
        let result = session.login(api, &username, &self.password).await;
        drop(loading);

        match result {
            Ok(_) => {
                toasts.push(ToastKind::Success, "Login successful", Some("Redirecting to dashboard...".to_owned()));
                SubmitOutcome::Success {
                    redirect_to: post_login_destination(self.redirect_from.as_ref()),
                    delay: LOGIN_REDIRECT_DELAY,
                }
            }
            Err(e) => {
                self.apply_failure(&e, toasts);
                SubmitOutcome::Failed
            }
        }
    }

    fn apply_failure(&mut self, error: &LoginError, toasts: &ToastQueue) {
        tracing::info!(code = error.code().unwrap_or("transport"), error = %error, "login failed");
        match error {
            LoginError::InvalidCredentials { .. } => {
                self.api_error = Some(MSG_INVALID_CREDENTIALS.to_owned());
                self.password.clear();
            }
            LoginError::AccountLocked { locked_until, .. } => {
                let until = format_unlock_time(*locked_until);
                self.account_locked_message = Some(format!("Account locked. Please try again after {until}"));
                toasts.push(ToastKind::Warning, "Account locked", Some(format!("Locked until {until}")));
            }
            LoginError::RateLimited { .. } => {
                toasts.push(ToastKind::Error, "Too many attempts", Some("Please try again later".to_owned()));
            }
            LoginError::Rejected { .. } | LoginError::Api(_) => {
                self.api_error = Some(MSG_CONNECTION_FAILED.to_owned());
                toasts.push(
                    ToastKind::Error,
                    "Connection failed",
                    Some("Please check your network connection".to_owned()),
                );
            }
        }
    }

    /// Log out from the login page's sign-out control.
    pub async fn sign_out<A>(&mut self, session: &mut SessionStore, api: &A, toasts: &ToastQueue)
    where
        A: AuthApi + ?Sized,
    {
        session.logout(api).await;
        toasts.push(ToastKind::Success, "Logout successful", Some("You have been logged out".to_owned()));
    }
}

/// Holds the loading flag up for the duration of one attempt; lowers it on
/// drop so a cancelled attempt cannot leave the form disabled.
struct LoadingFlag<'a>(&'a mut bool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Render an unlock time for display, in UTC.
#[must_use]
pub fn format_unlock_time(locked_until: Option<OffsetDateTime>) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    locked_until
        .and_then(|t| t.to_offset(time::UtcOffset::UTC).format(&format).ok())
        .unwrap_or_else(|| "unknown time".to_owned())
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
