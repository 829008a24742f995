//! REST API client for the Node Pulse server.
//!
//! DESIGN
//! ======
//! Two traits sit at the network seam: `AuthApi` (login/logout) and
//! `MonitorApi` (read-only list endpoints). `HttpApi` implements both over
//! `reqwest`; stores take the traits so they can be exercised with mocks.
//!
//! Requests are credentialed: the client keeps a cookie store so the
//! server's HttpOnly `session_id` cookie is replayed on every call. There is
//! deliberately no client-side timeout or retry.

use serde::de::DeserializeOwned;

use super::types::{
    AlertRecordDto, AlertRuleDto, ApiErrorBody, ListResponse, LoginRequest, LoginResponse, LogoutResponse, NodeDto,
};
use crate::error::{ApiError, LoginError};

pub const LOGIN_PATH: &str = "/api/v1/auth/login";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";
pub const NODES_PATH: &str = "/api/v1/nodes";
pub const ALERT_RULES_PATH: &str = "/api/v1/alerts/rules";
pub const ALERT_RECORDS_PATH: &str = "/api/v1/alerts/records";

// =============================================================================
// TRAITS
// =============================================================================

/// Credential submission and session revocation.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Submit credentials.
    ///
    /// # Errors
    ///
    /// Returns a typed [`LoginError`] for structured rejections and
    /// [`LoginError::Api`] for transport or decoding failures.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, LoginError>;

    /// Invalidate the server-side session.
    ///
    /// # Errors
    ///
    /// Any non-success status or transport failure.
    async fn logout(&self) -> Result<LogoutResponse, ApiError>;
}

/// Read-only monitoring endpoints.
#[async_trait::async_trait]
pub trait MonitorApi: Send + Sync {
    async fn fetch_nodes(&self) -> Result<Vec<NodeDto>, ApiError>;
    async fn fetch_alert_rules(&self) -> Result<Vec<AlertRuleDto>, ApiError>;
    async fn fetch_alert_records(&self) -> Result<Vec<AlertRecordDto>, ApiError>;
}

/// Everything the application context needs from the server.
pub trait PulseApi: AuthApi + MonitorApi {}

impl<T: AuthApi + MonitorApi> PulseApi for T {}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// `reqwest`-backed implementation of the API traits.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client rooted at `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let (status, text) = read_body(response).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Status { status, body: text });
        }
        let list: ListResponse<T> = serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(list.data)
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, LoginError> {
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let (status, text) = read_body(response).await?;
        parse_login_response(status, &text)
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        let response = self
            .http
            .post(self.url(LOGOUT_PATH))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let (status, text) = read_body(response).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Status { status, body: text });
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MonitorApi for HttpApi {
    async fn fetch_nodes(&self) -> Result<Vec<NodeDto>, ApiError> {
        self.get_list(NODES_PATH).await
    }

    async fn fetch_alert_rules(&self) -> Result<Vec<AlertRuleDto>, ApiError> {
        self.get_list(ALERT_RULES_PATH).await
    }

    async fn fetch_alert_records(&self) -> Result<Vec<AlertRecordDto>, ApiError> {
        self.get_list(ALERT_RECORDS_PATH).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<(u16, String), ApiError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    Ok((status, text))
}

// =============================================================================
// PARSING
// =============================================================================

/// Interpret a login response. Success bodies decode to [`LoginResponse`];
/// failure bodies with a recognizable `{code, message}` become typed
/// rejections; anything else is a plain status error.
pub(crate) fn parse_login_response(status: u16, text: &str) -> Result<LoginResponse, LoginError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(text).map_err(|e| LoginError::Api(ApiError::Parse(e.to_string())));
    }

    match serde_json::from_str::<ApiErrorBody>(text) {
        Ok(body) => Err(LoginError::from_code(&body.code, body.message, body.details.as_ref())),
        Err(_) => Err(LoginError::Api(ApiError::Status { status, body: text.to_owned() })),
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
