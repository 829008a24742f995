//! Wire types for the Node Pulse REST API.
//!
//! Field names follow the server's snake_case JSON. Conversions into the
//! client-side models live next to the models themselves.

use serde::{Deserialize, Serialize};

use crate::state::session::Role;

// =============================================================================
// AUTH
// =============================================================================

/// Body of `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The authenticated user carried in a successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginUser {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

/// Success body of `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub data: LoginUser,
    pub message: String,
    pub timestamp: String,
}

/// Optional structured details attached to a login rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginErrorDetails {
    #[serde(default)]
    pub failed_attempts: Option<u32>,
    #[serde(default)]
    pub remaining_attempts: Option<u32>,
    #[serde(default)]
    pub locked_until: Option<String>,
    #[serde(default)]
    pub lock_duration_minutes: Option<u32>,
}

/// Error body returned by the API on non-success statuses.
///
/// `details` is free-form on the server; anything that is not an object of
/// the known keys decodes as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, deserialize_with = "lenient_details")]
    pub details: Option<LoginErrorDetails>,
}

fn lenient_details<'de, D>(deserializer: D) -> Result<Option<LoginErrorDetails>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Success body of `POST /api/v1/auth/logout`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    pub message: String,
    pub timestamp: String,
}

// =============================================================================
// LIST ENDPOINTS
// =============================================================================

/// `{ "data": [...] }` envelope used by the read-only list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// Node as returned by `GET /api/v1/nodes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDto {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub region: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<crate::state::nodes::NodeStatus>,
}

/// Alert rule as returned by `GET /api/v1/alerts/rules`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRuleDto {
    pub id: String,
    pub metric: crate::state::alerts::AlertMetric,
    pub threshold: f64,
    pub level: crate::state::alerts::AlertLevel,
    #[serde(default)]
    pub node_id: Option<String>,
    pub enabled: bool,
}

/// Alert record as returned by `GET /api/v1/alerts/records`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRecordDto {
    pub id: String,
    pub node_id: String,
    pub metric: String,
    pub level: String,
    pub status: crate::state::alerts::AlertStatus,
    pub timestamp: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
