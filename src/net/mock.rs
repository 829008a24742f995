//! Scriptable in-memory API used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::api::{AuthApi, MonitorApi};
use super::types::{AlertRecordDto, AlertRuleDto, LoginRequest, LoginResponse, LoginUser, LogoutResponse, NodeDto};
use crate::error::{ApiError, LoginError};
use crate::state::session::Role;

/// Successful login for `admin` with id `123`.
pub(crate) fn admin_response() -> LoginResponse {
    LoginResponse {
        data: LoginUser { user_id: "123".into(), username: "admin".into(), role: Role::Admin },
        message: "Login successful".into(),
        timestamp: "2024-01-01T00:00:00Z".into(),
    }
}

#[derive(Default)]
pub(crate) struct MockApi {
    login_results: Mutex<VecDeque<Result<LoginResponse, LoginError>>>,
    last_login: Mutex<Option<LoginRequest>>,
    logout_fails: bool,
    fetch_fails: bool,
    nodes: Vec<NodeDto>,
    rules: Vec<AlertRuleDto>,
    records: Vec<AlertRecordDto>,
    login_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next login call. Unscripted calls succeed as `admin`.
    pub(crate) fn with_login(self, result: Result<LoginResponse, LoginError>) -> Self {
        self.login_results.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn failing_logout(mut self) -> Self {
        self.logout_fails = true;
        self
    }

    pub(crate) fn failing_fetch(mut self) -> Self {
        self.fetch_fails = true;
        self
    }

    pub(crate) fn with_nodes(mut self, nodes: Vec<NodeDto>) -> Self {
        self.nodes = nodes;
        self
    }

    pub(crate) fn with_alerts(mut self, rules: Vec<AlertRuleDto>, records: Vec<AlertRecordDto>) -> Self {
        self.rules = rules;
        self.records = records;
        self
    }

    pub(crate) fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_login(&self) -> Option<LoginRequest> {
        self.last_login.lock().unwrap().clone()
    }

    fn fetch<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fetch_fails {
            return Err(ApiError::Status { status: 500, body: "boom".into() });
        }
        Ok(items.to_vec())
    }
}

#[async_trait::async_trait]
impl AuthApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, LoginError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_login.lock().unwrap() = Some(request.clone());
        self.login_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(admin_response()))
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails {
            return Err(ApiError::Request("connection refused".into()));
        }
        Ok(LogoutResponse { message: "Logout successful".into(), timestamp: "2024-01-01T00:00:00Z".into() })
    }
}

#[async_trait::async_trait]
impl MonitorApi for MockApi {
    async fn fetch_nodes(&self) -> Result<Vec<NodeDto>, ApiError> {
        self.fetch(&self.nodes)
    }

    async fn fetch_alert_rules(&self) -> Result<Vec<AlertRuleDto>, ApiError> {
        self.fetch(&self.rules)
    }

    async fn fetch_alert_records(&self) -> Result<Vec<AlertRecordDto>, ApiError> {
        self.fetch(&self.records)
    }
}
