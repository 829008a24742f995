use super::*;

#[test]
fn login_request_serializes_snake_case() {
    let req = LoginRequest { username: "admin".into(), password: "Password123".into() };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json, serde_json::json!({"username": "admin", "password": "Password123"}));
}

#[test]
fn login_response_decodes() {
    let raw = r#"{
        "data": {"user_id": "123", "username": "admin", "role": "admin"},
        "message": "Login successful",
        "timestamp": "2024-01-01T00:00:00Z"
    }"#;
    let resp: LoginResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.data.user_id, "123");
    assert_eq!(resp.data.role, Role::Admin);
}

#[test]
fn login_response_rejects_unknown_role() {
    let raw = r#"{"data": {"user_id": "1", "username": "x", "role": "root"}, "message": "", "timestamp": ""}"#;
    assert!(serde_json::from_str::<LoginResponse>(raw).is_err());
}

#[test]
fn error_body_with_lock_details() {
    let raw = r#"{
        "code": "ERR_ACCOUNT_LOCKED",
        "message": "Account locked",
        "details": {"failed_attempts": 5, "locked_until": "2024-01-01T12:30:00Z", "lock_duration_minutes": 15}
    }"#;
    let body: ApiErrorBody = serde_json::from_str(raw).unwrap();
    let details = body.details.unwrap();
    assert_eq!(details.failed_attempts, Some(5));
    assert_eq!(details.locked_until.as_deref(), Some("2024-01-01T12:30:00Z"));
    assert_eq!(details.remaining_attempts, None);
}

#[test]
fn error_body_without_details() {
    let body: ApiErrorBody = serde_json::from_str(r#"{"code": "ERR_X", "message": "m"}"#).unwrap();
    assert!(body.details.is_none());
}

#[test]
fn error_body_with_non_object_details() {
    let body: ApiErrorBody =
        serde_json::from_str(r#"{"code": "ERR_X", "message": "m", "details": "invalid json"}"#).unwrap();
    assert_eq!(body.code, "ERR_X");
    assert!(body.details.is_none());
}

#[test]
fn node_dto_optional_fields_default() {
    let raw = r#"{"id": "n1", "name": "edge", "ip": "10.0.0.1", "region": "us"}"#;
    let node: NodeDto = serde_json::from_str(raw).unwrap();
    assert_eq!(node.tags, None);
    assert_eq!(node.status, None);
}

#[test]
fn list_response_unwraps_data() {
    let raw = r#"{"data": [{"id": "r1", "metric": "packet_loss_rate", "threshold": 0.5, "level": "P1", "enabled": true}]}"#;
    let list: ListResponse<AlertRuleDto> = serde_json::from_str(raw).unwrap();
    assert_eq!(list.data.len(), 1);
    assert_eq!(list.data[0].metric, crate::state::alerts::AlertMetric::PacketLossRate);
    assert_eq!(list.data[0].node_id, None);
}
