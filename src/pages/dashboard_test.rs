use super::*;
use crate::net::mock::MockApi;
use crate::net::types::NodeDto;
use crate::state::session::{Identity, Role};

#[test]
fn welcome_guest_without_session() {
    assert_eq!(welcome_line(&SessionStore::new()), "Welcome, Guest");
}

#[test]
fn welcome_names_the_user() {
    let mut session = SessionStore::new();
    session.set_identity(Identity { id: "7".into(), username: "ops".into(), role: Role::Operator });
    assert_eq!(welcome_line(&session), "Welcome, ops");
}

#[tokio::test]
async fn load_fetches_all_three_lists() {
    let api = MockApi::new().with_nodes(vec![NodeDto {
        id: "n1".into(),
        name: "edge".into(),
        ip: "10.0.0.1".into(),
        region: "us".into(),
        tags: None,
        status: None,
    }]);
    let mut nodes = NodesState::default();
    let mut alerts = AlertsState::default();

    load(&api, &mut nodes, &mut alerts).await.unwrap();

    assert_eq!(api.fetch_calls(), 3);
    assert_eq!(nodes.nodes.len(), 1);
}

#[tokio::test]
async fn load_attempts_everything_before_failing() {
    let api = MockApi::new().failing_fetch();
    let mut nodes = NodesState::default();
    let mut alerts = AlertsState::default();

    let err = load(&api, &mut nodes, &mut alerts).await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(api.fetch_calls(), 3);
}

#[tokio::test]
async fn logout_goes_to_login_even_on_failure() {
    let api = MockApi::new().failing_logout();
    let mut session = SessionStore::new();
    session.login(&api, "admin", "Password123").await.unwrap();

    let to = logout(&mut session, &api).await;

    assert_eq!(to, Location::new("/login"));
    assert!(!session.is_authenticated());
}
