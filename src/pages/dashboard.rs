//! Dashboard page: greeting, data loading, and the logout control.

use crate::error::ApiError;
use crate::net::api::{AuthApi, MonitorApi};
use crate::routing::{LOGIN_ROUTE, Location};
use crate::state::alerts::AlertsState;
use crate::state::nodes::NodesState;
use crate::state::session::SessionStore;

/// Greeting shown in the dashboard header.
#[must_use]
pub fn welcome_line(session: &SessionStore) -> String {
    let name = session.identity().map_or("Guest", |i| i.username.as_str());
    format!("Welcome, {name}")
}

/// Fetch nodes, alert rules, and alert records.
///
/// All three are attempted; the first failure is returned.
///
/// # Errors
///
/// Returns the first [`ApiError`] hit while loading.
pub async fn load<A>(api: &A, nodes: &mut NodesState, alerts: &mut AlertsState) -> Result<(), ApiError>
where
    A: MonitorApi + ?Sized,
{
    let nodes_result = nodes.fetch_nodes(api).await;
    let rules_result = alerts.fetch_alert_rules(api).await;
    let records_result = alerts.fetch_alert_records(api).await;
    nodes_result.and(rules_result).and(records_result)
}

/// Log out and return the location to navigate to.
pub async fn logout<A>(session: &mut SessionStore, api: &A) -> Location
where
    A: AuthApi + ?Sized,
{
    session.logout(api).await;
    Location::new(LOGIN_ROUTE)
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
