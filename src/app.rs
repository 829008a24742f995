//! Application context.
//!
//! DESIGN
//! ======
//! `App` is constructed explicitly and owns the API handle plus every state
//! container, replacing module-level singletons. Views reach state through
//! it, and tests build one per case with a mock API.
//!
//! Navigation resolves the route table, runs the guard for protected
//! routes on every call, and records where a denied request was headed so
//! the login page can return there.

use std::sync::Arc;

use crate::config::{ClientConfig, DEFAULT_DESTINATION};
use crate::error::ApiError;
use crate::net::api::PulseApi;
use crate::pages::dashboard;
use crate::pages::login::{LoginPage, SubmitOutcome};
use crate::routing::{GuardDecision, LOGIN_ROUTE, Location, Route, guard};
use crate::state::alerts::AlertsState;
use crate::state::dashboard::DashboardState;
use crate::state::nodes::NodesState;
use crate::state::session::SessionStore;
use crate::state::toast::ToastQueue;

/// What is currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    /// A protected route with no dedicated page yet.
    Protected(Route),
    NotFound,
}

pub struct App {
    api: Arc<dyn PulseApi>,
    pub config: ClientConfig,
    pub session: SessionStore,
    pub nodes: NodesState,
    pub alerts: AlertsState,
    pub dashboard: DashboardState,
    pub toasts: ToastQueue,
    pub login_page: LoginPage,
    location: Location,
    view: View,
}

impl App {
    #[must_use]
    pub fn new(config: ClientConfig, api: Arc<dyn PulseApi>) -> Self {
        let dashboard = DashboardState::from_config(&config);
        Self {
            api,
            config,
            session: SessionStore::new(),
            nodes: NodesState::default(),
            alerts: AlertsState::default(),
            dashboard,
            toasts: ToastQueue::new(),
            login_page: LoginPage::default(),
            location: Location::new(LOGIN_ROUTE),
            view: View::Login,
        }
    }

    #[must_use]
    pub fn api(&self) -> &dyn PulseApi {
        &*self.api
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Navigate to `path`, redirecting to the login page when the session
    /// does not admit a protected route.
    pub fn navigate(&mut self, path: &str) -> &View {
        let requested = Location::new(path);
        let route = Route::parse(path);

        match route {
            Route::Root => return self.navigate(DEFAULT_DESTINATION),
            Route::Login => self.show_login(requested, None),
            Route::NotFound => {
                self.location = requested;
                self.view = View::NotFound;
            }
            route => match guard(&mut self.session, &requested) {
                GuardDecision::Allow => {
                    self.location = requested;
                    self.view = if route == Route::Dashboard { View::Dashboard } else { View::Protected(route) };
                }
                GuardDecision::Redirect { to, from } => self.show_login(to, Some(from)),
            },
        }
        &self.view
    }

    /// Re-evaluate the current location, as a re-render would.
    pub fn refresh(&mut self) -> &View {
        let path = self.location.pathname.clone();
        self.navigate(&path)
    }

    fn show_login(&mut self, at: Location, redirect_from: Option<Location>) {
        self.location = at;
        self.login_page = LoginPage::new(redirect_from);
        self.view = View::Login;
    }

    /// Fill in and submit the login form. On success, waits out the
    /// redirect delay and navigates to the recorded destination.
    pub async fn submit_login(&mut self, username: &str, password: &str) -> SubmitOutcome {
        self.login_page.username = username.to_owned();
        self.login_page.password = password.to_owned();

        let outcome = self
            .login_page
            .submit(&mut self.session, &*self.api, &self.toasts)
            .await;

        if let SubmitOutcome::Success { redirect_to, delay } = &outcome {
            tokio::time::sleep(*delay).await;
            self.navigate(&redirect_to.pathname);
        }
        outcome
    }

    /// Log out from the dashboard and return to the login page.
    pub async fn logout(&mut self) -> &View {
        let to = dashboard::logout(&mut self.session, &*self.api).await;
        self.navigate(&to.pathname)
    }

    /// Load the dashboard's data.
    ///
    /// # Errors
    ///
    /// Returns the first fetch failure.
    pub async fn load_dashboard(&mut self) -> Result<(), ApiError> {
        dashboard::load(&*self.api, &mut self.nodes, &mut self.alerts).await
    }

    /// # Errors
    ///
    /// Propagates the fetch failure; the node list is left as-is.
    pub async fn fetch_nodes(&mut self) -> Result<(), ApiError> {
        self.nodes.fetch_nodes(&*self.api).await
    }

    /// # Errors
    ///
    /// Propagates the fetch failure.
    pub async fn fetch_alert_rules(&mut self) -> Result<(), ApiError> {
        self.alerts.fetch_alert_rules(&*self.api).await
    }

    /// # Errors
    ///
    /// Propagates the fetch failure.
    pub async fn fetch_alert_records(&mut self) -> Result<(), ApiError> {
        self.alerts.fetch_alert_records(&*self.api).await
    }

    #[must_use]
    pub fn welcome_line(&self) -> String {
        dashboard::welcome_line(&self.session)
    }

    /// Application-level reset: drop the session and every mirrored list.
    pub fn reset(&mut self) {
        self.session.clear_auth();
        self.nodes = NodesState::default();
        self.alerts = AlertsState::default();
        self.dashboard = DashboardState::from_config(&self.config);
        self.toasts.clear();
        self.show_login(Location::new(LOGIN_ROUTE), None);
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
