use std::sync::Arc;

use clap::{Parser, Subcommand};
use node_pulse::app::{App, View};
use node_pulse::config::{ClientConfig, ConfigError};
use node_pulse::error::ApiError;
use node_pulse::net::api::HttpApi;
use node_pulse::pages::login::SubmitOutcome;
use node_pulse::state::alerts::{AlertFilter, AlertLevel, AlertStatus, LevelFilter, StatusFilter};
use node_pulse::state::dashboard::{DashboardFilter, NodeStatusFilter};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("login failed: {0}")]
    Login(String),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "node-pulse", about = "Node Pulse monitoring API client")]
struct Cli {
    /// Overrides `PULSE_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "PULSE_USERNAME")]
    username: String,

    #[arg(long, env = "PULSE_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the authenticated identity.
    Whoami,
    /// List nodes, optionally filtered.
    Nodes {
        #[arg(long)]
        region: Option<String>,
        #[arg(long, value_parser = ["all", "online", "offline"], default_value = "all")]
        status: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List alert rules.
    AlertRules,
    /// List alert records, optionally filtered.
    AlertRecords {
        #[arg(long, value_parser = ["P0", "P1", "P2"])]
        level: Option<String>,
        #[arg(long, value_parser = ["pending", "processing", "resolved"])]
        status: Option<String>,
        #[arg(long)]
        node_id: Option<String>,
    },
}

impl Command {
    fn route(&self) -> &'static str {
        match self {
            Self::Whoami => "/dashboard",
            Self::Nodes { .. } => "/nodes",
            Self::AlertRules => "/alerts/rules",
            Self::AlertRecords { .. } => "/alerts/history",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    let api = Arc::new(HttpApi::new(config.api_base_url.clone())?);
    tracing::info!(base_url = %api.base_url(), "node-pulse client configured");
    let mut app = App::new(config, api);

    // Ask for the protected view first so the guard records where to return.
    app.navigate(cli.command.route());
    match app.submit_login(&cli.username, &cli.password).await {
        SubmitOutcome::Success { .. } => {}
        SubmitOutcome::Invalid => {
            let messages: Vec<_> = app.login_page.errors.iter().map(|e| e.message.clone()).collect();
            return Err(CliError::Login(messages.join("; ")));
        }
        SubmitOutcome::Busy | SubmitOutcome::Failed => {
            let message = app
                .login_page
                .account_locked_message
                .clone()
                .or_else(|| app.login_page.api_error.clone())
                .or_else(|| app.toasts.snapshot().last().and_then(|t| t.message.clone()))
                .unwrap_or_else(|| "unknown error".to_owned());
            return Err(CliError::Login(message));
        }
    }

    let result = run(&mut app, cli.command).await;
    app.logout().await;
    result
}

async fn run(app: &mut App, command: Command) -> Result<(), CliError> {
    if *app.view() == View::Login {
        return Err(CliError::Login("session was not admitted".to_owned()));
    }

    match command {
        Command::Whoami => print_json(&app.session.identity()),
        Command::Nodes { region, status, search } => {
            app.fetch_nodes().await?;
            let status = match status.as_str() {
                "online" => NodeStatusFilter::Online,
                "offline" => NodeStatusFilter::Offline,
                _ => NodeStatusFilter::All,
            };
            app.dashboard.set_filters(DashboardFilter { region, status, search_query: search });
            print_json(&app.dashboard.visible_nodes(&app.nodes.nodes))
        }
        Command::AlertRules => {
            app.fetch_alert_rules().await?;
            print_json(&app.alerts.alert_rules)
        }
        Command::AlertRecords { level, status, node_id } => {
            app.fetch_alert_records().await?;
            let level = match level.as_deref() {
                Some("P0") => LevelFilter::Only(AlertLevel::P0),
                Some("P1") => LevelFilter::Only(AlertLevel::P1),
                Some("P2") => LevelFilter::Only(AlertLevel::P2),
                _ => LevelFilter::All,
            };
            let status = match status.as_deref() {
                Some("pending") => StatusFilter::Only(AlertStatus::Pending),
                Some("processing") => StatusFilter::Only(AlertStatus::Processing),
                Some("resolved") => StatusFilter::Only(AlertStatus::Resolved),
                _ => StatusFilter::All,
            };
            app.alerts.set_filter(AlertFilter { level, status, node_id, search_query: String::new() });
            print_json(&app.alerts.filtered_records())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
