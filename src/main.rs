use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use fintrack::adapters::{FileSessionStore, ReqwestHttpClient, TerminalNotifier};
use fintrack::api::ApiClient;
use fintrack::cli::{parse_args, run_command, CliCommand};
use fintrack::config::ApiConfig;
use fintrack::session::{AuthNotifications, RouteContext, SessionController, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command = parse_args(std::env::args());

    // Version and help need no session or network.
    match command {
        CliCommand::Version => {
            fintrack::cli::commands::handle_version();
            return Ok(());
        }
        CliCommand::Help => {
            fintrack::cli::commands::handle_help();
            return Ok(());
        }
        _ => {}
    }

    let config = ApiConfig::from_env();
    let persist = FileSessionStore::new()
        .ok_or_else(|| eyre!("Could not determine home directory for session storage"))?;

    let store = SessionStore::new(Arc::new(persist));
    store.load_persisted();

    let http = Arc::new(ReqwestHttpClient::new());
    let api = ApiClient::new(&config, http, store.clone());
    let notifications = AuthNotifications::new(Arc::new(TerminalNotifier::new()));
    let controller = SessionController::new(store, api, notifications);

    // A persisted token is never trusted until the server confirms it.
    let route = startup_route(&command);
    controller.check_on_startup(&route).await;

    run_command(&controller, command).await
}

/// The route the command operates from, for session-loss handling.
fn startup_route(command: &CliCommand) -> RouteContext {
    match command {
        CliCommand::Login { .. } => RouteContext::new("/login"),
        CliCommand::Register { .. } => RouteContext::new("/register"),
        CliCommand::Expenses | CliCommand::AddExpense { .. } => RouteContext::new("/expenses"),
        CliCommand::Budgets => RouteContext::new("/budgets"),
        CliCommand::Savings | CliCommand::Deposit { .. } => RouteContext::new("/savings"),
        CliCommand::Report => RouteContext::new("/reports"),
        _ => RouteContext::new("/dashboard"),
    }
}
