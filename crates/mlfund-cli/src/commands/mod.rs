mod companies;
mod company;

use std::sync::Arc;

use mlfund_core::store::selectors;
use mlfund_core::{
    Action, Dispatcher, FetchStatus, GatewayConfig, HttpGateway, Snapshot, Store, Theme,
};
use serde_json::Value;

use crate::cli::{Cli, Command, ThemeArg};
use crate::error::CliError;
use crate::output::Envelope;

pub struct CommandResult {
    pub status: FetchStatus,
    pub data: Value,
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let config = match &cli.base_url {
        Some(base_url) => GatewayConfig::new(base_url)?,
        None => GatewayConfig::from_env()?,
    };
    log::info!("using backend {}", config.base_url());

    let store = Arc::new(Store::new());
    let subscription = store.subscribe(log_transition);

    if let Some(theme) = cli.theme {
        store.dispatch(Action::set_theme(to_theme(theme)));
    }
    if cli.sidebar_toggle {
        store.dispatch(Action::toggle_sidebar());
    }

    let dispatcher = Dispatcher::new(Arc::clone(&store), Arc::new(HttpGateway::new(config)));
    let (command, result) = match &cli.command {
        Command::Companies => ("companies", companies::run(&dispatcher).await?),
        Command::Company(args) => ("company", company::run(args, &dispatcher).await?),
    };
    subscription.unsubscribe();

    Ok(Envelope {
        command,
        status: result.status,
        ui: selectors::ui(&store.get_state()),
        data: result.data,
    })
}

fn to_theme(theme: ThemeArg) -> Theme {
    match theme {
        ThemeArg::Light => Theme::Light,
        ThemeArg::Dark => Theme::Dark,
    }
}

fn log_transition(state: &Snapshot) {
    log::debug!(
        "state: companies={} ({}), financials cached={}, theme={}, sidebar_open={}",
        state.companies.list.len(),
        state.companies.list_status.status.as_str(),
        state.companies.financials.len(),
        state.ui.theme,
        state.ui.sidebar_open
    );
}
