use mlfund_core::store::selectors;
use mlfund_core::{AppState, CompanySummary, Dispatcher, ResourceState};
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CompaniesResponseData<'a> {
    #[serde(flatten)]
    resource: &'a ResourceState,
    companies: &'a [CompanySummary],
}

pub async fn run(dispatcher: &Dispatcher) -> Result<CommandResult, CliError> {
    let state = dispatcher.fetch_companies().await;
    response(&state)
}

fn response(state: &AppState) -> Result<CommandResult, CliError> {
    let resource = selectors::company_list_status(state);
    let data = serde_json::to_value(CompaniesResponseData {
        resource,
        companies: selectors::companies(state),
    })?;

    Ok(CommandResult {
        status: resource.status,
        data,
    })
}
