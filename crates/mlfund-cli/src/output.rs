use mlfund_core::{FetchStatus, UiState};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

/// Top-level JSON document printed for every command.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub command: &'static str,
    pub status: FetchStatus,
    pub ui: UiState,
    pub data: Value,
}

pub fn render(envelope: &Envelope, pretty: bool) -> Result<(), CliError> {
    println!("{}", to_json(envelope, pretty)?);
    Ok(())
}

fn to_json(envelope: &Envelope, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(envelope)?
    } else {
        serde_json::to_string(envelope)?
    };
    Ok(payload)
}
