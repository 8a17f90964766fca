mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use mlfund_core::FetchStatus;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

fn preprocess() {
    // pick up MLFUND_API_BASE / RUST_LOG from .env
    dotenv::dotenv().ok();

    env_logger::init();
}

#[tokio::main]
async fn main() -> ExitCode {
    preprocess();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            log::error!("{error}");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    log::debug!("command line input recorded: {cli:?}");

    let envelope = commands::run(&cli).await?;
    output::render(&envelope, cli.pretty)?;

    if envelope.status == FetchStatus::Failed {
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}
