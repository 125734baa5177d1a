mod cli;
mod commands;
mod config;
mod error;
mod navigation;
mod routes;
mod state;

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use crate::cli::Cli;
use crate::error::AppError;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    config::load_dotenv();
    config::init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let client_config = config::client_config(&cli)?;
    let mut state = AppState::start(&client_config).await?;
    let output = commands::run(&mut state, cli.command).await?;
    match output {
        Value::String(text) => print!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}
