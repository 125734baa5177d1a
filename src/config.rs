//! Startup configuration: `.env`, logging, and client settings.

use client::ClientConfig;
use client::config::default_token_file;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::AppError;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Load a `.env` file from the working directory if one exists.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env file: {e}");
        }
    }
}

/// Install the log subscriber. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Client settings from parsed flags (which already fall back to env vars).
///
/// # Errors
///
/// Returns [`AppError::Config`] when the base URL is malformed.
pub fn client_config(cli: &Cli) -> Result<ClientConfig, AppError> {
    let token_file = cli.token_file.clone().unwrap_or_else(default_token_file);
    Ok(ClientConfig::new(&cli.base_url, token_file)?)
}
