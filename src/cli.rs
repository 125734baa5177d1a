//! Command-line surface.
//!
//! Every request-client resource action has a subcommand; JSON payloads are
//! passed with `--data` and free-form filters with repeated `--param k=v`.

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client::config::DEFAULT_API_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "stockroom", about = "Stockroom inventory, jobs and reporting client")]
pub struct Cli {
    #[arg(long, env = "STOCKROOM_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub base_url: String,

    /// Where the session token is kept between runs.
    #[arg(long, env = "STOCKROOM_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account from a JSON document and sign in as it.
    Register {
        #[arg(long)]
        data: String,
    },
    /// Sign out and forget the stored token.
    Logout,
    /// Print the signed-in user.
    Whoami,
    /// Open a view by path, following guard redirects.
    Open {
        #[arg(default_value = "/")]
        path: String,
    },
    #[command(subcommand)]
    Inventory(InventoryCommand),
    #[command(subcommand)]
    Jobs(JobsCommand),
    #[command(subcommand)]
    Reports(ReportsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand, Debug)]
pub enum InventoryCommand {
    List {
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    CheckOut {
        id: i64,
        #[arg(long, default_value = "{}")]
        data: String,
    },
    CheckIn {
        id: i64,
        #[arg(long, default_value = "{}")]
        data: String,
    },
    Categories,
}

#[derive(Subcommand, Debug)]
pub enum JobsCommand {
    List(JobFilterArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    Assignments {
        id: i64,
    },
    Dashboard,
}

#[derive(Args, Debug, Default)]
pub struct JobFilterArgs {
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    InventoryUsage(ReportFilterArgs),
    JobSummary(ReportFilterArgs),
    InventoryStatus(ReportFilterArgs),
    OverdueItems,
}

#[derive(Args, Debug, Default)]
pub struct ReportFilterArgs {
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub job_id: Option<i64>,
    #[arg(long)]
    pub user_id: Option<i64>,
    #[arg(long)]
    pub status: Option<String>,
    /// `json` or `csv`.
    #[arg(long)]
    pub format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List {
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
}
