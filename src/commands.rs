//! Command handlers.
//!
//! Each handler returns the JSON document `main` prints. Resource commands
//! pass through the same guard as the protected views, so a signed-out
//! session fails fast without a network call.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use client::net::types::{JobQuery, Params, ReportQuery};
use client::util::auth::{Guard, GuardOutcome};
use client::{ApiClient, ApiError, SessionManager, User};
use serde_json::Value;

use crate::cli::{
    Command, InventoryCommand, JobFilterArgs, JobsCommand, ReportFilterArgs, ReportsCommand,
    UsersCommand,
};
use crate::error::AppError;
use crate::routes::{self, Resolution, View};
use crate::state::AppState;

/// Run one command, then apply any navigation the request client forced.
///
/// # Errors
///
/// Returns [`AppError::SessionExpired`] when a request of a signed-in
/// command hit a 401, otherwise the handler's own error.
pub async fn run(state: &mut AppState, command: Command) -> Result<Value, AppError> {
    let signing_in = matches!(command, Command::Login { .. } | Command::Register { .. });
    let result = dispatch(state, command).await;
    let forced = state.navigator.settle(&state.session).await;
    match result {
        Err(AppError::Api(ApiError::Unauthorized)) if forced.is_some() && !signing_in => {
            Err(AppError::SessionExpired)
        }
        other => other,
    }
}

async fn dispatch(state: &mut AppState, command: Command) -> Result<Value, AppError> {
    let session = &state.session;
    match command {
        Command::Login { username, password } => {
            require_guest(session).await?;
            session.login(&username, &password).await?;
            whoami(session).await
        }
        Command::Register { data } => {
            require_guest(session).await?;
            let user = session.register(&parse_json(&data)?).await?;
            profile(user)
        }
        Command::Logout => {
            session.logout().await;
            Ok(serde_json::json!({ "signed_in": false }))
        }
        Command::Whoami => whoami(session).await,
        Command::Open { path } => open(state, &path).await,
        Command::Inventory(cmd) => {
            let api = require_auth(session).await?;
            inventory(api, cmd).await
        }
        Command::Jobs(cmd) => {
            let api = require_auth(session).await?;
            jobs(api, cmd).await
        }
        Command::Reports(cmd) => {
            let api = require_auth(session).await?;
            reports(api, cmd).await
        }
        Command::Users(cmd) => {
            let api = require_auth(session).await?;
            users(api, cmd).await
        }
    }
}

async fn require_auth(session: &SessionManager) -> Result<&ApiClient, AppError> {
    match Guard::Authenticated.evaluate(&session.state().await) {
        GuardOutcome::Render => Ok(session.api()),
        GuardOutcome::Loading | GuardOutcome::Redirect(_) => Err(AppError::NotSignedIn),
    }
}

async fn require_guest(session: &SessionManager) -> Result<(), AppError> {
    let state = session.state().await;
    match Guard::Guest.evaluate(&state) {
        GuardOutcome::Redirect(_) => {
            let name = state.user.map(|u| u.username).unwrap_or_default();
            Err(AppError::AlreadySignedIn(name))
        }
        GuardOutcome::Loading | GuardOutcome::Render => Ok(()),
    }
}

async fn whoami(session: &SessionManager) -> Result<Value, AppError> {
    let user = session.user().await.ok_or(AppError::NotSignedIn)?;
    profile(user)
}

/// The user document plus the name a person would be greeted with.
fn profile(user: User) -> Result<Value, AppError> {
    let display_name = user.display_name();
    let mut value = serde_json::to_value(user)?;
    if let Value::Object(fields) = &mut value {
        fields.insert("display_name".to_owned(), Value::String(display_name));
    }
    Ok(value)
}

async fn open(state: &mut AppState, path: &str) -> Result<Value, AppError> {
    let snapshot = state.session.state().await;
    let (location, resolution) = routes::follow(path, &snapshot);
    state.navigator.navigate(&location);

    let content = match resolution {
        Resolution::Render(view) => render(state.session.api(), view).await?,
        Resolution::Loading | Resolution::Redirect(_) => Value::Null,
    };
    Ok(serde_json::json!({
        "location": location,
        "view": view_name(resolution),
        "content": content,
    }))
}

async fn render(api: &ApiClient, view: View) -> Result<Value, AppError> {
    let content = match view {
        View::Login => {
            serde_json::json!({ "hint": "sign in with `stockroom login --username <name>`" })
        }
        View::Dashboard => api.dashboard_stats().await?,
        View::Inventory => api.list_inventory(&Params::new()).await?,
        View::Jobs => api.list_jobs(&JobQuery::default()).await?,
        View::Reports => api.overdue_items_report().await?,
        View::Users => api.list_users(&Params::new()).await?,
    };
    Ok(content)
}

fn view_name(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::Loading => "loading",
        Resolution::Redirect(_) => "redirect",
        Resolution::Render(View::Login) => "login",
        Resolution::Render(View::Dashboard) => "dashboard",
        Resolution::Render(View::Inventory) => "inventory",
        Resolution::Render(View::Jobs) => "jobs",
        Resolution::Render(View::Reports) => "reports",
        Resolution::Render(View::Users) => "users",
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

async fn inventory(api: &ApiClient, cmd: InventoryCommand) -> Result<Value, AppError> {
    let value = match cmd {
        InventoryCommand::List { params } => api.list_inventory(&parse_params(&params)?).await?,
        InventoryCommand::Get { id } => api.get_inventory_item(id).await?,
        InventoryCommand::Create { data } => {
            api.create_inventory_item(&parse_json(&data)?).await?
        }
        InventoryCommand::Update { id, data } => {
            api.update_inventory_item(id, &parse_json(&data)?).await?
        }
        InventoryCommand::Delete { id } => api.delete_inventory_item(id).await?,
        InventoryCommand::CheckOut { id, data } => {
            api.check_out_item(id, &parse_json(&data)?).await?
        }
        InventoryCommand::CheckIn { id, data } => {
            api.check_in_item(id, &parse_json(&data)?).await?
        }
        InventoryCommand::Categories => api.inventory_categories().await?,
    };
    Ok(value)
}

async fn jobs(api: &ApiClient, cmd: JobsCommand) -> Result<Value, AppError> {
    let value = match cmd {
        JobsCommand::List(filter) => api.list_jobs(&job_query(filter)).await?,
        JobsCommand::Get { id } => api.get_job(id).await?,
        JobsCommand::Create { data } => api.create_job(&parse_json(&data)?).await?,
        JobsCommand::Update { id, data } => api.update_job(id, &parse_json(&data)?).await?,
        JobsCommand::Delete { id } => api.delete_job(id).await?,
        JobsCommand::Assignments { id } => api.job_assignments(id).await?,
        JobsCommand::Dashboard => api.dashboard_stats().await?,
    };
    Ok(value)
}

async fn reports(api: &ApiClient, cmd: ReportsCommand) -> Result<Value, AppError> {
    let value = match cmd {
        ReportsCommand::InventoryUsage(filter) => {
            api.inventory_usage_report(&report_query(filter)).await?
        }
        ReportsCommand::JobSummary(filter) => {
            api.job_summary_report(&report_query(filter)).await?
        }
        ReportsCommand::InventoryStatus(filter) => {
            api.inventory_status_report(&report_query(filter)).await?
        }
        ReportsCommand::OverdueItems => api.overdue_items_report().await?,
    };
    Ok(value)
}

async fn users(api: &ApiClient, cmd: UsersCommand) -> Result<Value, AppError> {
    let value = match cmd {
        UsersCommand::List { params } => api.list_users(&parse_params(&params)?).await?,
        UsersCommand::Get { id } => api.get_user(id).await?,
        UsersCommand::Create { data } => api.create_user(&parse_json(&data)?).await?,
        UsersCommand::Update { id, data } => api.update_user(id, &parse_json(&data)?).await?,
        UsersCommand::Delete { id } => api.delete_user(id).await?,
    };
    Ok(value)
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

fn parse_json(raw: &str) -> Result<Value, AppError> {
    Ok(serde_json::from_str(raw)?)
}

fn parse_params(raw: &[String]) -> Result<Params, AppError> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_owned(), value.to_owned()))
            }
            _ => Err(AppError::InvalidParam(pair.clone())),
        })
        .collect()
}

fn job_query(filter: JobFilterArgs) -> JobQuery {
    JobQuery {
        status: filter.status,
        priority: filter.priority,
        search: filter.search,
        page: filter.page,
        per_page: filter.per_page,
    }
}

fn report_query(filter: ReportFilterArgs) -> ReportQuery {
    ReportQuery {
        start_date: filter.start_date,
        end_date: filter.end_date,
        job_id: filter.job_id,
        user_id: filter.user_id,
        status: filter.status,
        format: filter.format,
    }
}
