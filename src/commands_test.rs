use std::sync::Arc;

use client::util::auth::LOGIN_PATH;
use client::{MemoryTokenStore, TokenStore};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

async fn app_for(server: &MockServer, token: Option<&str>) -> (AppState, Arc<MemoryTokenStore>) {
    let store = Arc::new(token.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_token));
    let api = ApiClient::new(&server.uri(), store.clone()).unwrap();
    let session = SessionManager::restored(api).await;
    (AppState::with_session(session), store)
}

async fn mount_me(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": 1, "username": "alice", "role": "admin" })),
        )
        .mount(server)
        .await;
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn parse_params_splits_on_first_equals() {
    let params = parse_params(&["search=a=b".to_owned(), " status =open".to_owned()]).unwrap();
    assert_eq!(
        params,
        vec![("search".to_owned(), "a=b".to_owned()), ("status".to_owned(), "open".to_owned())]
    );
}

#[test]
fn parse_params_rejects_missing_equals() {
    let err = parse_params(&["status".to_owned()]).unwrap_err();
    assert!(matches!(err, AppError::InvalidParam(ref p) if p == "status"));
}

#[test]
fn parse_params_rejects_empty_key() {
    assert!(matches!(parse_params(&["=open".to_owned()]), Err(AppError::InvalidParam(_))));
}

#[test]
fn parse_json_reports_invalid_payloads() {
    assert!(matches!(parse_json("{not json"), Err(AppError::InvalidJson(_))));
    assert_eq!(parse_json(r#"{"name":"pump"}"#).unwrap(), serde_json::json!({ "name": "pump" }));
}

#[test]
fn job_query_copies_every_filter() {
    let query = job_query(JobFilterArgs {
        status: Some("active".into()),
        priority: Some("high".into()),
        search: None,
        page: Some(2),
        per_page: Some(25),
    });
    assert_eq!(query.status.as_deref(), Some("active"));
    assert_eq!(query.priority.as_deref(), Some("high"));
    assert!(query.search.is_none());
    assert_eq!(query.page, Some(2));
    assert_eq!(query.per_page, Some(25));
}

#[test]
fn report_query_copies_every_filter() {
    let query = report_query(ReportFilterArgs {
        start_date: Some("2024-01-01".into()),
        end_date: Some("2024-02-01".into()),
        job_id: Some(3),
        user_id: None,
        status: None,
        format: Some("csv".into()),
    });
    assert_eq!(query.start_date.as_deref(), Some("2024-01-01"));
    assert_eq!(query.end_date.as_deref(), Some("2024-02-01"));
    assert_eq!(query.job_id, Some(3));
    assert!(query.user_id.is_none());
    assert_eq!(query.format.as_deref(), Some("csv"));
}

#[test]
fn view_names() {
    assert_eq!(view_name(Resolution::Loading), "loading");
    assert_eq!(view_name(Resolution::Redirect(LOGIN_PATH)), "redirect");
    assert_eq!(view_name(Resolution::Render(View::Jobs)), "jobs");
    assert_eq!(view_name(Resolution::Render(View::Dashboard)), "dashboard");
}

// =============================================================================
// GUARDS
// =============================================================================

#[tokio::test]
async fn resource_commands_require_sign_in() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (mut state, _) = app_for(&server, None).await;
    let err = run(&mut state, Command::Jobs(JobsCommand::Dashboard)).await.unwrap_err();
    assert!(matches!(err, AppError::NotSignedIn));
}

#[tokio::test]
async fn login_while_signed_in_is_refused() {
    let server = MockServer::start().await;
    mount_me(&server).await;

    let (mut state, _) = app_for(&server, Some("abc")).await;
    let command = Command::Login { username: "bob".into(), password: "pw".into() };
    let err = run(&mut state, command).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadySignedIn(ref name) if name == "alice"));
}

#[tokio::test]
async fn whoami_returns_the_profile() {
    let server = MockServer::start().await;
    mount_me(&server).await;

    let (mut state, _) = app_for(&server, Some("abc")).await;
    let user = run(&mut state, Command::Whoami).await.unwrap();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["display_name"], "alice");
}

#[test]
fn profile_prefers_full_name() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 2,
        "username": "bwayne",
        "role": "technician",
        "first_name": "Bruce",
        "last_name": "Wayne",
    }))
    .unwrap();
    let value = profile(user).unwrap();
    assert_eq!(value["display_name"], "Bruce Wayne");
    assert_eq!(value["username"], "bwayne");
}

#[tokio::test]
async fn csv_report_passes_through_as_text() {
    let server = MockServer::start().await;
    mount_me(&server).await;
    Mock::given(method("GET"))
        .and(path("/reports/inventory-status"))
        .and(query_param("format", "csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("status,count\navailable,3\n", "text/csv"))
        .mount(&server)
        .await;

    let (mut state, _) = app_for(&server, Some("abc")).await;
    let filter = ReportFilterArgs { format: Some("csv".into()), ..ReportFilterArgs::default() };
    let command = Command::Reports(ReportsCommand::InventoryStatus(filter));
    let output = run(&mut state, command).await.unwrap();
    assert_eq!(output, Value::String("status,count\navailable,3\n".to_owned()));
}

// =============================================================================
// SESSION EXPIRY
// =============================================================================

#[tokio::test]
async fn rejected_request_expires_session_and_returns_to_login() {
    let server = MockServer::start().await;
    mount_me(&server).await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "error": "Token expired" })),
        )
        .mount(&server)
        .await;

    let (mut state, store) = app_for(&server, Some("abc")).await;
    state.navigator.navigate("/jobs");

    let err = run(&mut state, Command::Jobs(JobsCommand::List(JobFilterArgs::default())))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SessionExpired));
    assert_eq!(state.navigator.location(), LOGIN_PATH);
    assert!(!state.session.is_authenticated().await);
    assert!(store.get().is_none());
}

#[tokio::test]
async fn rejected_login_is_not_reported_as_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let (mut state, _) = app_for(&server, None).await;
    let command = Command::Login { username: "alice".into(), password: "wrong".into() };
    let err = run(&mut state, command).await.unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::Unauthorized)));
}

// =============================================================================
// OPEN / LOGOUT
// =============================================================================

#[tokio::test]
async fn open_unknown_path_while_signed_out_lands_on_login() {
    let server = MockServer::start().await;
    let (mut state, _) = app_for(&server, None).await;

    let output = run(&mut state, Command::Open { path: "/nowhere".into() }).await.unwrap();
    assert_eq!(output["location"], "/login");
    assert_eq!(output["view"], "login");
    assert_eq!(state.navigator.location(), "/login");
}

#[tokio::test]
async fn open_protected_view_renders_content() {
    let server = MockServer::start().await;
    mount_me(&server).await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "jobs": [] })))
        .mount(&server)
        .await;

    let (mut state, _) = app_for(&server, Some("abc")).await;
    let output = run(&mut state, Command::Open { path: "/jobs".into() }).await.unwrap();
    assert_eq!(output["location"], "/jobs");
    assert_eq!(output["view"], "jobs");
    assert_eq!(output["content"], serde_json::json!({ "jobs": [] }));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let server = MockServer::start().await;
    mount_me(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (mut state, store) = app_for(&server, Some("abc")).await;
    let output = run(&mut state, Command::Logout).await.unwrap();
    assert_eq!(output, serde_json::json!({ "signed_in": false }));
    assert!(store.get().is_none());
    assert!(!state.session.is_authenticated().await);
}
