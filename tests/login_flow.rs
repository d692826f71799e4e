mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{spawn_server, MockResponse, RecordingSleeper};
use kosge_client::{
    ui::{LoginFlow, LoginOutcome, NotificationCenter, NotificationKind, DASHBOARD_URL},
    Anchor, ApiClient, ApiError, Config, Environment, HtmlPage, MemoryTokenStore, Site,
    TokenStore, UiEvent, ADMIN_TOKEN_KEY,
};
use serde_json::json;

const LOGIN_PAGE: &str = r#"
    <a id="admin-login-button" href="/admin">Admin</a>
    <div id="admin-login-modal">
        <span class="close">&times;</span>
        <form id="admin-login-form">
            <input id="admin-username" type="text">
            <input id="admin-password" type="password">
            <button type="submit">Login</button>
        </form>
    </div>
"#;

fn last_notification(center: &NotificationCenter) -> (String, NotificationKind) {
    let last = center.active().last().expect("a notification must be shown");
    (last.message().to_owned(), last.kind())
}

#[tokio::test]
async fn empty_username_fails_without_request() {
    let server = spawn_server(vec![]).await;
    let mut flow = LoginFlow::new(server.client(), MemoryTokenStore::new());
    let mut notifications = NotificationCenter::new();

    let outcome = flow.submit(&mut notifications, "   ", "password123").await;

    assert_eq!(
        outcome,
        LoginOutcome::Failed {
            message: "Username and password are required".to_owned(),
            error: ApiError::Validation("Username and password are required".to_owned()),
        }
    );
    assert_eq!(server.hits(), 0);
    assert_eq!(
        last_notification(&notifications),
        (
            "Username and password are required".to_owned(),
            NotificationKind::Error
        )
    );
    assert!(!flow.button().is_disabled());
    assert_eq!(flow.button().label(), "Login");
}

#[tokio::test]
async fn successful_login_stores_token_and_schedules_redirect() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"token": "dummy-token", "user": "admin"}),
    )])
    .await;
    let mut flow = LoginFlow::new(server.client(), MemoryTokenStore::new());
    let mut notifications = NotificationCenter::new();
    flow.open();

    let outcome = flow.submit(&mut notifications, " admin ", "password123").await;

    assert_eq!(
        outcome,
        LoginOutcome::LoggedIn {
            token: Some("dummy-token".to_owned())
        }
    );
    assert_eq!(
        last_notification(&notifications),
        ("Login successful!".to_owned(), NotificationKind::Success)
    );
    assert!(!flow.modal().is_shown());
    assert_eq!(
        flow.tokens().get(ADMIN_TOKEN_KEY).as_deref(),
        Some("dummy-token")
    );
    assert!(flow.redirect_pending());
    assert_eq!(flow.advance(Duration::from_millis(999)), None);
    assert_eq!(flow.advance(Duration::from_millis(1)), Some(DASHBOARD_URL));
    assert_eq!(flow.advance(Duration::from_millis(5_000)), None);
    assert!(!flow.button().is_disabled());

    let body: serde_json::Value =
        serde_json::from_str(&server.requests()[0].body).expect("body must be JSON");
    assert_eq!(body["username"], "admin");
}

#[tokio::test]
async fn login_without_token_still_succeeds() {
    let server = spawn_server(vec![MockResponse::json(StatusCode::OK, json!({"user": "admin"}))])
        .await;
    let mut flow = LoginFlow::new(server.client(), MemoryTokenStore::new());
    let mut notifications = NotificationCenter::new();

    let outcome = flow.submit(&mut notifications, "admin", "password123").await;

    assert_eq!(outcome, LoginOutcome::LoggedIn { token: None });
    assert_eq!(flow.tokens().get(ADMIN_TOKEN_KEY), None);
    assert!(flow.redirect_pending());
}

#[tokio::test]
async fn rejected_credentials_are_retried_then_reported() {
    let unauthorized = MockResponse::json(
        StatusCode::UNAUTHORIZED,
        json!({"error": "Invalid credentials"}),
    );
    let server = spawn_server(vec![
        unauthorized.clone(),
        unauthorized.clone(),
        unauthorized,
    ])
    .await;
    let sleeper = RecordingSleeper::default();
    let config = Config::builder(Environment::Production)
        .api_base_url(server.api_url())
        .max_retries(3)
        .build();
    let client = ApiClient::new(config).with_sleeper(sleeper.clone());
    let mut flow = LoginFlow::new(client, MemoryTokenStore::new());
    let mut notifications = NotificationCenter::new();
    flow.open();

    let outcome = flow.submit(&mut notifications, "admin", "wrong-pass").await;

    let LoginOutcome::Failed { message, error } = outcome else {
        panic!("login must fail");
    };
    assert_eq!(
        message,
        "Authentication failed. Please check your credentials."
    );
    assert_eq!(error.status(), Some(401));
    assert_eq!(server.hits(), 3);
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(1_000), Duration::from_millis(2_000)]
    );
    assert_eq!(
        last_notification(&notifications),
        (message, NotificationKind::Error)
    );
    assert!(flow.modal().is_shown(), "modal stays open on failure");
    assert_eq!(flow.tokens().get(ADMIN_TOKEN_KEY), None);
    assert!(!flow.redirect_pending());
    assert_eq!(flow.button().label(), "Login");
}

#[tokio::test]
async fn site_routes_login_and_navigation() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"token": "dummy-token"}),
    )])
    .await;
    let tokens = MemoryTokenStore::new();
    let mut site = Site::init(&HtmlPage::parse(LOGIN_PAGE), server.client(), &tokens);

    site.dispatch(UiEvent::Click(Anchor::AdminLoginButton));
    assert!(site.login().is_some_and(|login| login.modal().is_shown()));

    let outcome = site
        .submit_login("admin", "password123")
        .await
        .expect("page has a login form");

    assert!(matches!(outcome, LoginOutcome::LoggedIn { .. }));
    assert_eq!(tokens.get(ADMIN_TOKEN_KEY).as_deref(), Some("dummy-token"));
    assert_eq!(site.notifications().active().len(), 1);
    assert_eq!(site.advance(Duration::from_millis(1_000)), Some(DASHBOARD_URL));
}

#[tokio::test]
async fn page_without_login_markup_ignores_submission() {
    let server = spawn_server(vec![]).await;
    let mut site = Site::init(
        &HtmlPage::parse("<main></main>"),
        server.client(),
        MemoryTokenStore::new(),
    );

    assert!(site.submit_login("admin", "password123").await.is_none());
    assert_eq!(server.hits(), 0);
}
