mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::{
    spawn_server, spawn_truncating_server, MockResponse, RecordingSleeper,
};
use kosge_client::{
    describe_error, ApiClient, ApiError, Config, Environment, Participant, RequestOptions,
};
use serde_json::{json, Value as JsonValue};

#[tokio::test]
async fn request_returns_decoded_json() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"status": "healthy", "participants_count": 3}),
    )])
    .await;
    let client = server.client();

    let health = client.health().await.expect("health must succeed");

    assert!(health.is_healthy());
    assert_eq!(health.participants_count, Some(3));
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/api/health");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn error_status_carries_status_and_decoded_body() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::BAD_REQUEST,
        json!({"error": "Title and content are required"}),
    )])
    .await;

    let err = server
        .client()
        .request("/cms/content/about", RequestOptions::post(json!({})))
        .await
        .expect_err("request must fail");

    assert_eq!(
        err,
        ApiError::Http {
            status: 400,
            body: json!({"error": "Title and content are required"}),
        }
    );
    assert_eq!(
        describe_error(&err),
        "Validation error: Title and content are required"
    );
}

#[tokio::test]
async fn unparseable_error_body_becomes_empty_object() {
    let server = spawn_server(vec![MockResponse::raw(
        StatusCode::BAD_GATEWAY,
        "<html>upstream down</html>",
    )])
    .await;

    let err = server
        .client()
        .request("/health", RequestOptions::get())
        .await
        .expect_err("request must fail");

    assert_eq!(
        err,
        ApiError::Http {
            status: 502,
            body: json!({}),
        }
    );
    assert_eq!(describe_error(&err), "Server error (502): Unknown error");
}

#[tokio::test]
async fn truncated_error_body_keeps_status() {
    let server = spawn_truncating_server(StatusCode::UNAUTHORIZED, r#"{"err"#).await;

    let err = server
        .client()
        .request("/login", RequestOptions::get())
        .await
        .expect_err("request must fail");

    assert_eq!(
        err,
        ApiError::Http {
            status: 401,
            body: json!({}),
        }
    );
    assert_eq!(
        describe_error(&err),
        "Authentication failed. Please check your credentials."
    );
}

#[tokio::test]
async fn truncated_success_body_is_malformed() {
    let server = spawn_truncating_server(StatusCode::OK, r#"{"status": "hea"#).await;

    let err = server
        .client()
        .request("/health", RequestOptions::get())
        .await
        .expect_err("request must fail");

    assert!(matches!(err, ApiError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_success_body_is_reported() {
    let server = spawn_server(vec![MockResponse::raw(StatusCode::OK, "not json")]).await;

    let err = server
        .client()
        .request("/health", RequestOptions::get())
        .await
        .expect_err("request must fail");

    assert!(matches!(err, ApiError::MalformedResponse(_)));
    assert_eq!(describe_error(&err), "An unexpected error occurred.");
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind listener");
    let address = listener.local_addr().expect("must have local addr");
    drop(listener);

    let config = Config::builder(Environment::Production)
        .api_base_url(format!("http://{address}/api"))
        .build();
    let err = ApiClient::new(config)
        .request("/health", RequestOptions::get())
        .await
        .expect_err("request must fail");

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(
        describe_error(&err),
        "Network error. Please check your connection."
    );
}

#[tokio::test]
async fn request_timeout_is_network_error() {
    let server = spawn_server(vec![MockResponse::json(StatusCode::OK, json!({}))
        .with_delay(Duration::from_millis(150))])
    .await;

    let err = server
        .client()
        .request(
            "/health",
            RequestOptions::get().with_timeout(Duration::from_millis(20)),
        )
        .await
        .expect_err("request must time out");

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn retry_returns_first_success_with_linear_delays() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})),
        MockResponse::json(StatusCode::SERVICE_UNAVAILABLE, json!({})),
        MockResponse::json(StatusCode::OK, json!({"banners": ["/api/uploads/a.png"]})),
    ])
    .await;
    let sleeper = RecordingSleeper::default();
    let config = Config::builder(Environment::Production)
        .api_base_url(server.api_url())
        .build();
    let client = ApiClient::new(config).with_sleeper(sleeper.clone());

    let banners = client.banners().await.expect("banners must load after retry");

    assert_eq!(banners, vec!["/api/uploads/a.png".to_owned()]);
    assert_eq!(server.hits(), 3);
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(1_000), Duration::from_millis(2_000)]
    );
}

#[tokio::test]
async fn retry_propagates_last_failure_unchanged() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "first"})),
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "second"})),
        MockResponse::json(StatusCode::TOO_MANY_REQUESTS, json!({"error": "third"})),
        MockResponse::json(StatusCode::OK, json!({"participants": []})),
    ])
    .await;

    let err = server
        .client()
        .request_with_retry("/participants", RequestOptions::get(), None)
        .await
        .expect_err("budget of three must be exhausted");

    assert_eq!(
        err,
        ApiError::Http {
            status: 429,
            body: json!({"error": "third"}),
        }
    );
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn retry_budget_can_be_overridden() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::BAD_REQUEST, json!({})),
        MockResponse::json(StatusCode::OK, json!({})),
    ])
    .await;

    let err = server
        .client()
        .request_with_retry("/participants", RequestOptions::get(), Some(1))
        .await
        .expect_err("single attempt must fail");

    assert_eq!(err.status(), Some(400));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn client_errors_are_retried_like_any_failure() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::BAD_REQUEST, json!({"error": "Invalid"})),
        MockResponse::json(StatusCode::OK, json!({"sections": []})),
    ])
    .await;

    let sections = server
        .client()
        .cms_sections()
        .await
        .expect("second attempt must succeed");

    assert!(sections.is_empty());
    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn login_posts_json_credentials() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"token": "dummy-token", "user": "admin"}),
    )])
    .await;

    let response = server
        .client()
        .login("admin", "s3cret-pass")
        .await
        .expect("login must succeed");

    assert_eq!(response.token.as_deref(), Some("dummy-token"));
    let requests = server.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/api/login");
    let body: JsonValue = serde_json::from_str(&requests[0].body).expect("body must be JSON");
    assert_eq!(body, json!({"username": "admin", "password": "s3cret-pass"}));
}

#[tokio::test]
async fn participants_and_content_decode() {
    let server = spawn_server(vec![
        MockResponse::json(
            StatusCode::OK,
            json!({"participants": [
                {"name": "Kit", "email": "kit@example.org", "message": "", "banner": null}
            ]}),
        ),
        MockResponse::json(
            StatusCode::OK,
            json!({"content": "# Hello", "metadata": {"title": "About"}, "html": "<h1>Hello</h1>"}),
        ),
    ])
    .await;
    let client = server.client();

    let participants = client.participants().await.expect("participants must load");
    let content = client.cms_content("about").await.expect("content must load");

    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Kit");
    assert_eq!(content.section, "about");
    assert_eq!(content.metadata["title"], "About");
    assert_eq!(server.requests()[1].path, "/api/cms/content/about");
}

#[tokio::test]
async fn section_name_is_encoded_as_one_path_segment() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"content": "", "metadata": {}, "html": ""}),
    )])
    .await;

    let content = server
        .client()
        .cms_content("../login?x=1#top")
        .await
        .expect("content must load");

    assert_eq!(content.section, "../login?x=1#top");
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].path,
        "/api/cms/content/..%2Flogin%3Fx%3D1%23top"
    );
}

#[tokio::test]
async fn invalid_participant_is_rejected_before_sending() {
    let server = spawn_server(vec![]).await;

    let err = server
        .client()
        .add_participant(&Participant {
            name: "K".to_owned(),
            email: String::new(),
            message: String::new(),
            banner: None,
        })
        .await
        .expect_err("participant must be rejected");

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn valid_participant_is_registered() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::CREATED,
        json!({"success": true, "participant": {
            "name": "Kit", "email": "kit@example.org", "message": "See you", "banner": null
        }}),
    )])
    .await;

    let participant = server
        .client()
        .add_participant(&Participant {
            name: " Kit ".to_owned(),
            email: "kit@example.org".to_owned(),
            message: "See you".to_owned(),
            banner: None,
        })
        .await
        .expect("participant must be registered");

    assert_eq!(participant.name, "Kit");
    let body: JsonValue =
        serde_json::from_str(&server.requests()[0].body).expect("body must be JSON");
    assert_eq!(body["name"], "Kit");
}
