//! End-to-end tests for outbound sync.
//!
//! These tests drive the real axum router backed by in-memory repositories
//! and the real HTTP sync publisher pointed at a wiremock server:
//! 1. Local mutations are mirrored with normalized payloads
//! 2. Auth strategy selects the remote path and credentials
//! 3. Remote failures never leak into the primary API

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ticket_desk::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use ticket_desk::adapters::http::{build_router, AppServices};
use ticket_desk::adapters::in_memory::{InMemoryTicketRepository, InMemoryUserRepository};
use ticket_desk::adapters::sync::build_sync_publisher;
use ticket_desk::config::{AuthConfig, ServerConfig, SyncConfig};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with_sync(sync: SyncConfig) -> Router {
    let users = Arc::new(InMemoryUserRepository::new());
    let tickets = Arc::new(InMemoryTicketRepository::new(users.clone()));
    let auth = AuthConfig {
        jwt_secret: Secret::new("sync-flow-test-secret".to_string()),
        ..Default::default()
    };

    let services = AppServices {
        tickets,
        users,
        publisher: build_sync_publisher(&sync).unwrap(),
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: Arc::new(JwtTokenService::new(&auth)),
    };
    build_router(services, &ServerConfig::default())
}

fn key_config(server: &MockServer) -> SyncConfig {
    SyncConfig {
        base_url: Some(server.uri()),
        integration_key: Some(Secret::new("desk-key".to_string())),
        ..Default::default()
    }
}

fn login_config(server: &MockServer) -> SyncConfig {
    SyncConfig {
        base_url: Some(server.uri()),
        email: Some("sync@example.com".to_string()),
        password: Some(Secret::new("Sync!Pass1".to_string())),
        ..Default::default()
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Registers and signs in a user, returning the access token.
async fn sign_in(app: &Router) -> String {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({"username": "agent", "email": "agent@example.com", "password": "Agent!Pass1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "agent@example.com", "password": "Agent!Pass1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_ticket(app: &Router, token: &str, body: Value) -> String {
    let (status, body) = send(app, json_request("POST", "/api/tickets", Some(token), body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["ticketId"].as_str().unwrap().to_string()
}

async fn mount_register(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

// =============================================================================
// Integration key mode
// =============================================================================

#[tokio::test]
async fn created_and_moved_ticket_is_mirrored_with_normalized_status() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/sync/ticket"))
        .and(header("X-Integration-Key", "desk-key"))
        .and(body_partial_json(json!({"status": "todo", "priority": "high"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path_regex(r"^/api/sync/ticket/[0-9a-f-]+/move$"))
        .and(header("X-Integration-Key", "desk-key"))
        .and(body_json(json!({"status": "in_progress"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_with_sync(key_config(&server));
    let token = sign_in(&app).await;
    let ticket_id = create_ticket(
        &app,
        &token,
        json!({"title": "Printer on fire", "status": "To Do", "priority": "High"}),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/tickets/{}/status", ticket_id),
            Some(&token),
            json!({"status": "In Progress"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "In Progress");
}

#[tokio::test]
async fn update_and_delete_are_mirrored_after_commit() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/sync/ticket"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/api/sync/ticket/[0-9a-f-]+$"))
        .and(body_partial_json(json!({"title": "Printer fixed", "status": "resolved"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/sync/ticket/[0-9a-f-]+$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_sync(key_config(&server));
    let token = sign_in(&app).await;
    let ticket_id = create_ticket(&app, &token, json!({"title": "Printer on fire"})).await;

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/tickets/{}", ticket_id),
            Some(&token),
            json!({"title": "Printer fixed", "status": "Resolved", "priority": "Low"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/tickets/{}", ticket_id),
            Some(&token),
            Value::Null,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_unknown_ticket_publishes_nothing() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_with_sync(key_config(&server));
    let token = sign_in(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "DELETE",
            "/api/tickets/00000000-0000-4000-8000-000000000000",
            Some(&token),
            Value::Null,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn remote_failure_does_not_fail_local_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app_with_sync(key_config(&server));
    let token = sign_in(&app).await;
    create_ticket(&app, &token, json!({"title": "Still saved"})).await;

    let (status, body) = send(
        &app,
        json_request("GET", "/api/tickets", Some(&token), Value::Null),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Bearer mode
// =============================================================================

#[tokio::test]
async fn bearer_mode_logs_in_once_for_many_publishes() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "sync@example.com", "password": "Sync!Pass1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"token": "remote-token"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/ticket"))
        .and(header("Authorization", "Bearer remote-token"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let app = app_with_sync(login_config(&server));
    let token = sign_in(&app).await;
    create_ticket(&app, &token, json!({"title": "First ticket"})).await;
    create_ticket(&app, &token, json!({"title": "Second ticket"})).await;
}

#[tokio::test]
async fn login_without_token_skips_publish_but_keeps_local_write() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "welcome"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/ticket"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_with_sync(login_config(&server));
    let token = sign_in(&app).await;
    create_ticket(&app, &token, json!({"title": "Local only"})).await;
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn registration_is_mirrored_with_raw_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_partial_json(json!({
            "username": "agent",
            "email": "agent@example.com",
            "password": "Agent!Pass1"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_sync(key_config(&server));
    sign_in(&app).await;
}
