mod common;

use axum::{Router, middleware, routing::post};
use axum_test::TestServer;
use blogworker::api::handlers::run_handler;
use blogworker::api::middleware::auth;
use blogworker::domain::run::RunTrigger;
use serde_json::json;

fn run_app(state: blogworker::AppState) -> Router {
    Router::new()
        .route("/api/run", post(run_handler))
        .with_state(state)
}

fn protected_run_app(state: blogworker::AppState) -> Router {
    Router::new()
        .route("/api/run", post(run_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
}

#[tokio::test]
async fn test_run_without_body_uses_default_niche() {
    let (state, mut rx) = common::create_test_state();
    let server = TestServer::new(run_app(state)).unwrap();

    let response = server.post("/api/run").await;

    response.assert_status(axum::http::StatusCode::ACCEPTED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "queued");
    assert_eq!(body["niche"], "weight_loss");

    let request = rx.try_recv().unwrap();
    assert_eq!(request.trigger, RunTrigger::Manual);
    assert_eq!(request.niche.as_deref(), Some("weight_loss"));
}

#[tokio::test]
async fn test_run_with_niche_override() {
    let (state, mut rx) = common::create_test_state();
    let server = TestServer::new(run_app(state)).unwrap();

    // Keys are normalized before lookup
    let response = server
        .post("/api/run")
        .json(&json!({ "niche": "Weight Loss" }))
        .await;

    response.assert_status(axum::http::StatusCode::ACCEPTED);
    assert_eq!(
        rx.try_recv().unwrap().niche.as_deref(),
        Some("weight_loss")
    );
}

#[tokio::test]
async fn test_run_with_unknown_niche() {
    let (state, mut rx) = common::create_test_state();
    let server = TestServer::new(run_app(state)).unwrap();

    let response = server
        .post("/api/run")
        .json(&json!({ "niche": "crypto" }))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_run_queue_full_returns_unavailable() {
    let (state, mut rx) = common::create_test_state_with_capacity(1);
    let server = TestServer::new(run_app(state)).unwrap();

    server
        .post("/api/run")
        .await
        .assert_status(axum::http::StatusCode::ACCEPTED);

    let response = server.post("/api/run").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "unavailable"
    );

    // The first request is still queued
    assert!(rx.try_recv().is_ok());
}

#[tokio::test]
async fn test_run_requires_bearer_token() {
    let (state, _rx) = common::create_test_state();
    let server = TestServer::new(protected_run_app(state)).unwrap();

    let response = server.post("/api/run").await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "unauthorized"
    );
}

#[tokio::test]
async fn test_run_rejects_wrong_token() {
    let (state, _rx) = common::create_test_state();
    let server = TestServer::new(protected_run_app(state)).unwrap();

    let response = server
        .post("/api/run")
        .authorization_bearer("wrong-token")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_run_accepts_valid_token() {
    let (state, mut rx) = common::create_test_state();
    let server = TestServer::new(protected_run_app(state)).unwrap();

    let response = server
        .post("/api/run")
        .authorization_bearer(common::TEST_ADMIN_TOKEN)
        .await;

    response.assert_status(axum::http::StatusCode::ACCEPTED);
    assert!(rx.try_recv().is_ok());
}
