mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use blogworker::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["run_queue"]["status"], "ok");
    assert_eq!(json["checks"]["niche_catalog"]["status"], "ok");
    assert_eq!(json["checks"]["scheduler"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("run_queue").is_some());
    assert!(json["checks"].get("niche_catalog").is_some());
    assert!(json["checks"].get("scheduler").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_queue_closed() {
    let (state, rx) = common::create_test_state();
    drop(rx);

    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["run_queue"]["status"], "error");
}
