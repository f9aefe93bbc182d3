mod common;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header};
use blogworker::routes::app_router;
use std::net::SocketAddr;
use tower::{Layer, ServiceExt};

#[derive(Clone)]
struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

fn full_app(
    state: blogworker::AppState,
) -> MockConnectInfoService<tower_http::normalize_path::NormalizePath<axum::Router>> {
    MockConnectInfoLayer.layer(app_router(state, false))
}

#[tokio::test]
async fn test_root_through_full_router() {
    let (state, _rx) = common::create_test_state();
    let app = full_app(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("blogworker"));
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let (state, _rx) = common::create_test_state();
    let app = full_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_status_requires_auth() {
    let (state, _rx) = common::create_test_state();
    let app = full_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_status_with_valid_token() {
    let (state, _rx) = common::create_test_state();
    let app = full_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", common::TEST_ADMIN_TOKEN),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json.get("next_scheduled_run").is_some());
}
