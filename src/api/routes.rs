//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{run_handler, status_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET  /status` - Last-run state and next scheduled slot
/// - `POST /run`    - Queue a pipeline run (optional niche override)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status_handler))
        .route("/run", post(run_handler))
}
