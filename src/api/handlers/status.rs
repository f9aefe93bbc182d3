//! Handler for the pipeline status endpoint.

use axum::{Json, extract::State};
use chrono::Local;

use crate::api::dto::status::StatusResponse;
use crate::state::AppState;

/// Returns the last-run state and the next scheduled slot.
///
/// # Endpoint
///
/// `GET /api/status` (Bearer token required)
///
/// # Response
///
/// ```json
/// {
///   "last_run": "2025-08-19T10:05:02Z",
///   "last_result": "posted",
///   "last_error": null,
///   "last_video_id": "dQw4w9WgXcQ",
///   "last_post_id": "8114732011810886340",
///   "next_scheduled_run": "2025-08-20T10:05:00+02:00"
/// }
/// ```
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = state.status.read().await;
    let next = state.schedule.next_after(Local::now());

    Json(StatusResponse::from_status(&status, next.to_rfc3339()))
}
