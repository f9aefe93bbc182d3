//! Handler for the manual-trigger endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;
use tracing::info;
use validator::Validate;

use crate::api::dto::run::{RunAcceptedResponse, RunNowRequest};
use crate::domain::run::RunRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Queues a pipeline run.
///
/// # Endpoint
///
/// `POST /api/run` (Bearer token required)
///
/// The body is optional; `{"niche": "weight_loss"}` overrides the default
/// niche. Runs execute one at a time in the background worker, so the
/// response only acknowledges queueing.
///
/// # Response Codes
///
/// - **202 Accepted**: Run queued
/// - **400 Bad Request**: Unknown niche or invalid body
/// - **503 Service Unavailable**: Run queue is full
pub async fn run_handler(
    State(state): State<AppState>,
    payload: Option<Json<RunNowRequest>>,
) -> Result<(StatusCode, Json<RunAcceptedResponse>), AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    payload.validate().map_err(|e| {
        AppError::bad_request(
            "Invalid request body",
            serde_json::to_value(&e).unwrap_or_default(),
        )
    })?;

    let requested = payload.niche.as_deref().unwrap_or(&state.default_niche);
    let niche = state.niches.get(requested).ok_or_else(|| {
        AppError::bad_request("Unknown niche", json!({ "niche": requested }))
    })?;
    let niche_key = niche.key.clone();

    match state
        .run_sender
        .try_send(RunRequest::manual(Some(niche_key.clone())))
    {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            return Err(AppError::unavailable(
                "Run queue is full",
                json!({ "capacity": state.run_sender.max_capacity() }),
            ));
        }
        Err(TrySendError::Closed(_)) => {
            return Err(AppError::internal(
                "Run queue is closed",
                json!({ "reason": "worker has stopped" }),
            ));
        }
    }

    metrics::counter!("manual_runs_queued_total").increment(1);
    info!(niche = %niche_key, "Manual run queued");

    Ok((
        StatusCode::ACCEPTED,
        Json(RunAcceptedResponse {
            status: "queued".to_string(),
            niche: niche_key,
        }),
    ))
}
