//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Local;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Run Queue**: Checks if the worker channel is open and reports capacity
/// 2. **Niche Catalog**: At least one niche configured
/// 3. **Scheduler**: Reports the next scheduled slot
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let queue_check = check_run_queue(&state);
    let niche_check = check_niche_catalog(&state);
    let scheduler_check = check_scheduler(&state);

    let all_healthy = queue_check.status == "ok"
        && niche_check.status == "ok"
        && scheduler_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            run_queue: queue_check,
            niche_catalog: niche_check,
            scheduler: scheduler_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks if the pipeline run queue is operational.
fn check_run_queue(state: &AppState) -> CheckStatus {
    if state.run_sender.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Run queue is closed".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", state.run_sender.capacity())),
        }
    }
}

/// Checks that at least one niche is configured.
fn check_niche_catalog(state: &AppState) -> CheckStatus {
    if state.niches.is_empty() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("No niches configured".to_string()),
        }
    } else if state.niches.get(&state.default_niche).is_none() {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Default niche '{}' is unknown", state.default_niche)),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} niche(s) configured", state.niches.len())),
        }
    }
}

/// Reports the next scheduled posting slot.
fn check_scheduler(state: &AppState) -> CheckStatus {
    let next = state.schedule.next_after(Local::now());
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("Next run at {}", next.to_rfc3339())),
    }
}
