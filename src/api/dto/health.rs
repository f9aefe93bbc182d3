//! Health check response DTOs.

use serde::{Deserialize, Serialize};

/// Overall health response with per-component checks.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub run_queue: CheckStatus,
    pub niche_catalog: CheckStatus,
    pub scheduler: CheckStatus,
}

/// One component check: `ok` or `error` with an optional message.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
