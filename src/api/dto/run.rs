//! Manual-trigger request and response DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/run`. The body may be omitted entirely, in which case
/// the default niche is used.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RunNowRequest {
    /// Niche key override, e.g. `weight_loss`.
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub niche: Option<String>,
}

/// Acknowledgement that a run was queued.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunAcceptedResponse {
    /// Always `queued`.
    pub status: String,
    /// Resolved niche key the run will use.
    pub niche: String,
}
