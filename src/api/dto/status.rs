//! Pipeline status response DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::run::RunStatus;

/// Last-run state plus the next scheduled slot.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub last_run: Option<DateTime<Utc>>,
    /// `running`, `posted`, or `error`; `None` before the first run.
    pub last_result: Option<String>,
    pub last_error: Option<String>,
    pub last_video_id: Option<String>,
    pub last_post_id: Option<String>,
    /// Next scheduled slot, RFC 3339 in local time.
    pub next_scheduled_run: String,
}

impl StatusResponse {
    pub fn from_status(status: &RunStatus, next_scheduled_run: String) -> Self {
        Self {
            last_run: status.last_run,
            last_result: status.last_result.clone(),
            last_error: status.last_error.clone(),
            last_video_id: status.last_video_id.clone(),
            last_post_id: status.last_post_id.clone(),
            next_scheduled_run,
        }
    }
}
