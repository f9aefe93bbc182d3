//! Pipeline run request and status models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::PublishedPost;
use crate::error::AppError;

/// What caused a pipeline run to be enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunTrigger {
    Scheduled,
    Manual,
}

/// A request for one pipeline run, consumed by the background worker.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Niche key override; the default niche is used when `None`.
    pub niche: Option<String>,
    pub trigger: RunTrigger,
}

impl RunRequest {
    pub fn scheduled() -> Self {
        Self {
            niche: None,
            trigger: RunTrigger::Scheduled,
        }
    }

    pub fn manual(niche: Option<String>) -> Self {
        Self {
            niche,
            trigger: RunTrigger::Manual,
        }
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub post: PublishedPost,
    pub niche: String,
}

/// Last-run state exposed by the status endpoint.
///
/// Mirrors the run lifecycle: `last_result` is `"running"` while a run is in
/// flight, then `"posted"` or `"error"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStatus {
    pub last_run: Option<DateTime<Utc>>,
    pub last_result: Option<String>,
    pub last_error: Option<String>,
    pub last_video_id: Option<String>,
    pub last_post_id: Option<String>,
}

impl RunStatus {
    /// Marks the start of a run, clearing the previous outcome.
    pub fn begin(&mut self, now: DateTime<Utc>) {
        self.last_run = Some(now);
        self.last_result = Some("running".to_string());
        self.last_error = None;
        self.last_video_id = None;
        self.last_post_id = None;
    }

    /// Records a successful publish.
    pub fn record_success(&mut self, outcome: &RunOutcome) {
        self.last_result = Some("posted".to_string());
        self.last_error = None;
        self.last_video_id = Some(outcome.post.video_id.clone());
        self.last_post_id = Some(outcome.post.post_id.clone());
    }

    /// Records a failed run.
    pub fn record_failure(&mut self, error: &AppError) {
        self.last_result = Some("error".to_string());
        self.last_error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PublishedPost;
    use serde_json::json;

    fn outcome() -> RunOutcome {
        RunOutcome {
            post: PublishedPost {
                post_id: "post-1".to_string(),
                title: "Title".to_string(),
                video_id: "vid-1".to_string(),
                published_at: Utc::now(),
            },
            niche: "weight_loss".to_string(),
        }
    }

    #[test]
    fn test_status_lifecycle() {
        let mut status = RunStatus::default();
        assert!(status.last_run.is_none());

        status.begin(Utc::now());
        assert_eq!(status.last_result.as_deref(), Some("running"));

        status.record_success(&outcome());
        assert_eq!(status.last_result.as_deref(), Some("posted"));
        assert_eq!(status.last_post_id.as_deref(), Some("post-1"));
        assert_eq!(status.last_video_id.as_deref(), Some("vid-1"));
        assert!(status.last_error.is_none());
    }

    #[test]
    fn test_status_failure_clears_previous_outcome() {
        let mut status = RunStatus::default();

        status.begin(Utc::now());
        status.record_success(&outcome());

        status.begin(Utc::now());
        assert!(status.last_post_id.is_none());

        status.record_failure(&AppError::vendor("YouTube request failed", json!({})));
        assert_eq!(status.last_result.as_deref(), Some("error"));
        assert!(
            status
                .last_error
                .as_deref()
                .unwrap()
                .contains("vendor_error")
        );
    }
}
