//! Background worker that executes pipeline runs one at a time.
//!
//! Requests arrive on a bounded channel from the scheduler and the manual
//! trigger endpoint. Serializing runs through a single worker prevents two
//! overlapping runs from publishing duplicate posts.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, mpsc};
use tracing::{error, info};

use crate::domain::ports::PipelineRunner;
use crate::domain::run::{RunRequest, RunStatus};

/// Consumes run requests until the channel closes.
///
/// Every run updates the shared [`RunStatus`] (begin → posted/error) and
/// emits `pipeline_runs_total` counters labelled by result and trigger.
pub async fn run_pipeline_worker<R: PipelineRunner + ?Sized>(
    mut rx: mpsc::Receiver<RunRequest>,
    runner: Arc<R>,
    status: Arc<RwLock<RunStatus>>,
) {
    while let Some(request) = rx.recv().await {
        let trigger = format!("{:?}", request.trigger).to_lowercase();
        info!(
            trigger = %trigger,
            niche = request.niche.as_deref().unwrap_or("<default>"),
            "Starting pipeline run"
        );

        status.write().await.begin(Utc::now());

        match runner.run(request.niche.as_deref()).await {
            Ok(outcome) => {
                info!(
                    post_id = %outcome.post.post_id,
                    video_id = %outcome.post.video_id,
                    niche = %outcome.niche,
                    "Published post"
                );
                metrics::counter!("pipeline_runs_total", "result" => "posted", "trigger" => trigger)
                    .increment(1);
                status.write().await.record_success(&outcome);
            }
            Err(e) => {
                error!(error = %e, "Pipeline run failed");
                metrics::counter!("pipeline_runs_total", "result" => "error", "trigger" => trigger)
                    .increment(1);
                status.write().await.record_failure(&e);
            }
        }
    }

    info!("Run queue closed, stopping pipeline worker");
}
