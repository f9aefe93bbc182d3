//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use crate::application::services::AuthService;
use crate::domain::entities::NicheCatalog;
use crate::domain::run::{RunRequest, RunStatus};
use crate::domain::schedule::PostSchedule;

/// State shared by all HTTP handlers.
///
/// Handlers never touch vendor adapters directly: manual runs go through the
/// run queue and the background worker, and the status endpoint reads the
/// worker-maintained [`RunStatus`].
#[derive(Clone)]
pub struct AppState {
    /// Queue feeding the pipeline worker.
    pub run_sender: mpsc::Sender<RunRequest>,
    /// Last-run state maintained by the worker.
    pub status: Arc<RwLock<RunStatus>>,
    pub auth_service: Arc<AuthService>,
    pub niches: NicheCatalog,
    pub default_niche: String,
    pub schedule: PostSchedule,
}

impl AppState {
    pub fn new(
        run_sender: mpsc::Sender<RunRequest>,
        status: Arc<RwLock<RunStatus>>,
        auth_service: Arc<AuthService>,
        niches: NicheCatalog,
        default_niche: String,
        schedule: PostSchedule,
    ) -> Self {
        Self {
            run_sender,
            status,
            auth_service,
            niches,
            default_niche,
            schedule,
        }
    }
}
