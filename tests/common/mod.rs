#![allow(dead_code)]

use std::sync::Arc;

use blogworker::application::services::AuthService;
use blogworker::domain::entities::NicheCatalog;
use blogworker::domain::run::{RunRequest, RunStatus};
use blogworker::domain::schedule::PostSchedule;
use blogworker::state::AppState;
use tokio::sync::{RwLock, mpsc};

pub const TEST_ADMIN_TOKEN: &str = "integration-test-admin-token";

/// Builds an [`AppState`] backed by a test run queue.
///
/// The receiver is returned so tests can assert what the handlers enqueued;
/// dropping it closes the queue.
pub fn create_test_state() -> (AppState, mpsc::Receiver<RunRequest>) {
    create_test_state_with_capacity(8)
}

pub fn create_test_state_with_capacity(
    capacity: usize,
) -> (AppState, mpsc::Receiver<RunRequest>) {
    let (tx, rx) = mpsc::channel(capacity);

    let state = AppState::new(
        tx,
        Arc::new(RwLock::new(RunStatus::default())),
        Arc::new(AuthService::new(TEST_ADMIN_TOKEN.to_string())),
        NicheCatalog::builtin(),
        "weight_loss".to_string(),
        PostSchedule::parse("tue,wed,thu", "10:05,14:35").unwrap(),
    );

    (state, rx)
}
