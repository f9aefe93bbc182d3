//! HTTP server initialization and runtime setup.
//!
//! Wires vendor clients, pipeline services, the background worker, and the
//! scheduler, then runs the Axum server.

use crate::application::services::{
    AuthService, ComposerService, PipelineService, PublishService, SelectionConfig,
    SelectionService,
};
use crate::config::Config;
use crate::domain::entities::NicheCatalog;
use crate::domain::pipeline_worker::run_pipeline_worker;
use crate::domain::ports::PipelineRunner;
use crate::domain::run::RunStatus;
use crate::domain::schedule::run_schedule_loop;
use crate::infrastructure::google::{BloggerClient, GmailClient, GoogleTokenProvider};
use crate::infrastructure::http::build_client;
use crate::infrastructure::openrouter::OpenRouterClient;
use crate::infrastructure::youtube::{TimedTextClient, YouTubeDataApi};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};

/// Builds the full pipeline over the real vendor adapters.
///
/// Shared by the HTTP server and the admin CLI's one-shot run command.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_pipeline(config: &Config) -> Result<Arc<dyn PipelineRunner>> {
    let http = build_client(config.http_timeout_seconds)?;

    let tokens = Arc::new(GoogleTokenProvider::new(
        http.clone(),
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.google_refresh_token.clone(),
    ));

    let catalog = Arc::new(YouTubeDataApi::new(
        http.clone(),
        config.youtube_api_key.clone(),
    ));
    let transcripts = Arc::new(TimedTextClient::new(http.clone()));
    let writer = Arc::new(OpenRouterClient::new(
        http.clone(),
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    ));
    let blog = Arc::new(BloggerClient::new(
        http.clone(),
        tokens.clone(),
        config.blog_id.clone(),
    ));
    let mailer = Arc::new(GmailClient::new(http, tokens));

    let selection = SelectionService::new(
        catalog,
        transcripts,
        SelectionConfig {
            max_search_pages: config.max_search_pages,
            search_max_results: config.search_max_results,
            published_within_hours: config.search_published_within_hours,
            min_blog_length: config.min_blog_length,
        },
    );
    let composer = ComposerService::new(writer, config.min_blog_length);
    let publish = Arc::new(PublishService::new(
        blog,
        mailer,
        config.notify_email.clone(),
    ));

    Ok(Arc::new(PipelineService::new(
        NicheCatalog::builtin(),
        config.niche_default.clone(),
        selection,
        composer,
        publish,
    )))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Shared vendor HTTP client and Google token provider
/// - Pipeline services over the vendor adapters
/// - Background pipeline worker and schedule loop
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the bind address is
/// invalid, or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let niches = NicheCatalog::builtin();

    let (run_tx, run_rx) = mpsc::channel(config.run_queue_capacity);
    let status = Arc::new(RwLock::new(RunStatus::default()));

    tokio::spawn(run_pipeline_worker(run_rx, pipeline, status.clone()));
    tracing::info!("Pipeline worker started");

    tokio::spawn(run_schedule_loop(config.schedule.clone(), run_tx.clone()));
    tracing::info!("Scheduler started: {}", config.schedule);

    let auth_service = Arc::new(AuthService::new(config.admin_token.clone()));
    let state = AppState::new(
        run_tx,
        status,
        auth_service,
        niches,
        config.niche_default.clone(),
        config.schedule.clone(),
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Completes when a Ctrl-C / SIGINT is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler there is nothing to wait for; keep serving.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
