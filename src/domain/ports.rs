//! Vendor port traits.
//!
//! Each external collaborator the pipeline talks to is represented by a
//! trait: the video catalog, the transcript source, the content writer, the
//! blog publisher, and the mailer. Infrastructure adapters implement these
//! over the vendor HTTP APIs; services depend only on the traits.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::youtube::YouTubeDataApi`] - [`VideoCatalog`]
//! - [`crate::infrastructure::youtube::TimedTextClient`] - [`TranscriptSource`]
//! - [`crate::infrastructure::openrouter::OpenRouterClient`] - [`ContentWriter`]
//! - [`crate::infrastructure::google::BloggerClient`] - [`BlogPublisher`]
//! - [`crate::infrastructure::google::GmailClient`] - [`Mailer`]
//! - Test mocks available with `cfg(test)`

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Transcript, Video, VideoHit};
use crate::domain::run::RunOutcome;
use crate::error::AppError;

/// Searchable catalog of source videos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Searches for candidate videos by keyword.
    ///
    /// Implementations apply medium-duration and moderate safe-search
    /// filters; `published_after` bounds candidate recency when set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Vendor`] on API failure.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        published_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<VideoHit>, AppError>;

    /// Fetches full details (duration, statistics) for a batch of video ids.
    ///
    /// Videos the API does not return (deleted, private) are silently
    /// omitted from the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Vendor`] on API failure.
    async fn details(&self, video_ids: &[String]) -> Result<Vec<Video>, AppError>;
}

/// Source of caption transcripts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetches an English transcript for a video.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(transcript))` when an English caption track exists
    /// - `Ok(None)` when captions are disabled or no English track is found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Vendor`] only on transport failure; a missing
    /// transcript is not an error.
    async fn fetch_english(&self, video_id: &str) -> Result<Option<Transcript>, AppError>;
}

/// Text-generation collaborator that rewrites a transcript into a post body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentWriter: Send + Sync {
    /// Generates an HTML post body from the editor prompt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Vendor`] on API failure or an empty completion.
    async fn write_post(&self, prompt: &str) -> Result<String, AppError>;
}

/// Blog-publishing collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogPublisher: Send + Sync {
    /// Creates a live (non-draft) post and returns the platform post id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Vendor`] on API failure,
    /// [`AppError::Unauthorized`] when token refresh is rejected.
    async fn publish(&self, title: &str, html: &str) -> Result<String, AppError>;
}

/// One full pipeline execution, as driven by the background worker.
///
/// Implemented by [`crate::application::services::PipelineService`]; kept as
/// a trait so the worker loop can be tested without vendor adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PipelineRunner: Send + Sync {
    /// Runs select → compose → publish → notify for one niche.
    ///
    /// # Errors
    ///
    /// Propagates the failing stage's error; see [`crate::error::AppError`].
    async fn run<'a>(&self, niche: Option<&'a str>) -> Result<RunOutcome, AppError>;
}

/// Email notification collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends an HTML email from the authorized account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Vendor`] on API failure,
    /// [`AppError::Unauthorized`] when token refresh is rejected.
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), AppError>;
}
