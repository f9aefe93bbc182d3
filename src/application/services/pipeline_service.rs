//! Full-run orchestration: select, compose, publish, notify.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, instrument};

use crate::application::services::composer_service::ComposerService;
use crate::application::services::publish_service::PublishService;
use crate::application::services::selection_service::SelectionService;
use crate::domain::entities::NicheCatalog;
use crate::domain::ports::{
    BlogPublisher, ContentWriter, Mailer, PipelineRunner, TranscriptSource, VideoCatalog,
};
use crate::domain::run::RunOutcome;
use crate::error::AppError;

/// Orchestrates one end-to-end pipeline run.
///
/// Resolves the niche, delegates to the selection, composer, and publish
/// services in order, and reports the published post. Implements
/// [`PipelineRunner`] so the background worker can drive it.
pub struct PipelineService<C, T, W, B, M>
where
    C: VideoCatalog,
    T: TranscriptSource,
    W: ContentWriter,
    B: BlogPublisher,
    M: Mailer,
{
    niches: NicheCatalog,
    default_niche: String,
    selection: SelectionService<C, T>,
    composer: ComposerService<W>,
    publisher: Arc<PublishService<B, M>>,
}

impl<C, T, W, B, M> PipelineService<C, T, W, B, M>
where
    C: VideoCatalog,
    T: TranscriptSource,
    W: ContentWriter,
    B: BlogPublisher,
    M: Mailer,
{
    pub fn new(
        niches: NicheCatalog,
        default_niche: String,
        selection: SelectionService<C, T>,
        composer: ComposerService<W>,
        publisher: Arc<PublishService<B, M>>,
    ) -> Self {
        Self {
            niches,
            default_niche,
            selection,
            composer,
            publisher,
        }
    }
}

#[async_trait]
impl<C, T, W, B, M> PipelineRunner for PipelineService<C, T, W, B, M>
where
    C: VideoCatalog,
    T: TranscriptSource,
    W: ContentWriter,
    B: BlogPublisher,
    M: Mailer,
{
    #[instrument(skip(self), fields(niche = niche.unwrap_or("default")))]
    async fn run<'a>(&self, niche: Option<&'a str>) -> Result<RunOutcome, AppError> {
        let requested = niche.unwrap_or(&self.default_niche);
        let niche = self.niches.get(requested).ok_or_else(|| {
            AppError::bad_request("Unknown niche", json!({ "niche": requested }))
        })?;

        info!(niche = %niche.key, "Starting pipeline run");

        let qualified = self.selection.find_qualified_video(niche).await?;
        let composed = self.composer.compose(niche, &qualified).await?;
        let post = self.publisher.publish(&composed, &niche.key).await?;

        info!(
            niche = %niche.key,
            post_id = %post.post_id,
            video_id = %post.video_id,
            "Pipeline run finished"
        );

        Ok(RunOutcome {
            post,
            niche: niche.key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::selection_service::SelectionConfig;
    use crate::domain::entities::{Transcript, Video, VideoHit};
    use crate::domain::ports::{
        MockBlogPublisher, MockContentWriter, MockMailer, MockTranscriptSource, MockVideoCatalog,
    };
    use chrono::Utc;

    fn build_service(
        catalog: MockVideoCatalog,
        transcripts: MockTranscriptSource,
        writer: MockContentWriter,
        publisher: MockBlogPublisher,
        mailer: MockMailer,
    ) -> PipelineService<
        MockVideoCatalog,
        MockTranscriptSource,
        MockContentWriter,
        MockBlogPublisher,
        MockMailer,
    > {
        let selection = SelectionService::new(
            Arc::new(catalog),
            Arc::new(transcripts),
            SelectionConfig {
                max_search_pages: 1,
                search_max_results: 5,
                published_within_hours: 0,
                min_blog_length: 100,
            },
        );
        let composer = ComposerService::new(Arc::new(writer), 100);
        let publish = Arc::new(PublishService::new(
            Arc::new(publisher),
            Arc::new(mailer),
            None,
        ));

        PipelineService::new(
            NicheCatalog::builtin(),
            "weight_loss".to_string(),
            selection,
            composer,
            publish,
        )
    }

    fn long_transcript() -> Transcript {
        let sentence = "this is a long transcript about how you can lose weight and \
                        what the best ways are to keep it off for the long term ";
        Transcript::new(sentence.repeat(20))
    }

    #[tokio::test]
    async fn test_full_run_publishes_post() {
        let mut catalog = MockVideoCatalog::new();
        let mut transcripts = MockTranscriptSource::new();
        let mut writer = MockContentWriter::new();
        let mut publisher = MockBlogPublisher::new();
        let mailer = MockMailer::new();

        catalog.expect_search().returning(|_, _, _| {
            Ok(vec![VideoHit {
                video_id: "vid1".to_string(),
                title: "Great Video".to_string(),
                description: String::new(),
                published_at: Utc::now(),
            }])
        });
        catalog.expect_details().returning(|_| {
            Ok(vec![Video {
                video_id: "vid1".to_string(),
                title: "Great Video".to_string(),
                channel_title: "Channel".to_string(),
                published_at: Utc::now(),
                duration_minutes: 12.0,
                view_count: 10_000,
                like_count: 500,
            }])
        });
        transcripts
            .expect_fetch_english()
            .returning(|_| Ok(Some(long_transcript())));
        writer
            .expect_write_post()
            .returning(|_| Ok("<p>Generated body.</p>".to_string()));
        publisher
            .expect_publish()
            .withf(|title, html| {
                title == "Great Video — Key Insights & Takeaways (Weight Loss)"
                    && html.contains("youtube.com/embed/vid1")
            })
            .times(1)
            .returning(|_, _| Ok("post-1".to_string()));

        let service = build_service(catalog, transcripts, writer, publisher, mailer);
        let outcome = service.run(None).await.unwrap();

        assert_eq!(outcome.niche, "weight_loss");
        assert_eq!(outcome.post.post_id, "post-1");
        assert_eq!(outcome.post.video_id, "vid1");
    }

    #[tokio::test]
    async fn test_unknown_niche_is_rejected_before_any_vendor_call() {
        let service = build_service(
            MockVideoCatalog::new(),
            MockTranscriptSource::new(),
            MockContentWriter::new(),
            MockBlogPublisher::new(),
            MockMailer::new(),
        );

        let result = service.run(Some("crypto")).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_selection_failure_stops_the_run() {
        let mut catalog = MockVideoCatalog::new();
        catalog
            .expect_search()
            .returning(|_, _, _| Ok(vec![]));

        let service = build_service(
            catalog,
            MockTranscriptSource::new(),
            MockContentWriter::new(),
            MockBlogPublisher::new(),
            MockMailer::new(),
        );

        let result = service.run(None).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
