//! Candidate video search, ranking, and transcript qualification.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::seq::IndexedRandom;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Niche, Transcript, Video};
use crate::domain::ports::{TranscriptSource, VideoCatalog};
use crate::domain::scoring::VideoSignals;
use crate::error::AppError;
use crate::utils::language::looks_english;

/// Pause between search rounds when no candidate qualified.
const ROUND_PAUSE: Duration = Duration::from_secs(2);

/// Absolute word-count floor for transcripts regardless of configuration.
const MIN_TRANSCRIPT_WORDS: usize = 200;

/// Tunables for the selection stage, derived from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Search rounds attempted before the run fails.
    pub max_search_pages: usize,
    /// Candidates requested per round.
    pub search_max_results: usize,
    /// Recency window for candidates in hours. 0 = unbounded.
    pub published_within_hours: u32,
    /// Minimum generated post length in words; the transcript threshold is
    /// derived from it.
    pub min_blog_length: usize,
}

/// A candidate that survived ranking and transcript qualification.
#[derive(Debug, Clone)]
pub struct QualifiedVideo {
    pub video: Video,
    pub transcript: Transcript,
    pub score: f64,
}

/// Service that finds a post-worthy source video for a niche.
///
/// Searches the catalog with a randomly chosen niche keyword, ranks the
/// detailed candidates by engagement score, and walks them in rank order
/// until one yields a qualified English transcript.
pub struct SelectionService<C: VideoCatalog, T: TranscriptSource> {
    catalog: Arc<C>,
    transcripts: Arc<T>,
    config: SelectionConfig,
}

impl<C: VideoCatalog, T: TranscriptSource> SelectionService<C, T> {
    pub fn new(catalog: Arc<C>, transcripts: Arc<T>, config: SelectionConfig) -> Self {
        Self {
            catalog,
            transcripts,
            config,
        }
    }

    /// Finds the first qualified video for a niche.
    ///
    /// Retries across up to `max_search_pages` rounds, with a fresh random
    /// keyword each round and a short pause between rounds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the niche has no keywords,
    /// [`AppError::NotFound`] when no candidate qualifies after all rounds,
    /// and propagates catalog failures.
    pub async fn find_qualified_video(&self, niche: &Niche) -> Result<QualifiedVideo, AppError> {
        if niche.keywords.is_empty() {
            return Err(AppError::bad_request(
                "Niche has no search keywords",
                json!({ "niche": niche.key }),
            ));
        }

        for round in 0..self.config.max_search_pages {
            if round > 0 {
                tokio::time::sleep(ROUND_PAUSE).await;
            }

            let keyword = niche
                .keywords
                .choose(&mut rand::rng())
                .expect("keywords checked non-empty above");

            debug!(niche = %niche.key, keyword = %keyword, round, "Searching candidates");

            if let Some(qualified) = self.try_round(keyword).await? {
                info!(
                    video_id = %qualified.video.video_id,
                    score = qualified.score,
                    words = qualified.transcript.word_count(),
                    "Selected source video"
                );
                return Ok(qualified);
            }
        }

        Err(AppError::not_found(
            "No qualified videos found",
            json!({
                "niche": niche.key,
                "rounds": self.config.max_search_pages,
            }),
        ))
    }

    /// One search round: search, rank, then qualify transcripts in rank order.
    async fn try_round(&self, keyword: &str) -> Result<Option<QualifiedVideo>, AppError> {
        let published_after = match self.config.published_within_hours {
            0 => None,
            hours => Some(Utc::now() - chrono::Duration::hours(i64::from(hours))),
        };

        let hits = self
            .catalog
            .search(keyword, self.config.search_max_results, published_after)
            .await?;
        if hits.is_empty() {
            return Ok(None);
        }

        let ids: Vec<String> = hits.into_iter().map(|h| h.video_id).collect();
        let videos = self.catalog.details(&ids).await?;

        let now = Utc::now();
        let mut ranked: Vec<(f64, Video)> = videos
            .into_iter()
            .map(|v| (VideoSignals::from_video(&v, now).final_score(), v))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        for (score, video) in ranked {
            let transcript = match self.transcripts.fetch_english(&video.video_id).await {
                Ok(Some(t)) => t,
                Ok(None) => {
                    debug!(video_id = %video.video_id, "No English transcript, skipping");
                    continue;
                }
                Err(e) => {
                    // A broken transcript fetch disqualifies one candidate,
                    // not the whole round.
                    warn!(video_id = %video.video_id, error = %e, "Transcript fetch failed");
                    continue;
                }
            };

            if self.transcript_qualifies(&transcript) {
                return Ok(Some(QualifiedVideo {
                    video,
                    transcript,
                    score,
                }));
            }

            debug!(video_id = %video.video_id, "Transcript did not qualify");
        }

        Ok(None)
    }

    /// A transcript qualifies when it looks English and is long enough to
    /// support a post of the configured minimum length.
    fn transcript_qualifies(&self, transcript: &Transcript) -> bool {
        if !looks_english(&transcript.text) {
            return false;
        }
        let required = MIN_TRANSCRIPT_WORDS.max(self.config.min_blog_length / 2);
        transcript.word_count() >= required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::VideoHit;
    use crate::domain::ports::{MockTranscriptSource, MockVideoCatalog};
    use chrono::{Duration as ChronoDuration, Utc};

    fn test_config() -> SelectionConfig {
        SelectionConfig {
            max_search_pages: 2,
            search_max_results: 5,
            published_within_hours: 24,
            min_blog_length: 800,
        }
    }

    fn test_niche() -> Niche {
        Niche {
            key: "weight_loss".to_string(),
            keywords: vec!["fat loss".to_string()],
            offers: vec![],
            soft_ctas: vec![],
        }
    }

    fn hit(id: &str) -> VideoHit {
        VideoHit {
            video_id: id.to_string(),
            title: format!("Video {}", id),
            description: String::new(),
            published_at: Utc::now() - ChronoDuration::hours(5),
        }
    }

    fn video(id: &str, duration_minutes: f64) -> Video {
        Video {
            video_id: id.to_string(),
            title: format!("Video {}", id),
            channel_title: "Channel".to_string(),
            published_at: Utc::now() - ChronoDuration::hours(5),
            duration_minutes,
            view_count: 10_000,
            like_count: 500,
        }
    }

    fn english_transcript() -> Transcript {
        let sentence = "this is a long transcript about how you can lose weight and \
                        what the best ways are to keep it off for the long term ";
        Transcript::new(sentence.repeat(30))
    }

    #[tokio::test]
    async fn test_selects_highest_ranked_with_transcript() {
        let mut catalog = MockVideoCatalog::new();
        let mut transcripts = MockTranscriptSource::new();

        catalog
            .expect_search()
            .times(1)
            .returning(|_, _, _| Ok(vec![hit("short"), hit("ideal")]));

        // "ideal" (12 min) outranks "short" (5 min) on the length signal
        catalog
            .expect_details()
            .times(1)
            .returning(|_| Ok(vec![video("short", 5.0), video("ideal", 12.0)]));

        transcripts
            .expect_fetch_english()
            .withf(|id| id == "ideal")
            .times(1)
            .returning(|_| Ok(Some(english_transcript())));

        let service = SelectionService::new(
            Arc::new(catalog),
            Arc::new(transcripts),
            test_config(),
        );

        let qualified = service.find_qualified_video(&test_niche()).await.unwrap();

        assert_eq!(qualified.video.video_id, "ideal");
        assert!(qualified.score > 0.0);
    }

    #[tokio::test]
    async fn test_skips_candidates_without_transcript() {
        let mut catalog = MockVideoCatalog::new();
        let mut transcripts = MockTranscriptSource::new();

        catalog
            .expect_search()
            .times(1)
            .returning(|_, _, _| Ok(vec![hit("a"), hit("b")]));
        catalog
            .expect_details()
            .times(1)
            .returning(|_| Ok(vec![video("a", 12.0), video("b", 11.0)]));

        transcripts
            .expect_fetch_english()
            .times(2)
            .returning(|id| {
                if id == "b" {
                    Ok(Some(english_transcript()))
                } else {
                    Ok(None)
                }
            });

        let service = SelectionService::new(
            Arc::new(catalog),
            Arc::new(transcripts),
            test_config(),
        );

        let qualified = service.find_qualified_video(&test_niche()).await.unwrap();
        assert_eq!(qualified.video.video_id, "b");
    }

    #[tokio::test]
    async fn test_short_transcript_does_not_qualify() {
        let mut catalog = MockVideoCatalog::new();
        let mut transcripts = MockTranscriptSource::new();

        catalog
            .expect_search()
            .times(2)
            .returning(|_, _, _| Ok(vec![hit("a")]));
        catalog
            .expect_details()
            .times(2)
            .returning(|_| Ok(vec![video("a", 12.0)]));

        // English but far below max(200, 800/2) = 400 words
        transcripts
            .expect_fetch_english()
            .times(2)
            .returning(|_| {
                Ok(Some(Transcript::new(
                    "this is a short transcript that talks about the topic for a bit \
                     and then just stops because the video was mostly music",
                )))
            });

        let service = SelectionService::new(
            Arc::new(catalog),
            Arc::new(transcripts),
            test_config(),
        );

        let result = service.find_qualified_video(&test_niche()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_keywords_is_rejected() {
        let catalog = MockVideoCatalog::new();
        let transcripts = MockTranscriptSource::new();

        let service = SelectionService::new(
            Arc::new(catalog),
            Arc::new(transcripts),
            test_config(),
        );

        let mut niche = test_niche();
        niche.keywords.clear();

        let result = service.find_qualified_video(&niche).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let mut catalog = MockVideoCatalog::new();
        let transcripts = MockTranscriptSource::new();

        catalog.expect_search().times(1).returning(|_, _, _| {
            Err(AppError::vendor("YouTube request failed", serde_json::json!({})))
        });

        let service = SelectionService::new(
            Arc::new(catalog),
            Arc::new(transcripts),
            test_config(),
        );

        let result = service.find_qualified_video(&test_niche()).await;
        assert!(matches!(result.unwrap_err(), AppError::Vendor { .. }));
    }
}
