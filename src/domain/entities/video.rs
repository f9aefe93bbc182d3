//! Video and transcript entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A search result before details have been fetched.
///
/// Produced by [`crate::domain::ports::VideoCatalog::search`]; carries only
/// the snippet fields the Data API returns from `search.list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

/// A fully-detailed candidate video.
///
/// Combines the `snippet`, `contentDetails`, and `statistics` parts from the
/// Data API `videos.list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    /// Video length in minutes, parsed from the ISO-8601 duration.
    pub duration_minutes: f64,
    pub view_count: u64,
    pub like_count: u64,
}

impl Video {
    /// Age of the video in weeks relative to `now`.
    pub fn age_weeks(&self, now: DateTime<Utc>) -> f64 {
        let age = now.signed_duration_since(self.published_at);
        age.num_days() as f64 / 7.0
    }

    /// Publication date formatted for attribution (`YYYY-MM-DD`).
    pub fn published_date(&self) -> String {
        self.published_at.format("%Y-%m-%d").to_string()
    }
}

/// An English caption transcript for a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_video(published_at: DateTime<Utc>) -> Video {
        Video {
            video_id: "abc123DEF45".to_string(),
            title: "Test Video".to_string(),
            channel_title: "Test Channel".to_string(),
            published_at,
            duration_minutes: 12.0,
            view_count: 1000,
            like_count: 50,
        }
    }

    #[test]
    fn test_age_weeks() {
        let published = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 25, 12, 0, 0).unwrap();

        let video = test_video(published);

        // 84 days = 12 weeks
        assert!((video.age_weeks(now) - 12.0).abs() < 0.01);
    }

    #[test]
    fn test_published_date() {
        let published = Utc.with_ymd_and_hms(2024, 7, 9, 23, 59, 59).unwrap();
        assert_eq!(test_video(published).published_date(), "2024-07-09");
    }

    #[test]
    fn test_transcript_word_count() {
        let transcript = Transcript::new("  one two\nthree   four ");
        assert_eq!(transcript.word_count(), 4);

        assert_eq!(Transcript::new("").word_count(), 0);
    }
}
