//! YouTube Data API v3 client implementing [`VideoCatalog`].

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use tracing::{debug, warn};

use crate::domain::entities::{Video, VideoHit};
use crate::domain::ports::VideoCatalog;
use crate::error::{AppError, map_reqwest_error};
use crate::infrastructure::http::{expect_success, send_with_retry};
use crate::utils::duration::iso8601_duration_to_minutes;

const VENDOR: &str = "YouTube";
const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The Data API caps `maxResults` at 50 per request.
const MAX_RESULTS_CAP: usize = 50;

pub struct YouTubeDataApi {
    http: Client,
    api_key: String,
}

impl YouTubeDataApi {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl VideoCatalog for YouTubeDataApi {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        published_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<VideoHit>, AppError> {
        let max_results = max_results.min(MAX_RESULTS_CAP).to_string();
        let mut params = vec![
            ("key", self.api_key.as_str()),
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("videoDuration", "medium"),
            ("safeSearch", "moderate"),
            ("relevanceLanguage", "en"),
            ("maxResults", max_results.as_str()),
        ];

        let published_after = published_after
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true));
        if let Some(ts) = &published_after {
            params.push(("publishedAfter", ts.as_str()));
        }

        let request = self
            .http
            .get(format!("{}/search", API_BASE))
            .query(&params);
        let response = send_with_retry(VENDOR, request).await?;
        let response = expect_success(VENDOR, response).await?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(VENDOR, e))?;

        let hits: Vec<VideoHit> = body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(VideoHit {
                    video_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    published_at: item.snippet.published_at,
                })
            })
            .collect();

        debug!(query, hits = hits.len(), "Search completed");
        Ok(hits)
    }

    async fn details(&self, video_ids: &[String]) -> Result<Vec<Video>, AppError> {
        if video_ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = video_ids.join(",");
        let request = self.http.get(format!("{}/videos", API_BASE)).query(&[
            ("key", self.api_key.as_str()),
            ("part", "snippet,contentDetails,statistics"),
            ("id", ids.as_str()),
        ]);
        let response = send_with_retry(VENDOR, request).await?;
        let response = expect_success(VENDOR, response).await?;

        let body: VideosResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(VENDOR, e))?;

        let videos = body
            .items
            .into_iter()
            .filter_map(|item| {
                let Some(duration_minutes) =
                    iso8601_duration_to_minutes(&item.content_details.duration)
                else {
                    // Live streams report P0D; they have no fixed length to score
                    warn!(video_id = %item.id, duration = %item.content_details.duration,
                          "Skipping video with unparseable duration");
                    return None;
                };

                Some(Video {
                    video_id: item.id,
                    title: item.snippet.title,
                    channel_title: item.snippet.channel_title,
                    published_at: item.snippet.published_at,
                    duration_minutes,
                    view_count: item.statistics.view_count.unwrap_or(0),
                    like_count: item.statistics.like_count.unwrap_or(0),
                })
            })
            .collect();

        Ok(videos)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    channel_title: String,
    published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    snippet: Snippet,
    content_details: ContentDetails,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

/// The Data API serializes counters as strings; likes can be hidden.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    view_count: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    like_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parsing() {
        let json = r#"{
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "abc123"},
                    "snippet": {
                        "title": "A Video",
                        "description": "About things",
                        "channelTitle": "A Channel",
                        "publishedAt": "2025-08-20T10:00:00Z"
                    }
                },
                {
                    "id": {"kind": "youtube#channel"},
                    "snippet": {
                        "title": "A Channel Result",
                        "channelTitle": "A Channel",
                        "publishedAt": "2025-08-20T10:00:00Z"
                    }
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].id.video_id.as_deref(), Some("abc123"));
        assert!(parsed.items[1].id.video_id.is_none());
    }

    #[test]
    fn test_videos_response_parsing() {
        let json = r#"{
            "items": [
                {
                    "id": "abc123",
                    "snippet": {
                        "title": "A Video",
                        "channelTitle": "A Channel",
                        "publishedAt": "2025-08-20T10:00:00Z"
                    },
                    "contentDetails": {"duration": "PT12M30S"},
                    "statistics": {"viewCount": "15000", "likeCount": "420"}
                }
            ]
        }"#;

        let parsed: VideosResponse = serde_json::from_str(json).unwrap();
        let item = &parsed.items[0];

        assert_eq!(item.statistics.view_count, Some(15000));
        assert_eq!(item.statistics.like_count, Some(420));
        assert_eq!(
            iso8601_duration_to_minutes(&item.content_details.duration),
            Some(12.5)
        );
    }

    #[test]
    fn test_hidden_likes_parse_as_none() {
        let json = r#"{
            "items": [
                {
                    "id": "abc123",
                    "snippet": {
                        "title": "A Video",
                        "channelTitle": "A Channel",
                        "publishedAt": "2025-08-20T10:00:00Z"
                    },
                    "contentDetails": {"duration": "PT10M"},
                    "statistics": {"viewCount": "15000"}
                }
            ]
        }"#;

        let parsed: VideosResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items[0].statistics.like_count, None);
    }
}
