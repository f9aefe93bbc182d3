//! Caption transcript fetching via the public timedtext endpoint,
//! implementing [`TranscriptSource`].

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::domain::entities::Transcript;
use crate::domain::ports::TranscriptSource;
use crate::error::{AppError, map_reqwest_error};
use crate::infrastructure::http::{expect_success, send_with_retry};

const VENDOR: &str = "YouTube timedtext";
const TIMEDTEXT_URL: &str = "https://video.google.com/timedtext";

static TRACK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<track\s+([^>]*?)/?>").unwrap());
static ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w:]+)="([^"]*)""#).unwrap());
static TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text[^>]*>(.*?)</text>").unwrap());
static NUMERIC_ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d+);").unwrap());

/// One available caption track, from the track-list response.
#[derive(Debug, Clone, PartialEq)]
struct CaptionTrack {
    lang_code: String,
    name: Option<String>,
}

pub struct TimedTextClient {
    http: Client,
}

impl TimedTextClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, AppError> {
        let request = self
            .http
            .get(TIMEDTEXT_URL)
            .query(&[("type", "list"), ("v", video_id)]);
        let response = send_with_retry(VENDOR, request).await?;
        let response = expect_success(VENDOR, response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(VENDOR, e))?;

        Ok(parse_track_list(&body))
    }

    async fn fetch_track(
        &self,
        video_id: &str,
        track: &CaptionTrack,
    ) -> Result<Option<Transcript>, AppError> {
        let mut params = vec![("v", video_id), ("lang", track.lang_code.as_str())];
        if let Some(name) = &track.name {
            params.push(("name", name.as_str()));
        }

        let request = self.http.get(TIMEDTEXT_URL).query(&params);
        let response = send_with_retry(VENDOR, request).await?;
        let response = expect_success(VENDOR, response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(VENDOR, e))?;

        let text = parse_caption_text(&body);
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(Transcript::new(text)))
    }
}

#[async_trait]
impl TranscriptSource for TimedTextClient {
    async fn fetch_english(&self, video_id: &str) -> Result<Option<Transcript>, AppError> {
        let tracks = self.list_tracks(video_id).await?;
        let Some(track) = pick_english_track(&tracks) else {
            debug!(video_id, tracks = tracks.len(), "No English caption track");
            return Ok(None);
        };

        debug!(video_id, lang = %track.lang_code, "Fetching caption track");
        self.fetch_track(video_id, track).await
    }
}

/// Picks the English track to use: exact `en` first, then the regional
/// variants, then anything English-tagged.
fn pick_english_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    for preferred in ["en", "en-US", "en-GB"] {
        if let Some(track) = tracks.iter().find(|t| t.lang_code == preferred) {
            return Some(track);
        }
    }
    tracks.iter().find(|t| t.lang_code.starts_with("en"))
}

fn parse_track_list(xml: &str) -> Vec<CaptionTrack> {
    TRACK_REGEX
        .captures_iter(xml)
        .filter_map(|track| {
            let mut lang_code = None;
            let mut name = None;
            for attr in ATTR_REGEX.captures_iter(&track[1]) {
                match &attr[1] {
                    "lang_code" => lang_code = Some(attr[2].to_string()),
                    "name" if !attr[2].is_empty() => name = Some(decode_entities(&attr[2])),
                    _ => {}
                }
            }
            Some(CaptionTrack {
                lang_code: lang_code?,
                name,
            })
        })
        .collect()
}

/// Extracts and joins the caption lines from a timedtext XML document.
fn parse_caption_text(xml: &str) -> String {
    let lines: Vec<String> = TEXT_REGEX
        .captures_iter(xml)
        .map(|c| decode_entities(c[1].trim()))
        .filter(|line| !line.is_empty())
        .collect();

    lines.join(" ")
}

/// Decodes the entities the timedtext endpoint emits. Named references
/// first so that doubly-escaped text (`&amp;#39;`) resolves in one pass.
fn decode_entities(text: &str) -> String {
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    NUMERIC_ENTITY_REGEX
        .replace_all(&text, |caps: &regex::Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_LIST: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<transcript_list docid="123">
  <track id="0" name="" lang_code="de" lang_original="Deutsch" lang_translated="German"/>
  <track id="1" name="CC" lang_code="en-GB" lang_original="English" lang_translated="English" lang_default="true"/>
</transcript_list>"#;

    #[test]
    fn test_parse_track_list() {
        let tracks = parse_track_list(TRACK_LIST);

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].lang_code, "de");
        assert_eq!(tracks[0].name, None);
        assert_eq!(tracks[1].lang_code, "en-GB");
        assert_eq!(tracks[1].name.as_deref(), Some("CC"));
    }

    #[test]
    fn test_pick_prefers_exact_en() {
        let tracks = vec![
            CaptionTrack {
                lang_code: "en-GB".to_string(),
                name: None,
            },
            CaptionTrack {
                lang_code: "en".to_string(),
                name: None,
            },
        ];

        assert_eq!(pick_english_track(&tracks).unwrap().lang_code, "en");
    }

    #[test]
    fn test_pick_falls_back_to_any_english_variant() {
        let tracks = vec![
            CaptionTrack {
                lang_code: "fr".to_string(),
                name: None,
            },
            CaptionTrack {
                lang_code: "en-IN".to_string(),
                name: None,
            },
        ];

        assert_eq!(pick_english_track(&tracks).unwrap().lang_code, "en-IN");
        assert!(pick_english_track(&tracks[..1]).is_none());
    }

    #[test]
    fn test_parse_caption_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<transcript>
  <text start="0.5" dur="3.2">today we talk about</text>
  <text start="3.7" dur="2.1">what &amp;quot;works&amp;quot; &amp;#39;for real&amp;#39;</text>
  <text start="5.8" dur="1.0"></text>
</transcript>"#;

        assert_eq!(
            parse_caption_text(xml),
            "today we talk about what \"works\" 'for real'"
        );
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&#8217;tis"), "\u{2019}tis");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn test_empty_document_yields_no_transcript() {
        assert!(parse_caption_text("").is_empty());
        assert!(parse_track_list("<transcript_list/>").is_empty());
    }
}
