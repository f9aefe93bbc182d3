//! ISO-8601 duration parsing for YouTube `contentDetails.duration` values.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the `PT#H#M#S` duration shape the Data API emits.
static DURATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").unwrap());

/// Converts an ISO-8601 duration (`PT#H#M#S`) to minutes.
///
/// Returns `None` for values that do not match the expected shape (the Data
/// API can emit `P0D` for live streams).
pub fn iso8601_duration_to_minutes(duration: &str) -> Option<f64> {
    let captures = DURATION_REGEX.captures(duration)?;

    let part = |i: usize| -> f64 {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0) as f64
    };

    let hours = part(1);
    let minutes = part(2);
    let seconds = part(3);

    Some(hours * 60.0 + minutes + seconds / 60.0)
}
