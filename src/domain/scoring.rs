//! Candidate video scoring and qualification rules.
//!
//! Scores combine three weighted signals:
//!
//! - **Engagement** (50%) - average-percentage-viewed above a 60% floor
//! - **Length** (30%) - closeness to the 12-minute sweet spot within 9-17 min
//! - **Age** (20%) - full credit for 6-78 weeks, half credit when older
//!
//! A candidate qualifies when its final score reaches [`QUALIFYING_SCORE`]
//! *and* it passes the hard length/age filters.

use chrono::{DateTime, Utc};

use crate::domain::entities::Video;

/// Minimum final score for a candidate to qualify.
pub const QUALIFYING_SCORE: f64 = 0.8;

/// Hard filter bounds: video length in minutes.
pub const LENGTH_BOUNDS_MINUTES: (f64, f64) = (9.0, 17.0);

/// Hard filter bounds: video age in weeks.
pub const AGE_BOUNDS_WEEKS: (f64, f64) = (6.0, 78.0);

/// The Analytics API is unavailable with an API key, so average view duration
/// is proxied as this fraction of video length. Engagement is therefore
/// biased upward; the 0.8 threshold accounts for it.
const AVD_PROXY_FRACTION: f64 = 0.7;

/// The viewing signals a score is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoSignals {
    /// Average view duration in minutes (proxied, see [`AVD_PROXY_FRACTION`]).
    pub avg_view_minutes: f64,
    /// Video length in minutes.
    pub length_minutes: f64,
    /// Video age in weeks.
    pub age_weeks: f64,
}

impl VideoSignals {
    /// Derives signals from a detailed video at a given point in time.
    pub fn from_video(video: &Video, now: DateTime<Utc>) -> Self {
        Self {
            avg_view_minutes: video.duration_minutes * AVD_PROXY_FRACTION,
            length_minutes: video.duration_minutes,
            age_weeks: video.age_weeks(now),
        }
    }

    /// Weighted final score in `[0.0, 1.0]`.
    pub fn final_score(&self) -> f64 {
        0.5 * self.engagement_score() + 0.3 * self.length_score() + 0.2 * self.age_score()
    }

    /// Returns `true` if this candidate is usable as a post source.
    pub fn qualifies(&self) -> bool {
        self.final_score() >= QUALIFYING_SCORE && self.passes_hard_filters()
    }

    /// Hard length/age bounds applied regardless of score.
    pub fn passes_hard_filters(&self) -> bool {
        let (min_len, max_len) = LENGTH_BOUNDS_MINUTES;
        let (min_age, max_age) = AGE_BOUNDS_WEEKS;

        (min_len..=max_len).contains(&self.length_minutes)
            && (min_age..=max_age).contains(&self.age_weeks)
    }

    /// Average-percentage-viewed signal: 0 at or below 60% APV, 1 at 100%.
    fn engagement_score(&self) -> f64 {
        if self.length_minutes <= 0.0 {
            return 0.0;
        }
        let apv = (self.avg_view_minutes / self.length_minutes) * 100.0;
        ((apv - 60.0) / 40.0).max(0.0)
    }

    /// Length signal: peaks at 12 minutes, zero outside 9-17 minutes.
    fn length_score(&self) -> f64 {
        let (min_len, max_len) = LENGTH_BOUNDS_MINUTES;
        if self.length_minutes < min_len || self.length_minutes > max_len {
            return 0.0;
        }
        (1.0 - ((self.length_minutes - 12.0).abs() / 5.0) * 0.3).max(0.0)
    }

    /// Age signal: 0 for under 6 weeks, 1 for 6-78 weeks, 0.5 after.
    fn age_score(&self) -> f64 {
        let (min_age, max_age) = AGE_BOUNDS_WEEKS;
        if self.age_weeks < min_age {
            0.0
        } else if self.age_weeks <= max_age {
            1.0
        } else {
            0.5
        }
    }
}
