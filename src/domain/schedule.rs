//! Posting schedule: weekday/time slots and the tick loop.
//!
//! The schedule is a cross product of weekdays and wall-clock times in the
//! server's local timezone. The tick loop sleeps until the next slot and
//! enqueues a scheduled [`RunRequest`].

use chrono::{DateTime, Datelike, Days, Local, NaiveTime, TimeZone, Weekday};
use tokio::sync::mpsc;

use crate::domain::run::RunRequest;

/// Errors that can occur while parsing a schedule specification.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleParseError {
    #[error("Invalid schedule weekday '{0}'")]
    InvalidWeekday(String),

    #[error("Invalid schedule time '{0}'")]
    InvalidTime(String),

    #[error("Schedule must contain at least one weekday")]
    NoDays,

    #[error("Schedule must contain at least one time")]
    NoTimes,
}

/// A weekly posting schedule: configured weekdays at configured times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSchedule {
    days: Vec<Weekday>,
    times: Vec<NaiveTime>,
}

impl PostSchedule {
    /// Parses a schedule from the `SCHEDULE_DAYS` / `SCHEDULE_TIMES` formats:
    /// comma-separated weekday abbreviations (`tue,wed,thu`) and `HH:MM`
    /// times (`10:05,14:35`).
    ///
    /// # Errors
    ///
    /// Returns an error if either list is empty or contains an unparseable
    /// entry.
    pub fn parse(days: &str, times: &str) -> Result<Self, ScheduleParseError> {
        let mut parsed_days = Vec::new();
        for part in days.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let day = parse_weekday(part)?;
            if !parsed_days.contains(&day) {
                parsed_days.push(day);
            }
        }

        let mut parsed_times = Vec::new();
        for part in times.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let time = NaiveTime::parse_from_str(part, "%H:%M")
                .map_err(|_| ScheduleParseError::InvalidTime(part.to_string()))?;
            if !parsed_times.contains(&time) {
                parsed_times.push(time);
            }
        }
        parsed_times.sort();

        if parsed_days.is_empty() {
            return Err(ScheduleParseError::NoDays);
        }
        if parsed_times.is_empty() {
            return Err(ScheduleParseError::NoTimes);
        }

        Ok(Self {
            days: parsed_days,
            times: parsed_times,
        })
    }

    /// Number of posting slots per week.
    pub fn slots_per_week(&self) -> usize {
        self.days.len() * self.times.len()
    }

    /// The next slot strictly after `after`, in local time.
    ///
    /// Always returns a value: with at least one weekday and one time, a slot
    /// exists within the next seven days.
    pub fn next_after(&self, after: DateTime<Local>) -> DateTime<Local> {
        for day_offset in 0..=7u64 {
            let date = after
                .date_naive()
                .checked_add_days(Days::new(day_offset))
                .expect("date arithmetic stays in range");

            if !self.days.contains(&date.weekday()) {
                continue;
            }

            for &time in &self.times {
                let naive = date.and_time(time);
                // earliest() resolves DST-ambiguous local times; a skipped
                // local time yields None and the slot is passed over.
                let Some(slot) = Local.from_local_datetime(&naive).earliest() else {
                    continue;
                };
                if slot > after {
                    return slot;
                }
            }
        }

        unreachable!("a non-empty weekly schedule always has a slot within 7 days")
    }
}

impl std::fmt::Display for PostSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let days: Vec<String> = self
            .days
            .iter()
            .map(|d| format!("{:?}", d).to_lowercase())
            .collect();
        let times: Vec<String> = self.times.iter().map(|t| t.format("%H:%M").to_string()).collect();
        write!(f, "{} at {} (local time)", days.join(","), times.join(","))
    }
}

fn parse_weekday(value: &str) -> Result<Weekday, ScheduleParseError> {
    let day = match value.to_lowercase().as_str() {
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tuesday" => Weekday::Tue,
        "wed" | "wednesday" => Weekday::Wed,
        "thu" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        "sun" | "sunday" => Weekday::Sun,
        other => return Err(ScheduleParseError::InvalidWeekday(other.to_string())),
    };
    Ok(day)
}

/// Sleeps until each schedule slot and enqueues a scheduled run.
///
/// Exits when the run queue is closed (service shutdown).
pub async fn run_schedule_loop(schedule: PostSchedule, tx: mpsc::Sender<RunRequest>) {
    loop {
        let now = Local::now();
        let next = schedule.next_after(now);
        let wait = (next - now)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        tracing::info!("Next scheduled run at {}", next.to_rfc3339());
        tokio::time::sleep(wait).await;

        if tx.send(RunRequest::scheduled()).await.is_err() {
            tracing::info!("Run queue closed, stopping scheduler");
            return;
        }
    }
}
