//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the worker
//! or server starts.
//!
//! ## Required Variables
//!
//! - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` / `GOOGLE_REFRESH_TOKEN` -
//!   OAuth client credentials and the long-lived refresh token used for the
//!   Blogger and Gmail APIs
//! - `YOUTUBE_API_KEY` - YouTube Data API v3 key (video search and details)
//! - `OPENROUTER_API_KEY` - OpenRouter key for content generation
//! - `BLOG_ID` - Target Blogger blog identifier
//! - `NICHE_DEFAULT` - Default niche key used by scheduled runs
//! - `ADMIN_TOKEN` - Bearer token for the manual-trigger endpoint
//!
//! ## Optional Variables
//!
//! - `MIN_BLOG_LENGTH` - Minimum generated post length in words (default: 800)
//! - `NOTIFY_EMAIL` - Recipient for publish notifications (disables email when unset)
//! - `OPENROUTER_MODEL` - Model slug (default: `anthropic/claude-3.5-sonnet`)
//! - `SCHEDULE_DAYS` / `SCHEDULE_TIMES` - Posting slots (default: `tue,wed,thu`
//!   at `10:05,14:35` local time)
//! - `MAX_SEARCH_PAGES` - Search rounds per run before giving up (default: 3)
//! - `SEARCH_MAX_RESULTS` - Candidates fetched per search round (default: 15)
//! - `SEARCH_PUBLISHED_WITHIN_HOURS` - Recency window for candidates, 0 for
//!   unbounded (default: 24)
//! - `RUN_QUEUE_CAPACITY` - Manual/scheduled run buffer size (default: 32)
//! - `HTTP_TIMEOUT_SECONDS` - Per-request timeout for vendor calls (default: 60)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IPs from forwarding headers (default: false)

use anyhow::{Context, Result};
use std::env;

use crate::domain::schedule::PostSchedule;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // ── Google OAuth (Blogger + Gmail) ──────────────────────────────────────
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_refresh_token: String,

    // ── Vendor keys ─────────────────────────────────────────────────────────
    pub youtube_api_key: String,
    pub openrouter_api_key: String,
    /// OpenRouter model slug used for post generation.
    pub openrouter_model: String,

    // ── Publishing ──────────────────────────────────────────────────────────
    pub blog_id: String,
    /// Recipient of post-publish notification emails. `None` disables email.
    pub notify_email: Option<String>,

    // ── Pipeline behavior ───────────────────────────────────────────────────
    pub niche_default: String,
    /// Minimum generated post length in words.
    pub min_blog_length: usize,
    /// Search rounds attempted per run before the run fails.
    pub max_search_pages: usize,
    /// Candidates requested per search round.
    pub search_max_results: usize,
    /// Only consider videos published within this many hours. 0 = unbounded.
    pub search_published_within_hours: u32,
    pub schedule: PostSchedule,
    pub run_queue_capacity: usize,

    // ── HTTP surface ────────────────────────────────────────────────────────
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP
    /// headers. Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Bearer token required by the manual-trigger endpoint.
    pub admin_token: String,

    // ── Vendor transport ────────────────────────────────────────────────────
    /// Per-request timeout for outbound vendor calls, in seconds.
    pub http_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required credential is missing or the
    /// schedule specification cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let google_client_id = require("GOOGLE_CLIENT_ID")?;
        let google_client_secret = require("GOOGLE_CLIENT_SECRET")?;
        let google_refresh_token = require("GOOGLE_REFRESH_TOKEN")?;
        let youtube_api_key = require("YOUTUBE_API_KEY")?;
        let openrouter_api_key = require("OPENROUTER_API_KEY")?;
        let blog_id = require("BLOG_ID")?;
        let niche_default = require("NICHE_DEFAULT")?;
        let admin_token = require("ADMIN_TOKEN")?;

        let openrouter_model = env::var("OPENROUTER_MODEL")
            .unwrap_or_else(|_| "anthropic/claude-3.5-sonnet".to_string());

        let notify_email = env::var("NOTIFY_EMAIL").ok().filter(|v| !v.is_empty());

        let min_blog_length = env::var("MIN_BLOG_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(800);

        let max_search_pages = env::var("MAX_SEARCH_PAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let search_max_results = env::var("SEARCH_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        let search_published_within_hours = env::var("SEARCH_PUBLISHED_WITHIN_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        let schedule_days =
            env::var("SCHEDULE_DAYS").unwrap_or_else(|_| "tue,wed,thu".to_string());
        let schedule_times =
            env::var("SCHEDULE_TIMES").unwrap_or_else(|_| "10:05,14:35".to_string());
        let schedule = PostSchedule::parse(&schedule_days, &schedule_times)
            .context("Failed to parse SCHEDULE_DAYS / SCHEDULE_TIMES")?;

        let run_queue_capacity = env::var("RUN_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(32);

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let http_timeout_seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Ok(Self {
            google_client_id,
            google_client_secret,
            google_refresh_token,
            youtube_api_key,
            openrouter_api_key,
            openrouter_model,
            blog_id,
            notify_email,
            niche_default,
            min_blog_length,
            max_search_pages,
            search_max_results,
            search_published_within_hours,
            schedule,
            run_queue_capacity,
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            admin_token,
            http_timeout_seconds,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Numeric limits are out of range
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    pub fn validate(&self) -> Result<()> {
        if self.min_blog_length < 100 {
            anyhow::bail!(
                "MIN_BLOG_LENGTH must be at least 100, got {}",
                self.min_blog_length
            );
        }

        if self.max_search_pages == 0 || self.max_search_pages > 10 {
            anyhow::bail!(
                "MAX_SEARCH_PAGES must be between 1 and 10, got {}",
                self.max_search_pages
            );
        }

        // The Data API caps search pages at 50 results.
        if self.search_max_results == 0 || self.search_max_results > 50 {
            anyhow::bail!(
                "SEARCH_MAX_RESULTS must be between 1 and 50, got {}",
                self.search_max_results
            );
        }

        if self.run_queue_capacity == 0 || self.run_queue_capacity > 1024 {
            anyhow::bail!(
                "RUN_QUEUE_CAPACITY must be between 1 and 1024, got {}",
                self.run_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.admin_token.len() < 16 {
            anyhow::bail!("ADMIN_TOKEN must be at least 16 characters");
        }

        if self.http_timeout_seconds == 0 || self.http_timeout_seconds > 300 {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.http_timeout_seconds
            );
        }

        if let Some(email) = &self.notify_email
            && !email.contains('@')
        {
            anyhow::bail!("NOTIFY_EMAIL must be an email address, got '{}'", email);
        }

        Ok(())
    }

    /// Returns whether publish notifications are enabled.
    pub fn is_email_enabled(&self) -> bool {
        self.notify_email.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Blog ID: {}", self.blog_id);
        tracing::info!("  Default niche: {}", self.niche_default);
        tracing::info!("  Model: {}", self.openrouter_model);
        tracing::info!("  Schedule: {}", self.schedule);
        tracing::info!("  YouTube key: {}", mask_secret(&self.youtube_api_key));
        tracing::info!(
            "  OpenRouter key: {}",
            mask_secret(&self.openrouter_api_key)
        );
        tracing::info!("  Google client: {}", mask_secret(&self.google_client_id));

        if let Some(email) = &self.notify_email {
            tracing::info!("  Notifications: {} (enabled)", email);
        } else {
            tracing::info!("  Notifications: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Run queue capacity: {}", self.run_queue_capacity);
    }
}

fn require(name: &'static str) -> Result<String> {
    let value = env::var(name).with_context(|| format!("{} must be set", name))?;
    if value.is_empty() {
        anyhow::bail!("{} must not be empty", name);
    }
    Ok(value)
}

/// Masks a secret for logging, keeping only a short recognizable prefix.
///
/// - `sk-or-v1-0123456789abcdef` → `sk-o***`
/// - short values are fully masked
fn mask_secret(secret: &str) -> String {
    if secret.len() <= 8 {
        return "***".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{}***", prefix)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
