//! CLI administration tool for blogworker.
//!
//! Provides commands for running the pipeline once, scouting candidate
//! videos, and checking configuration without the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # Run the pipeline once for the default niche
//! cargo run --bin admin -- run
//!
//! # Run for a specific niche, skipping the confirmation prompt
//! cargo run --bin admin -- run --niche weight_loss -y
//!
//! # Score candidate videos and write them to a JSON report
//! cargo run --bin admin -- scout --output candidates.json
//!
//! # Validate configuration
//! cargo run --bin admin -- config check
//! ```
//!
//! # Environment Variables
//!
//! `run` and `config check` need the full service configuration; `scout`
//! only needs `YOUTUBE_API_KEY`.
//!
//! # Features
//!
//! - **One-shot Runs**: Execute the full pipeline from the terminal
//! - **Scouting**: Score candidates with the strict engagement filters
//! - **Config Tools**: Load and validate environment configuration
//! - **Interactive Prompts**: Confirmation dialog before publishing
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use blogworker::config;
use blogworker::domain::entities::NicheCatalog;
use blogworker::domain::ports::VideoCatalog;
use blogworker::domain::scoring::VideoSignals;
use blogworker::infrastructure::http::build_client;
use blogworker::infrastructure::youtube::YouTubeDataApi;
use blogworker::server::build_pipeline;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// CLI tool for managing blogworker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once and publish the result
    Run {
        /// Niche key (defaults to NICHE_DEFAULT)
        #[arg(short, long)]
        niche: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Score candidate videos and write a JSON report
    Scout {
        /// Limit scouting to one niche key
        #[arg(short, long)]
        niche: Option<String>,

        /// Output file path
        #[arg(short, long, default_value = "youtube_videos.json")]
        output: String,

        /// Candidates fetched per keyword
        #[arg(long, default_value_t = 10)]
        per_keyword: usize,

        /// Include candidates that fail the qualification filters
        #[arg(long)]
        include_unqualified: bool,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration from the environment
    Check,
}

/// One scored candidate in the scout report.
#[derive(Serialize)]
struct ScoutEntry {
    video_id: String,
    title: String,
    url: String,
    score: f64,
    qualified: bool,
    duration_minutes: f64,
    age_weeks: f64,
    views: u64,
    likes: u64,
}

impl ScoutEntry {
    fn from_video(video: blogworker::domain::entities::Video, now: chrono::DateTime<Utc>) -> Self {
        let signals = VideoSignals::from_video(&video, now);
        let age_weeks = video.age_weeks(now);
        Self {
            url: format!("https://www.youtube.com/watch?v={}", video.video_id),
            video_id: video.video_id,
            title: video.title,
            score: signals.final_score(),
            qualified: signals.qualifies(),
            duration_minutes: video.duration_minutes,
            age_weeks,
            views: video.view_count,
            likes: video.like_count,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { niche, yes } => run_once(niche, yes).await?,
        Commands::Scout {
            niche,
            output,
            per_keyword,
            include_unqualified,
        } => scout(niche, output, per_keyword, include_unqualified).await?,
        Commands::Config { action } => match action {
            ConfigAction::Check => config_check()?,
        },
    }

    Ok(())
}

/// Runs the full pipeline once from the terminal.
///
/// # Flow
///
/// 1. Load and validate configuration
/// 2. Confirm the target niche and blog (unless `--yes`)
/// 3. Select, compose, publish, notify
/// 4. Display the published post id
async fn run_once(niche: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🚀 One-shot Pipeline Run".bright_blue().bold());
    println!();

    let config = config::load_from_env()?;
    let niche_key = niche.unwrap_or_else(|| config.niche_default.clone());

    println!("  Niche:  {}", niche_key.cyan());
    println!("  Blog:   {}", config.blog_id.cyan());
    println!("  Model:  {}", config.openrouter_model.cyan());
    println!();
    println!(
        "{}",
        "⚠️  This will publish a live post to the configured blog."
            .yellow()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Run the pipeline now?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let pipeline = build_pipeline(&config)?;

    println!();
    println!("{}", "Selecting and composing...".bright_black());

    let outcome = pipeline
        .run(Some(&niche_key))
        .await
        .map_err(|e| anyhow::anyhow!("Pipeline run failed: {}", e))?;

    println!();
    println!("{}", "✅ Post published!".green().bold());
    println!();
    println!("  Title:   {}", outcome.post.title.bright_white());
    println!("  Post ID: {}", outcome.post.post_id.bright_yellow());
    println!(
        "  Source:  https://www.youtube.com/watch?v={}",
        outcome.post.video_id.bright_black()
    );
    println!();

    Ok(())
}

/// Scores candidate videos for each niche keyword and writes a JSON report.
///
/// Unlike the pipeline's selection stage, scouting applies the strict
/// qualification bar (score threshold plus length and age filters) and
/// searches without a recency window, so the report shows which videos
/// would clear the full bar.
async fn scout(
    niche: Option<String>,
    output: String,
    per_keyword: usize,
    include_unqualified: bool,
) -> Result<()> {
    println!("{}", "🔭 Scouting Candidate Videos".bright_blue().bold());
    println!();

    let api_key = std::env::var("YOUTUBE_API_KEY").context("YOUTUBE_API_KEY must be set")?;
    let http = build_client(60)?;
    let catalog = Arc::new(YouTubeDataApi::new(http, api_key));

    let niches = NicheCatalog::builtin();
    let selected: Vec<_> = match &niche {
        Some(key) => {
            let n = niches
                .get(key)
                .with_context(|| format!("Unknown niche '{}'", key))?;
            vec![n.clone()]
        }
        None => niches.iter().cloned().collect(),
    };

    let now = Utc::now();
    let mut report: BTreeMap<String, Vec<ScoutEntry>> = BTreeMap::new();

    for niche in &selected {
        println!("  Niche: {}", niche.key.cyan().bold());
        let mut entries: Vec<ScoutEntry> = Vec::new();

        for keyword in &niche.keywords {
            print!("    {} ... ", keyword.bright_black());

            let hits = catalog.search(keyword, per_keyword, None).await?;
            let ids: Vec<String> = hits.into_iter().map(|h| h.video_id).collect();
            let videos = catalog.details(&ids).await?;
            println!("{} candidate(s)", videos.len().to_string().bright_white());

            for video in videos {
                if entries.iter().any(|e| e.video_id == video.video_id) {
                    continue;
                }

                let entry = ScoutEntry::from_video(video, now);
                if !entry.qualified && !include_unqualified {
                    continue;
                }
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let qualified_count = entries.iter().filter(|e| e.qualified).count();
        println!(
            "    {} scored, {} qualified",
            entries.len().to_string().bright_white().bold(),
            qualified_count.to_string().green().bold()
        );
        println!();

        report.insert(niche.key.clone(), entries);
    }

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&output, json).with_context(|| format!("Failed to write {}", output))?;

    println!("{} {}", "✅ Report written to".green().bold(), output.bright_white());
    println!();

    Ok(())
}

/// Loads and validates configuration, printing a masked summary.
fn config_check() -> Result<()> {
    println!("{}", "🔍 Checking configuration...".bright_blue());
    println!();

    let config = config::load_from_env()?;

    println!("  Listen:     {}", config.listen_addr.bright_white());
    println!("  Blog ID:    {}", config.blog_id.bright_white());
    println!("  Niche:      {}", config.niche_default.bright_white());
    println!("  Model:      {}", config.openrouter_model.bright_white());
    println!("  Schedule:   {}", config.schedule.to_string().bright_white());
    println!(
        "  Email:      {}",
        config
            .notify_email
            .as_deref()
            .unwrap_or("disabled")
            .bright_white()
    );
    println!();
    println!("{}", "✅ Configuration OK".green().bold());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogworker::domain::entities::Video;

    fn video(duration_minutes: f64, age_weeks: i64, now: chrono::DateTime<Utc>) -> Video {
        Video {
            video_id: "vid1".to_string(),
            title: "Ten Minute Workout".to_string(),
            channel_title: "Channel".to_string(),
            published_at: now - chrono::Duration::weeks(age_weeks),
            duration_minutes,
            view_count: 10_000,
            like_count: 500,
        }
    }

    #[test]
    fn test_scout_entry_from_video() {
        let now = Utc::now();

        let entry = ScoutEntry::from_video(video(12.0, 10, now), now);

        assert_eq!(entry.video_id, "vid1");
        assert_eq!(entry.title, "Ten Minute Workout");
        assert_eq!(entry.url, "https://www.youtube.com/watch?v=vid1");
        assert!((entry.age_weeks - 10.0).abs() < 0.1);
        assert_eq!(entry.views, 10_000);
        assert_eq!(entry.likes, 500);

        // Ideal length and age; engagement capped by the watch-time proxy
        assert!((entry.score - 0.625).abs() < 1e-9);
    }

    #[test]
    fn test_scout_entry_applies_hard_filters() {
        let now = Utc::now();

        let too_short = ScoutEntry::from_video(video(5.0, 10, now), now);
        assert!(!too_short.qualified);
        assert_eq!(too_short.duration_minutes, 5.0);

        let too_old = ScoutEntry::from_video(video(12.0, 100, now), now);
        assert!(!too_old.qualified);
    }
}
