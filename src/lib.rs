//! # Blogworker
//!
//! An automated content pipeline that turns popular YouTube videos into
//! published blog posts: find a qualified source video for a niche, rewrite
//! its transcript into an original post, publish it to Blogger, and send a
//! notification email.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, scoring, schedule, vendor port traits
//! - **Application Layer** ([`application`]) - Selection, composition, publishing, orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - YouTube, OpenRouter, and Google API adapters
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Weekly posting schedule with manual trigger endpoint
//! - Engagement-based video ranking and transcript qualification
//! - One-at-a-time pipeline runs through a background worker
//! - Bearer-token admin API with rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables (see config module for the full list)
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REFRESH_TOKEN="..."
//! export YOUTUBE_API_KEY="..."
//! export OPENROUTER_API_KEY="..."
//! export BLOG_ID="..."
//! export NICHE_DEFAULT="weight_loss"
//! export ADMIN_TOKEN="a-long-random-token"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, PipelineService, SelectionService};
    pub use crate::domain::entities::{Niche, NicheCatalog, Video};
    pub use crate::domain::run::{RunRequest, RunStatus, RunTrigger};
    pub use crate::domain::schedule::PostSchedule;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
