//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating vendor port
//! calls, validation, and business rules. Services consume port traits and
//! provide a clean API for the worker and HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::selection_service::SelectionService`] - Candidate search, ranking, and transcript qualification
//! - [`services::composer_service::ComposerService`] - Prompt building and post assembly
//! - [`services::publish_service::PublishService`] - Blog publishing and email notification
//! - [`services::pipeline_service::PipelineService`] - Full-run orchestration
//! - [`services::auth_service::AuthService`] - Admin Bearer token authentication

pub mod services;
