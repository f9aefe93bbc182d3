//! Domain layer containing business entities and logic.
//!
//! This module implements the core pipeline logic following Clean Architecture
//! principles. It defines entities, vendor port traits, and the scoring rules
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`ports`] - Vendor adapter trait definitions
//! - [`scoring`] - Candidate video scoring and qualification rules
//! - [`run`] - Pipeline run request and status models
//! - [`schedule`] - Posting schedule and slot computation
//! - [`pipeline_worker`] - Asynchronous pipeline run worker
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Port traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Run Processing Flow
//!
//! 1. Scheduler or the trigger endpoint enqueues a [`run::RunRequest`]
//! 2. [`pipeline_worker::run_pipeline_worker`] consumes requests one at a time
//! 3. A run selects a video, composes a post, publishes, and notifies
//! 4. The shared [`run::RunStatus`] is updated for the status endpoint

pub mod entities;
pub mod pipeline_worker;
pub mod ports;
pub mod run;
pub mod schedule;
pub mod scoring;
