//! Service implementations for the application layer.

pub mod auth_service;
pub mod composer_service;
pub mod pipeline_service;
pub mod publish_service;
pub mod selection_service;

pub use auth_service::AuthService;
pub use composer_service::ComposerService;
pub use pipeline_service::PipelineService;
pub use publish_service::PublishService;
pub use selection_service::{SelectionConfig, SelectionService};
