//! Post entities produced by the composition and publishing stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully-assembled blog post, ready for publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedPost {
    pub title: String,
    /// Complete HTML body: attribution header, embedded player, generated content.
    pub html: String,
    /// Source video the post was derived from.
    pub video_id: String,
}

/// A post that has been accepted by the blogging platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedPost {
    /// Platform-assigned post identifier.
    pub post_id: String,
    pub title: String,
    pub video_id: String,
    pub published_at: DateTime<Utc>,
}
