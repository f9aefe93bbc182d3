//! Core business data structures.

pub mod niche;
pub mod post;
pub mod video;

pub use niche::{Niche, NicheCatalog, Offer, normalize_niche_key};
pub use post::{ComposedPost, PublishedPost};
pub use video::{Transcript, Video, VideoHit};
