//! Infrastructure adapters for external vendor APIs.
//!
//! Each submodule implements one or more of the domain port traits over a
//! vendor's HTTP API using a shared `reqwest` client:
//!
//! - [`youtube`] - Data API search/details and timedtext transcripts
//! - [`openrouter`] - chat-completion content writing
//! - [`google`] - OAuth token refresh, Blogger publishing, Gmail sending

pub mod google;
pub mod http;
pub mod openrouter;
pub mod youtube;
