//! YouTube adapters: Data API catalog and timedtext transcripts.

pub mod data_api;
pub mod timedtext;

pub use data_api::YouTubeDataApi;
pub use timedtext::TimedTextClient;
