//! Google API adapters: OAuth token refresh, Blogger, and Gmail.

pub mod blogger;
pub mod gmail;
pub mod token_provider;

pub use blogger::BloggerClient;
pub use gmail::GmailClient;
pub use token_provider::GoogleTokenProvider;
