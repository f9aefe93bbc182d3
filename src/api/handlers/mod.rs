//! HTTP request handlers.

pub mod health;
pub mod root;
pub mod run;
pub mod status;

pub use health::health_handler;
pub use root::root_handler;
pub use run::run_handler;
pub use status::status_handler;
