//! Handler for the root liveness endpoint.

/// Plain-text liveness probe.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"), " is running")
}
