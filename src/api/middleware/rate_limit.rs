//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Sustained rate for the admin API, per client IP.
const PER_SECOND: u64 = 1;
/// Burst size for the admin API.
const BURST: u32 = 10;

/// Creates a rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn secure_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`secure_layer`], but keyed by the client IP taken from
/// `X-Forwarded-For` / `X-Real-IP` / `Forwarded` headers.
///
/// Use only behind a trusted reverse proxy; the headers are client-supplied
/// otherwise.
pub fn proxy_secure_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
