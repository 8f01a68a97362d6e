//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a per-client rate limiter for the management API.
///
/// # Limits
///
/// - **Replenish**: one request every `per_second` seconds
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be served with connect info.
///
/// # Panics
///
/// Panics if `per_second` or `burst` is zero. [`crate::config::Config::validate`]
/// rejects both.
pub fn layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
