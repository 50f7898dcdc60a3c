//! Rate limiting middleware using token bucket algorithm.
//!
//! Client IPs come from the socket peer address, or from `X-Forwarded-For` /
//! `X-Real-IP` / `Forwarded` headers when the service runs behind a trusted
//! reverse proxy. The two key extractors produce different layer types, so the
//! choice is made here and callers only see a [`Router`].

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
struct Quota {
    per_second: u64,
    burst_size: u32,
}

/// 2 requests per second, burst of 100.
const PUBLIC: Quota = Quota {
    per_second: 2,
    burst_size: 100,
};

/// 1 request per second, burst of 10.
const SECURE: Quota = Quota {
    per_second: 1,
    burst_size: 10,
};

fn governor_layer<K: KeyExtractor>(
    key_extractor: K,
    quota: Quota,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(quota.per_second)
            .burst_size(quota.burst_size)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

fn apply_quota<S>(router: Router<S>, quota: Quota, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(governor_layer(SmartIpKeyExtractor, quota))
    } else {
        router.layer(governor_layer(PeerIpKeyExtractor, quota))
    }
}

/// Applies the public rate limit to every route of `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api::routes::public_routes(), config.behind_proxy);
/// ```
pub fn apply<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    apply_quota(router, PUBLIC, behind_proxy)
}

/// Applies the stricter limit used for credential checks and writes.
pub fn apply_secure<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    apply_quota(router, SECURE, behind_proxy)
}
