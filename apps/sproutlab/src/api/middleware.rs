//! # Rate Limiting
//!
//! A single process-wide limiter shared by every endpoint. The guide API
//! serves one session, so there is no per-client keying; the limiter's
//! only job is to keep a misbehaving frontend from hammering the server.
//!
//! The budget comes from the resolved [`crate::config::ServerConfig`]
//! (`rate_limit` key or `SPROUTLAB_RATE_LIMIT`, default 100 req/s;
//! 0 disables the layer entirely in `create_router`).

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Fallback budget when a zero slips through: 100 requests per second.
const DEFAULT_RPS: NonZeroU32 = NonZeroU32::new(100).unwrap();

// =============================================================================
// LIMITER CONSTRUCTION
// =============================================================================

/// Shared un-keyed limiter handle, cloned into the middleware state.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Build the process-wide limiter for `requests_per_second`.
///
/// A zero budget falls back to [`DEFAULT_RPS`] rather than panicking;
/// disabling the limiter is the router's decision, not this function's.
pub fn create_rate_limiter(requests_per_second: u32) -> GlobalRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(DEFAULT_RPS);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Answer 429 Too Many Requests once the budget is spent.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    match limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded");
            Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
