//! # API Key Authentication
//!
//! Optional bearer-token gate in front of the guide endpoints.
//!
//! The key lives in the `SPROUTLAB_API_KEY` environment variable only —
//! never in the config file, so a shared `sproutlab.toml` cannot leak it.
//! When the variable is unset or empty the gate is wide open and the
//! router logs a startup warning instead.
//!
//! Clients send the key as `Authorization: Bearer <key>`; a raw
//! `Authorization: <key>` header is accepted too.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

// =============================================================================
// KEY RESOLUTION
// =============================================================================

/// Read the configured API key.
///
/// An unset or empty `SPROUTLAB_API_KEY` disables authentication.
pub fn get_api_key_from_env() -> Option<String> {
    std::env::var("SPROUTLAB_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

/// Compare a provided key against the expected one without leaking
/// timing information.
///
/// Both byte strings are zero-padded to a common length before the
/// `ct_eq` pass, so the comparison touches the same number of bytes
/// whatever the attacker sends; the length check is folded in afterwards.
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    let width = provided.len().max(expected.len());
    let mut lhs = vec![0u8; width];
    let mut rhs = vec![0u8; width];
    lhs[..provided.len()].copy_from_slice(provided);
    rhs[..expected.len()].copy_from_slice(expected);

    let content_eq: bool = lhs.ct_eq(&rhs).into();
    content_eq && provided.len() == expected.len()
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Reject requests that do not carry the configured API key.
///
/// `/health` is exempt so load balancers can probe the server without
/// credentials. With no key configured every request passes through.
pub async fn api_key_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let Some(expected) = get_api_key_from_env() else {
        return Ok(next.run(request).await);
    };

    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(header_value) => {
            let provided = header_value.strip_prefix("Bearer ").unwrap_or(header_value);

            if keys_match(provided.as_bytes(), expected.as_bytes()) {
                Ok(next.run(request).await)
            } else {
                tracing::warn!(
                    event = "auth_failure",
                    reason = "invalid_api_key",
                    "Authentication failed: invalid API key"
                );
                Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
            }
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "Missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
