//! # SproutLab HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /catalog` - The ordered step catalog
//! - `GET /state` - Mutable session state snapshot
//! - `GET /status` - Derived status projection
//! - `GET /component/{component}` - Single-component derived status
//! - `POST /step/activate` - Move the active pointer
//! - `POST /step/toggle` - Toggle a step's completion
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `SPROUTLAB_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `SPROUTLAB_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `SPROUTLAB_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

// Re-exports for external use
pub use auth::get_api_key_from_env;
pub use middleware::create_rate_limiter;
// Re-export handlers and types for integration tests (via `sproutlab::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    activate_handler, catalog_handler, component_handler, health_handler, state_handler,
    status_handler, toggle_handler,
};
#[allow(unused_imports)]
pub use types::{
    ActivateRequest, ActivateResponse, CatalogResponse, ComponentResponse, ComponentStatusJson,
    HealthResponse, StateResponse, StatusResponse, StepJson, ToggleRequest, ToggleResponse,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use sproutlab_core::{GuideError, GuideSession};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the guide session.
///
/// The session engine is clock-free; `epoch` anchors its millisecond
/// timeline to the moment the state was created, so every handler feeds
/// it the same monotone clock.
#[derive(Clone)]
pub struct AppState {
    /// The session containing the guide.
    pub session: Arc<RwLock<GuideSession>>,
    /// Timeline origin for `now_ms`.
    epoch: Instant,
}

impl AppState {
    /// Create new app state with a session.
    #[must_use]
    pub fn new(session: GuideSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            epoch: Instant::now(),
        }
    }

    /// Milliseconds elapsed since this state was created.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from the resolved configuration.
///
/// Interprets `ServerConfig::cors_origins` (file key `cors_origins` or
/// `SPROUTLAB_CORS_ORIGINS` env var):
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
///
/// # Security Note
///
/// The default is restrictive (localhost only). Set
/// `SPROUTLAB_CORS_ORIGINS=*` explicitly only for development or if you
/// understand the security implications.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    match config.cors_origins.as_deref() {
        Some("*") => {
            // Explicit wildcard - warn about security implications
            tracing::warn!(
                "CORS: Allowing ALL origins (SPROUTLAB_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            // Parse comma-separated origins
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins configured, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            }
        }
        None => {
            // No configuration - default to localhost only (restrictive)
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. CORS - handles preflight requests
/// 2. Tracing - logs all requests
/// 3. Rate Limiting - protects against DoS (if enabled)
/// 4. Authentication - validates API key (if configured)
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);

    // Check if rate limiting is enabled
    let rate_limiter = if config.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
        Some(create_rate_limiter(config.rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    // Check if authentication is enabled
    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "⚠️  API key authentication DISABLED - all endpoints are publicly accessible! \
             Set SPROUTLAB_API_KEY environment variable to enable authentication."
        );
    }

    // Build base router with routes
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/catalog", get(handlers::catalog_handler))
        .route("/state", get(handlers::state_handler))
        .route("/status", get(handlers::status_handler))
        .route("/component/{component}", get(handlers::component_handler))
        .route("/step/activate", post(handlers::activate_handler))
        .route("/step/toggle", post(handlers::toggle_handler));

    // Apply authentication middleware (innermost - runs last on request)
    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    // Apply rate limiting middleware
    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    // Apply CORS, body limit, and tracing (outermost layers)
    router
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(config: &ServerConfig, session: GuideSession) -> Result<(), GuideError> {
    let state = AppState::new(session);
    let router = create_router(state, config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GuideError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("SproutLab HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| GuideError::IoError(format!("Server error: {}", e)))
}
