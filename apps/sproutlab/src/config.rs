//! # Server Configuration
//!
//! Server settings resolve in order: built-in defaults, then an optional
//! TOML config file, then environment variables, then CLI flags. The API
//! key itself is environment-only and never read from a file (see
//! `api::auth`).
//!
//! ## File format
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100
//! cors_origins = "http://localhost:3000"
//! ```

use serde::Deserialize;
use sproutlab_core::GuideError;
use std::path::Path;

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default global rate limit (requests per second).
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Optional fields as present in a TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    rate_limit: Option<u32>,
    cors_origins: Option<String>,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Requests per second for the global limiter; 0 disables limiting.
    pub rate_limit: u32,
    /// Comma-separated allowed CORS origins, or "*"; `None` means the
    /// restrictive localhost-only default.
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rate_limit: DEFAULT_RATE_LIMIT,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// Resolve the configuration: defaults ← file ← env ← CLI flags.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::IoError`] if the config file cannot be read and
    /// [`GuideError::ConfigError`] if it cannot be parsed.
    pub fn resolve(
        file: Option<&Path>,
        host_flag: Option<String>,
        port_flag: Option<u16>,
    ) -> Result<Self, GuideError> {
        let mut config = Self::default();

        if let Some(path) = file {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                GuideError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
            })?;
            let parsed: ConfigFile = toml::from_str(&contents).map_err(|e| {
                GuideError::ConfigError(format!("Invalid config '{}': {}", path.display(), e))
            })?;
            if let Some(host) = parsed.host {
                config.host = host;
            }
            if let Some(port) = parsed.port {
                config.port = port;
            }
            if let Some(rate_limit) = parsed.rate_limit {
                config.rate_limit = rate_limit;
            }
            if parsed.cors_origins.is_some() {
                config.cors_origins = parsed.cors_origins;
            }
        }

        // Environment overrides file.
        if let Some(rate_limit) = std::env::var("SPROUTLAB_RATE_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.rate_limit = rate_limit;
        }
        if let Ok(origins) = std::env::var("SPROUTLAB_CORS_ORIGINS") {
            config.cors_origins = Some(origins);
        }

        // CLI flags override everything.
        if let Some(host) = host_flag {
            config.host = host;
        }
        if let Some(port) = port_flag {
            config.port = port;
        }

        Ok(config)
    }

    /// The socket address string to bind to.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================
