//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLOTHO_BACKEND_URL` - Base URL of the Clotho backend REST service
//! - `STRIPE_PUBLISHABLE_KEY` - Publishable key for the hosted card widget
//!
//! ## Optional
//! - `CLOTHO_HOST` - Bind address (default: 127.0.0.1)
//! - `CLOTHO_PORT` - Listen port (default: 3000)
//! - `CLOTHO_BASE_URL` - Public URL of this app (default: http://localhost:3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g. production)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct ClothoConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of this app (drives secure-cookie detection)
    pub base_url: String,
    /// Backend REST service configuration
    pub backend: BackendConfig,
    /// Publishable key handed to the payment widget in the browser
    pub stripe_publishable_key: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Clotho backend REST service configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://clotho-monolithic.onrender.com`
    pub base_url: String,
}

impl ClothoConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CLOTHO_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLOTHO_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("CLOTHO_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLOTHO_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("CLOTHO_BASE_URL", "http://localhost:3000");

        let backend = BackendConfig::from_env()?;
        let stripe_publishable_key = get_required_env("STRIPE_PUBLISHABLE_KEY")?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            base_url,
            backend,
            stripe_publishable_key,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("CLOTHO_BACKEND_URL")?;

        // Fail fast on a URL the client could never reach
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CLOTHO_BACKEND_URL".to_owned(), e.to_string())
        })?;

        Ok(Self { base_url })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ClothoConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            backend: BackendConfig {
                base_url: "https://backend.test".to_owned(),
            },
            stripe_publishable_key: "pk_test_abc".to_owned(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_backend_url_must_parse() {
        assert!(Url::parse("https://backend.test").is_ok());
        assert!(Url::parse("not a url").is_err());
    }
}
