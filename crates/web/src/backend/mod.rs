//! Typed client for the Clotho backend REST API.
//!
//! # Architecture
//!
//! - All business logic (persistence, token issuance, payment capture,
//!   order totals) lives in the backend; this client only shuttles JSON.
//! - One `reqwest::Client` shared behind an `Arc`, cloned freely.
//! - The listed-products catalog is cached via `moka` (5 minute TTL); every
//!   other call goes straight through.
//! - Authenticated calls attach `Authorization: Bearer <token>` from the
//!   caller's session identity. The bearer is checked eagerly: an empty
//!   token fails with [`BackendError::MissingCredentials`] before any
//!   request is made, and the call site decides how to surface it.
//!
//! # Example
//!
//! ```rust,ignore
//! use clotho_web::backend::BackendClient;
//!
//! let backend = BackendClient::new(&config.backend);
//!
//! // Public catalog
//! let products = backend.list_listed_products().await?;
//!
//! // Authenticated calls take the bearer from the session identity
//! let orders = backend.list_my_orders(&identity.token).await?;
//! ```

mod auth;
mod cart;
mod checkout;
mod communication;
mod inventory;
mod orders;
pub mod products;
pub mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::BackendConfig;

/// Errors that can occur when talking to the Clotho backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not complete (DNS, connect, timeout, body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An authenticated call was attempted without a bearer token.
    #[error("no bearer token available for an authenticated call")]
    MissingCredentials,

    /// The backend rejected the bearer token (401/403).
    #[error("backend rejected the credentials")]
    Unauthorized,

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend returned a handled error payload (e.g. duplicate SKU).
    #[error("backend error {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The response body was not the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the Clotho backend REST API.
///
/// Cheap to clone; all methods take `&self`.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    catalog_cache: Cache<&'static str, Arc<Vec<Product>>>,
}

/// Cache key for the listed-products catalog.
const CATALOG_CACHE_KEY: &str = "listed_products";

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                catalog_cache,
            }),
        }
    }

    /// Build a full URL for a backend path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// The shared HTTP client.
    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// The catalog cache.
    fn catalog_cache(&self) -> &Cache<&'static str, Arc<Vec<Product>>> {
        &self.inner.catalog_cache
    }

    /// Validate a bearer token before attaching it.
    ///
    /// Mirrors the lazy-credential contract: the absence of a token is
    /// discovered at call time and surfaced as an error the call site
    /// handles, never a panic.
    fn bearer(token: &str) -> Result<&str, BackendError> {
        if token.is_empty() {
            return Err(BackendError::MissingCredentials);
        }
        Ok(token)
    }

    /// Map a non-success response into a `BackendError`.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized);
        }

        let url = response.url().path().to_owned();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(url));
        }

        // Backend error payloads are `{"error": "..."}`; fall back to raw text.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| body.chars().take(200).collect());

        tracing::warn!(status = %status, path = %url, "backend returned error payload");

        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Check the response and decode its JSON body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_client() -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: "https://backend.test/".to_owned(),
        })
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = test_client();
        assert_eq!(
            client.url("/api/orders/all"),
            "https://backend.test/api/orders/all"
        );
    }

    #[test]
    fn test_bearer_rejects_empty_token() {
        assert!(matches!(
            BackendClient::bearer(""),
            Err(BackendError::MissingCredentials)
        ));
        assert_eq!(BackendClient::bearer("tok").unwrap(), "tok");
    }

    #[test]
    fn test_error_display() {
        let err = BackendError::Rejected {
            status: 409,
            message: "duplicate SKU".to_owned(),
        };
        assert_eq!(err.to_string(), "backend error 409: duplicate SKU");

        let err = BackendError::NotFound("/products/9".to_owned());
        assert_eq!(err.to_string(), "not found: /products/9");
    }
}
