//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session only
//! carries the login snapshot (identity + bearer token); the backend owns
//! everything else, so losing sessions on restart just means signing in
//! again.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ClothoConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "clotho_session";

/// Create the session layer with an in-memory store.
///
/// The cookie expires with the browser session, so each browsing session
/// starts signed out.
#[must_use]
pub fn create_session_layer(config: &ClothoConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
