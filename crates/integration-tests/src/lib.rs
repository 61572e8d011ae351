//! Integration tests for Clotho.
//!
//! # Running Tests
//!
//! The scenario tests (`guard_scenarios`, `analytics_scenarios`) are pure
//! and run with a plain `cargo test -p clotho-integration-tests`.
//!
//! The HTTP smoke tests are `#[ignore]`d because they need a running
//! instance:
//!
//! ```bash
//! # Terminal 1: start the app against a reachable backend
//! CLOTHO_BACKEND_URL=... STRIPE_PUBLISHABLE_KEY=pk_test_x cargo run -p clotho-web
//!
//! # Terminal 2
//! cargo test -p clotho-integration-tests -- --ignored
//! ```

/// Base URL for the running web app (configurable via environment).
#[must_use]
pub fn web_base_url() -> String {
    std::env::var("CLOTHO_WEB_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
