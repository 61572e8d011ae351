//! Clotho web library.
//!
//! Exposes the storefront/admin-console internals as a library so the
//! guard rules, analytics folds, and backend client can be exercised from
//! the integration-tests crate.
//!
//! All persistent data lives in the external Clotho backend; this crate is
//! a view layer plus the session that carries the bearer token between
//! requests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
