//! Clotho Core - Shared types library.
//!
//! This crate provides common types used across the Clotho components:
//! - `web` - Server-rendered storefront and admin console
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! rendering. Everything here is cheap to construct and safe to store in a
//! session.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
