//! Domain models for the web crate.
//!
//! The backend owns all persistent entities; the only state modelled here
//! is what the session layer stores between requests.

pub mod session;

pub use session::{CurrentIdentity, keys as session_keys};
