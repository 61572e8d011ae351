//! Business logic services.
//!
//! Each service is a thin, testable layer between the route handlers and
//! the backend client: `guard` decides who may see a route, `inventory`
//! joins products with their stock records, `invoice` renders order PDFs.

pub mod guard;
pub mod inventory;
pub mod invoice;
