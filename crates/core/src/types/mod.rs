//! Core domain types.
//!
//! All types in this module are plain data: serde-friendly, no I/O.

pub mod email;
pub mod id;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{CartItemId, InventoryId, MessageId, OrderId, ProductId, UserId};
pub use role::{Role, RoleParseError};
pub use status::OrderStatus;
