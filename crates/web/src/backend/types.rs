//! Wire types for the Clotho backend REST API.
//!
//! Field names follow the backend's camelCase JSON. Monetary values are
//! `rust_decimal::Decimal`; the backend sends plain JSON numbers and the
//! default `Decimal` deserializer accepts those without going through `f64`
//! arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clotho_core::{CartItemId, InventoryId, MessageId, OrderId, OrderStatus, ProductId};

// =============================================================================
// Catalog
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sku_code: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default = "default_listed")]
    pub listed: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

const fn default_listed() -> bool {
    true
}

/// Fields accepted by product create/update.
///
/// Serialized as the JSON `product` part of the multipart payload; an image
/// file rides alongside as the `file` part.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sku_code: String,
    pub category: String,
    pub price: Decimal,
}

/// A stock record for one SKU.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: InventoryId,
    pub sku_code: String,
    pub quantity: i64,
}

/// Payload for inventory create/update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInput {
    pub sku_code: String,
    pub quantity: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// A pending-purchase line for the current identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub sku_code: String,
    pub category: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl CartItem {
    /// Line total (price x quantity) at full precision.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Payload for adding an item to the cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItem {
    pub sku_code: String,
    pub category: String,
    pub quantity: u32,
    pub price: Decimal,
}

// =============================================================================
// Orders
// =============================================================================

/// One SKU/quantity/price entry within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub sku_code: String,
    pub category: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderLineItem {
    /// Line total (price x quantity) at full precision.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A completed purchase. Read-only on the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Free-text, comma-delimited; by convention the country comes last.
    #[serde(default)]
    pub address: String,
    pub order_line_items: Vec<OrderLineItem>,
}

impl Order {
    /// Order total = sum of line totals, at full precision.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.order_line_items
            .iter()
            .map(OrderLineItem::line_total)
            .sum()
    }
}

// =============================================================================
// Communication
// =============================================================================

/// A customer inquiry in the admin inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replied: bool,
    #[serde(default)]
    pub reply_message: Option<String>,
}

/// Payload for the public contact-form submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

// =============================================================================
// Auth
// =============================================================================

/// Response of `POST /auth/login` - just the bearer credential.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id_token: String,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Raw namespaced role tag, e.g. `ROLE_ADMIN`. Parsed once at the
    /// auth boundary.
    pub role: String,
}

/// Response of `POST /auth/signup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub email: String,
    pub local_id: String,
    pub id_token: String,
}

/// Response of `GET /auth/user-count`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCountResponse {
    pub user_count: u64,
}

// =============================================================================
// Checkout
// =============================================================================

/// Response of `POST /api/checkout` - the payment collaborator's client
/// secret for confirming the intent in the hosted widget.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_order_deserializes_backend_shape() {
        let json = r#"{
            "id": 12,
            "orderNumber": "ORD-0012",
            "orderDate": "2024-01-15T10:30:00Z",
            "status": "CREATED",
            "address": "12 Main St, Springfield, USA",
            "orderLineItems": [
                {"id": 1, "skuCode": "ELEC-001", "category": "ELEC-phone", "quantity": 2, "price": 10.5}
            ]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_number, "ORD-0012");
        assert!(order.status.is_created());
        assert_eq!(order.total(), dec("21.0"));
    }

    #[test]
    fn test_order_total_sums_line_totals() {
        let order = Order {
            id: OrderId::new(1),
            order_number: "ORD-1".into(),
            order_date: Utc::now(),
            status: OrderStatus::Created,
            address: String::new(),
            order_line_items: vec![
                OrderLineItem {
                    id: None,
                    sku_code: "A".into(),
                    category: "ELEC-phone".into(),
                    quantity: 2,
                    price: dec("10.00"),
                },
                OrderLineItem {
                    id: None,
                    sku_code: "B".into(),
                    category: "BOOK-fiction".into(),
                    quantity: 1,
                    price: dec("5.00"),
                },
            ],
        };

        assert_eq!(order.total(), dec("25.00"));
    }

    #[test]
    fn test_product_listed_defaults_to_true() {
        let json = r#"{"id": 3, "name": "Tee", "skuCode": "CLOTH-001",
                       "category": "CLOTH-tops", "price": 19.99}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.listed);
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_message_reply_absent_until_replied() {
        let json = r#"{"id": 9, "name": "Ada", "email": "ada@example.com",
                       "message": "Where is my order?"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert!(!message.replied);
        assert!(message.reply_message.is_none());
    }
}
