//! PDF invoice rendering for a single order.
//!
//! Produces an A4 invoice entirely in memory; the orders route streams the
//! bytes back with a `Content-Disposition: attachment` header.

use printpdf::{BuiltinFont, Line, Mm, PdfDocument, PdfLayerReference, Point};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::backend::types::Order;
use crate::models::CurrentIdentity;

/// A4 page, all positions in millimetres.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;

/// Error rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("pdf error: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Render the invoice PDF for one order.
///
/// # Errors
///
/// Returns an error if PDF assembly or serialization fails.
pub fn render_invoice(order: &Order, identity: &CurrentIdentity) -> Result<Vec<u8>, InvoiceError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", order.order_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "invoice",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT - MARGIN;

    // ====== Header ======
    layer.use_text("Clotho", 22.0, Mm(MARGIN), Mm(y), &bold);
    layer.use_text("INVOICE", 14.0, Mm(PAGE_WIDTH - MARGIN - 30.0), Mm(y), &bold);
    y -= 2.0 * LINE_HEIGHT;
    rule(&layer, y + LINE_HEIGHT / 2.0);

    // ====== Bill-to and order metadata ======
    layer.use_text("Billed to:", 10.0, Mm(MARGIN), Mm(y), &bold);
    y -= LINE_HEIGHT;
    layer.use_text(identity.display_name.as_str(), 10.0, Mm(MARGIN), Mm(y), &regular);
    y -= LINE_HEIGHT;
    layer.use_text(identity.email.as_str(), 10.0, Mm(MARGIN), Mm(y), &regular);
    y -= LINE_HEIGHT;
    if !order.address.is_empty() {
        layer.use_text(order.address.as_str(), 10.0, Mm(MARGIN), Mm(y), &regular);
        y -= LINE_HEIGHT;
    }
    y -= LINE_HEIGHT;

    layer.use_text(
        format!("Order: {}", order.order_number),
        10.0,
        Mm(MARGIN),
        Mm(y),
        &regular,
    );
    layer.use_text(
        format!("Date: {}", order.order_date.format("%d %b %Y")),
        10.0,
        Mm(MARGIN + 60.0),
        Mm(y),
        &regular,
    );
    layer.use_text(
        format!("Status: {}", order.status),
        10.0,
        Mm(MARGIN + 120.0),
        Mm(y),
        &regular,
    );
    y -= 2.0 * LINE_HEIGHT;

    // ====== Line items ======
    layer.use_text("SKU", 10.0, Mm(MARGIN), Mm(y), &bold);
    layer.use_text("Qty", 10.0, Mm(MARGIN + 80.0), Mm(y), &bold);
    layer.use_text("Unit price", 10.0, Mm(MARGIN + 105.0), Mm(y), &bold);
    layer.use_text("Total", 10.0, Mm(MARGIN + 140.0), Mm(y), &bold);
    y -= LINE_HEIGHT / 2.0;
    rule(&layer, y);
    y -= LINE_HEIGHT;

    for item in &order.order_line_items {
        layer.use_text(item.sku_code.as_str(), 10.0, Mm(MARGIN), Mm(y), &regular);
        layer.use_text(
            item.quantity.to_string(),
            10.0,
            Mm(MARGIN + 80.0),
            Mm(y),
            &regular,
        );
        layer.use_text(money(item.price), 10.0, Mm(MARGIN + 105.0), Mm(y), &regular);
        layer.use_text(
            money(item.line_total()),
            10.0,
            Mm(MARGIN + 140.0),
            Mm(y),
            &regular,
        );
        y -= LINE_HEIGHT;
    }

    y -= LINE_HEIGHT / 2.0;
    rule(&layer, y + LINE_HEIGHT / 2.0);

    // ====== Totals ======
    let total = order.total();
    layer.use_text("Subtotal:", 10.0, Mm(MARGIN + 105.0), Mm(y), &regular);
    layer.use_text(money(total), 10.0, Mm(MARGIN + 140.0), Mm(y), &regular);
    y -= LINE_HEIGHT;
    layer.use_text("Shipping:", 10.0, Mm(MARGIN + 105.0), Mm(y), &regular);
    layer.use_text("FREE", 10.0, Mm(MARGIN + 140.0), Mm(y), &regular);
    y -= LINE_HEIGHT;
    layer.use_text("Total:", 11.0, Mm(MARGIN + 105.0), Mm(y), &bold);
    layer.use_text(money(total), 11.0, Mm(MARGIN + 140.0), Mm(y), &bold);

    // ====== Footer ======
    layer.use_text(
        "Thank you for your business!",
        9.0,
        Mm(MARGIN),
        Mm(MARGIN),
        &regular,
    );
    layer.use_text(
        "www.clotho.com | contact@clotho.com",
        9.0,
        Mm(MARGIN),
        Mm(MARGIN - LINE_HEIGHT / 2.0),
        &regular,
    );

    Ok(doc.save_to_bytes()?)
}

fn rule(layer: &PdfLayerReference, y: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Download filename for an order's invoice.
#[must_use]
pub fn invoice_filename(order: &Order) -> String {
    format!("invoice-{}.pdf", order.order_number)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use clotho_core::{OrderId, OrderStatus, Role, UserId};

    use crate::backend::types::OrderLineItem;

    use super::*;

    fn fixture() -> (Order, CurrentIdentity) {
        let order = Order {
            id: OrderId::new(7),
            order_number: "ORD-0007".to_owned(),
            order_date: Utc::now(),
            status: OrderStatus::Created,
            address: "12 Main St, Springfield, USA".to_owned(),
            order_line_items: vec![OrderLineItem {
                id: None,
                sku_code: "ELEC-001".to_owned(),
                category: "ELEC-phone".to_owned(),
                quantity: 2,
                price: "10.00".parse().unwrap(),
            }],
        };
        let identity = CurrentIdentity {
            id: UserId::from("u-1"),
            email: "shopper@example.com".parse().unwrap(),
            display_name: "Shopper".to_owned(),
            role: Role::User,
            token: "tok".to_owned(),
        };
        (order, identity)
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let (order, identity) = fixture();
        let bytes = render_invoice(&order, &identity).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_invoice_filename_uses_order_number() {
        let (order, _) = fixture();
        assert_eq!(invoice_filename(&order), "invoice-ORD-0007.pdf");
    }

    #[test]
    fn test_money_formats_two_decimals() {
        assert_eq!(money("10".parse().unwrap()), "10.00");
        assert_eq!(money("10.555".parse().unwrap()), "10.56");
    }
}
