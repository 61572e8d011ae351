//! End-to-end analytics scenarios over realistic order shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use clotho_core::{OrderId, OrderStatus};
use clotho_web::analytics;
use clotho_web::backend::types::{CartItem, Order, OrderLineItem};

fn dec(s: &str) -> Decimal {
    s.parse().expect("literal decimal")
}

fn order(id: i64, date: (i32, u32, u32), address: &str, items: &[(&str, &str, u32, &str)]) -> Order {
    let order_date = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
        .and_utc();

    Order {
        id: OrderId::new(id),
        order_number: format!("ORD-{id:04}"),
        order_date,
        status: OrderStatus::Created,
        address: address.to_owned(),
        order_line_items: items
            .iter()
            .map(|(sku, category, quantity, price)| OrderLineItem {
                id: None,
                sku_code: (*sku).to_owned(),
                category: (*category).to_owned(),
                quantity: *quantity,
                price: dec(price),
            })
            .collect(),
    }
}

/// The full dashboard pipeline over one plausible order book.
#[test]
fn test_dashboard_aggregates_over_order_book() {
    let orders = vec![
        order(
            1,
            (2023, 12, 20),
            "4 Rue Neuve, Lyon, France",
            &[("ELEC-001", "ELEC-phone", 1, "199.99")],
        ),
        order(
            2,
            (2024, 1, 15),
            "12 Main St, Springfield, USA",
            &[
                ("BOOK-010", "BOOK-fiction", 2, "12.50"),
                ("ELEC-002", "ELEC-audio", 1, "49.00"),
            ],
        ),
        order(3, (2024, 1, 28), "", &[("misc", "misc", 3, "5.00")]),
    ];

    assert_eq!(analytics::total_order_count(&orders), 3);
    assert_eq!(analytics::total_sales(&orders), dec("288.99"));

    let categories = analytics::category_sales(&orders);
    let names: Vec<&str> = categories.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["ELEC", "BOOK", "UNCATEGORIZED"]);
    assert_eq!(categories[0].value, dec("248.99"));

    let monthly = analytics::monthly_sales(&orders);
    let labels: Vec<&str> = monthly.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(labels, ["Dec '23", "Jan '24"]);
    assert_eq!(monthly[1].value, dec("89.00"));

    let countries = analytics::country_sales(&orders);
    let mut names: Vec<&str> = countries.iter().map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["France", "USA", "Unknown"]);
}

/// Checkout shows the same amount the cart computed: two items
/// (qty 2 x 10.00 and qty 1 x 5.00) come to 25.00.
#[test]
fn test_checkout_amount_matches_cart() {
    let items = [
        CartItem {
            id: clotho_core::CartItemId::new(1),
            sku_code: "A".to_owned(),
            category: "ELEC-phone".to_owned(),
            quantity: 2,
            price: dec("10.00"),
        },
        CartItem {
            id: clotho_core::CartItemId::new(2),
            sku_code: "B".to_owned(),
            category: "BOOK-fiction".to_owned(),
            quantity: 1,
            price: dec("5.00"),
        },
    ];

    let amount: Decimal = items.iter().map(CartItem::line_total).sum();
    assert_eq!(amount.round_dp(2), dec("25.00"));
}
