//! Order analytics aggregation.
//!
//! Pure folds from a raw order list to the summary numbers and chart
//! series the admin dashboard renders. All functions are total: an empty
//! order list yields zero or an empty series, never an error, so the
//! dashboard can always render an empty state.
//!
//! Monetary sums are accumulated at full `Decimal` precision and rounded
//! to 2 fraction digits only at the output boundary.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::backend::types::Order;

/// Bucket used when a line item's category carries no `-` delimiter.
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// Bucket used when an order's address yields no country segment.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// One named point in a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: Decimal,
}

/// Number of orders.
#[must_use]
pub fn total_order_count(orders: &[Order]) -> usize {
    orders.len()
}

/// Revenue across all orders, rounded to 2 decimal places.
#[must_use]
pub fn total_sales(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .map(Order::total)
        .sum::<Decimal>()
        .round_dp(2)
}

/// Revenue per top-level category.
///
/// The top-level category is the part of a line item's category before its
/// first `-`; items without the delimiter land in [`UNCATEGORIZED`]. Output
/// order is first-seen order during the fold, which keeps chart colors
/// stable across refreshes of the same data.
#[must_use]
pub fn category_sales(orders: &[Order]) -> Vec<SeriesPoint> {
    let mut buckets: Vec<(String, Decimal)> = Vec::new();

    for order in orders {
        for item in &order.order_line_items {
            let name = top_level_category(&item.category);
            bump(&mut buckets, name, item.line_total());
        }
    }

    into_series(buckets)
}

/// Revenue per calendar month, ascending by date.
///
/// Labels are formatted as short month plus two-digit year (`Jan '24`).
/// The fold keys on (year, month) rather than on the label so that
/// `Dec '23` sorts before `Jan '24`.
#[must_use]
pub fn monthly_sales(orders: &[Order]) -> Vec<SeriesPoint> {
    let mut buckets: Vec<((i32, u32), DateTime<Utc>, Decimal)> = Vec::new();

    for order in orders {
        let key = (order.order_date.year(), order.order_date.month());
        match buckets.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, value)) => *value += order.total(),
            None => buckets.push((key, order.order_date, order.total())),
        }
    }

    buckets.sort_by_key(|(key, _, _)| *key);
    buckets
        .into_iter()
        .map(|(_, date, value)| SeriesPoint {
            name: date.format("%b '%y").to_string(),
            value: value.round_dp(2),
        })
        .collect()
}

/// Revenue per country.
///
/// The country is the last comma-delimited segment of the order's
/// free-text address; blank or undelimited-empty addresses fall into the
/// [`UNKNOWN_COUNTRY`] bucket.
#[must_use]
pub fn country_sales(orders: &[Order]) -> Vec<SeriesPoint> {
    let mut buckets: Vec<(String, Decimal)> = Vec::new();

    for order in orders {
        bump(&mut buckets, country_of(&order.address), order.total());
    }

    into_series(buckets)
}

/// Part of a category string before its first `-`.
fn top_level_category(category: &str) -> &str {
    match category.split_once('-') {
        Some((prefix, _)) if !prefix.is_empty() => prefix,
        _ => UNCATEGORIZED,
    }
}

/// Last comma-delimited segment of an address, trimmed.
fn country_of(address: &str) -> &str {
    let last = address.rsplit(',').next().unwrap_or("").trim();
    if last.is_empty() { UNKNOWN_COUNTRY } else { last }
}

/// Add `amount` to the bucket named `name`, creating it at the end if new.
fn bump(buckets: &mut Vec<(String, Decimal)>, name: &str, amount: Decimal) {
    match buckets.iter_mut().find(|(n, _)| n == name) {
        Some((_, value)) => *value += amount,
        None => buckets.push((name.to_owned(), amount)),
    }
}

fn into_series(buckets: Vec<(String, Decimal)>) -> Vec<SeriesPoint> {
    buckets
        .into_iter()
        .map(|(name, value)| SeriesPoint {
            name,
            value: value.round_dp(2),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDateTime;
    use clotho_core::{OrderId, OrderStatus};

    use crate::backend::types::OrderLineItem;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(category: &str, quantity: u32, price: &str) -> OrderLineItem {
        OrderLineItem {
            id: None,
            sku_code: "SKU".to_owned(),
            category: category.to_owned(),
            quantity,
            price: dec(price),
        }
    }

    fn order(date: &str, address: &str, items: Vec<OrderLineItem>) -> Order {
        Order {
            id: OrderId::new(1),
            order_number: "ORD-1".to_owned(),
            order_date: NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
                .unwrap()
                .and_utc(),
            status: OrderStatus::Created,
            address: address.to_owned(),
            order_line_items: items,
        }
    }

    #[test]
    fn test_empty_orders_yield_zero_and_empty_series() {
        assert_eq!(total_order_count(&[]), 0);
        assert_eq!(total_sales(&[]), Decimal::ZERO);
        assert!(category_sales(&[]).is_empty());
        assert!(monthly_sales(&[]).is_empty());
        assert!(country_sales(&[]).is_empty());
    }

    #[test]
    fn test_total_sales_is_additive() {
        let a = vec![order(
            "2024-01-15 10:00:00",
            "x, USA",
            vec![item("ELEC-phone", 2, "10.00")],
        )];
        let b = vec![order(
            "2024-02-01 10:00:00",
            "y, USA",
            vec![item("BOOK-fiction", 1, "5.00")],
        )];

        let combined: Vec<Order> = a.iter().chain(b.iter()).cloned().collect();
        assert_eq!(total_sales(&combined), total_sales(&a) + total_sales(&b));
        assert_eq!(total_sales(&combined), dec("25.00"));
    }

    #[test]
    fn test_category_sales_keeps_first_seen_order() {
        // Categories arrive in sequence [B, A, B]; output must be [B, A]
        // with B holding the combined revenue.
        let orders = vec![
            order("2024-01-01 00:00:00", "", vec![item("B-x", 1, "3.00")]),
            order("2024-01-02 00:00:00", "", vec![item("A-y", 1, "7.00")]),
            order("2024-01-03 00:00:00", "", vec![item("B-z", 2, "1.00")]),
        ];

        let series = category_sales(&orders);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "B");
        assert_eq!(series[0].value, dec("5.00"));
        assert_eq!(series[1].name, "A");
        assert_eq!(series[1].value, dec("7.00"));
    }

    #[test]
    fn test_category_without_delimiter_is_uncategorized() {
        let orders = vec![order(
            "2024-01-01 00:00:00",
            "",
            vec![item("misc", 1, "2.50"), item("", 1, "1.50")],
        )];

        let series = category_sales(&orders);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, UNCATEGORIZED);
        assert_eq!(series[0].value, dec("4.00"));
    }

    #[test]
    fn test_monthly_sales_sorts_by_calendar_date_not_label() {
        // "Dec '23" sorts after "Jan '24" as a string; calendar order must win.
        let orders = vec![
            order(
                "2024-01-15 10:00:00",
                "",
                vec![item("ELEC-phone", 1, "10.00")],
            ),
            order(
                "2023-12-20 10:00:00",
                "",
                vec![item("ELEC-phone", 1, "4.00")],
            ),
        ];

        let series = monthly_sales(&orders);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Dec '23");
        assert_eq!(series[0].value, dec("4.00"));
        assert_eq!(series[1].name, "Jan '24");
        assert_eq!(series[1].value, dec("10.00"));
    }

    #[test]
    fn test_monthly_sales_merges_same_month() {
        let orders = vec![
            order("2024-03-01 00:00:00", "", vec![item("A-x", 1, "1.10")]),
            order("2024-03-28 00:00:00", "", vec![item("A-x", 1, "2.20")]),
        ];

        let series = monthly_sales(&orders);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Mar '24");
        assert_eq!(series[0].value, dec("3.30"));
    }

    #[test]
    fn test_country_sales_uses_last_address_segment() {
        let orders = vec![order(
            "2024-01-01 00:00:00",
            "12 Main St, Springfield, USA",
            vec![item("A-x", 1, "9.99")],
        )];

        let series = country_sales(&orders);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "USA");
        assert_eq!(series[0].value, dec("9.99"));
    }

    #[test]
    fn test_country_sales_unknown_for_blank_address() {
        let orders = vec![
            order("2024-01-01 00:00:00", "", vec![item("A-x", 1, "1.00")]),
            order("2024-01-02 00:00:00", "   ", vec![item("A-x", 1, "2.00")]),
        ];

        let series = country_sales(&orders);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, UNKNOWN_COUNTRY);
        assert_eq!(series[0].value, dec("3.00"));
    }

    #[test]
    fn test_rounding_happens_at_output_not_per_order() {
        // Three thirds of a cent only come out right when rounding is
        // deferred until the end.
        let orders = vec![
            order("2024-01-01 00:00:00", "", vec![item("A-x", 1, "0.333")]),
            order("2024-01-02 00:00:00", "", vec![item("A-x", 1, "0.333")]),
            order("2024-01-03 00:00:00", "", vec![item("A-x", 1, "0.334")]),
        ];

        assert_eq!(total_sales(&orders), dec("1.00"));
        let series = category_sales(&orders);
        assert_eq!(series[0].value, dec("1.00"));
    }
}
