//! Inventory view synthesis.
//!
//! The backend has no list-all inventory endpoint, so the admin inventory
//! table is built by fanning out one per-SKU lookup per product and joining
//! the results onto the product list. A SKU without a stock record (or
//! whose lookup fails) renders as zero on hand rather than failing the
//! whole table.

use futures::{StreamExt, stream};
use rust_decimal::Decimal;
use tracing::instrument;

use clotho_core::InventoryId;

use crate::backend::{BackendClient, BackendError, types::Product};

/// How many per-SKU lookups run concurrently.
const LOOKUP_CONCURRENCY: usize = 8;

/// One row of the synthesized inventory table.
#[derive(Debug, Clone)]
pub struct InventoryLevel {
    /// Stock record id, absent when the SKU has no record yet.
    pub id: Option<InventoryId>,
    pub product_name: String,
    pub sku_code: String,
    pub quantity: i64,
    /// Stock value = unit price x quantity, full precision.
    pub value: Decimal,
}

/// Join the product list with per-SKU stock lookups.
///
/// Row order follows product order. A failed lookup logs and contributes
/// a zero-quantity row; only the product list fetch itself can fail the
/// call.
///
/// # Errors
///
/// Returns an error if the product list cannot be fetched.
#[instrument(skip(backend, token))]
pub async fn join_inventory_levels(
    backend: &BackendClient,
    token: &str,
) -> Result<Vec<InventoryLevel>, BackendError> {
    let products = backend.list_products(token).await?;
    Ok(join_with_lookups(backend, token, products).await)
}

async fn join_with_lookups(
    backend: &BackendClient,
    token: &str,
    products: Vec<Product>,
) -> Vec<InventoryLevel> {
    stream::iter(products)
        // Each lookup future owns its captures so the joined stream stays
        // Send through the handler futures.
        .map(|product| {
            let backend = backend.clone();
            let token = token.to_owned();
            async move {
                match backend.get_inventory_by_sku(&token, &product.sku_code).await {
                    Ok(record) => InventoryLevel {
                        id: Some(record.id),
                        product_name: product.name,
                        sku_code: product.sku_code,
                        quantity: record.quantity,
                        value: product.price * Decimal::from(record.quantity),
                    },
                    Err(err) => {
                        tracing::warn!(
                            sku = %product.sku_code,
                            error = %err,
                            "no stock record for SKU, showing zero"
                        );
                        InventoryLevel {
                            id: None,
                            product_name: product.name,
                            sku_code: product.sku_code,
                            quantity: 0,
                            value: Decimal::ZERO,
                        }
                    }
                }
            }
        })
        // buffered (not buffer_unordered) keeps table rows in product order
        .buffered(LOOKUP_CONCURRENCY)
        .collect()
        .await
}

/// Total units on hand across all rows.
#[must_use]
pub fn total_stock_items(levels: &[InventoryLevel]) -> i64 {
    levels.iter().map(|level| level.quantity).sum()
}

/// Total stock value across all rows, rounded to 2 decimal places.
#[must_use]
pub fn total_inventory_value(levels: &[InventoryLevel]) -> Decimal {
    levels
        .iter()
        .map(|level| level.value)
        .sum::<Decimal>()
        .round_dp(2)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn level(id: Option<i64>, quantity: i64, value: &str) -> InventoryLevel {
        InventoryLevel {
            id: id.map(InventoryId::new),
            product_name: "Widget".to_owned(),
            sku_code: "SKU-1".to_owned(),
            quantity,
            value: dec(value),
        }
    }

    #[test]
    fn test_totals_over_empty_table() {
        assert_eq!(total_stock_items(&[]), 0);
        assert_eq!(total_inventory_value(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_totals_sum_rows() {
        let levels = vec![
            level(Some(1), 3, "30.00"),
            level(None, 0, "0.00"),
            level(Some(2), 5, "12.55"),
        ];

        assert_eq!(total_stock_items(&levels), 8);
        assert_eq!(total_inventory_value(&levels), dec("42.55"));
    }

    #[test]
    fn test_missing_record_counts_as_zero() {
        let levels = vec![level(None, 0, "0")];
        assert_eq!(total_stock_items(&levels), 0);
        assert_eq!(total_inventory_value(&levels), Decimal::ZERO);
    }

    #[test]
    fn test_join_future_is_send() {
        // The router requires handler futures (and everything they await)
        // to be Send; a borrowing closure inside the buffered stream breaks
        // that bound.
        fn require_send<F: Send>(fut: F) -> F {
            fut
        }

        let backend = BackendClient::new(&crate::config::BackendConfig {
            base_url: "https://backend.test".to_owned(),
        });
        drop(require_send(join_inventory_levels(&backend, "tok")));
    }
}
