//! Admin dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse, response::Response};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::analytics;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::services::inventory;
use crate::state::AppState;

/// Headline numbers across the top of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardMetrics {
    pub users: u64,
    pub products: usize,
    pub stock_items: i64,
    pub inventory_value: Decimal,
    pub orders: usize,
    pub sales: Decimal,
}

/// Dashboard template.
///
/// The chart series ride as JSON strings the page script feeds straight
/// into the charting library.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub display_name: String,
    pub metrics: DashboardMetrics,
    pub category_series: String,
    pub monthly_series: String,
    pub country_series: String,
    pub load_failed: bool,
}

/// Dashboard page handler.
///
/// The four backend fetches run concurrently and the whole batch is
/// all-or-nothing: if any one fails the page renders its empty state
/// rather than half-correct aggregates.
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Response {
    let backend = state.backend();
    let token = admin.token.as_str();

    let batch = tokio::try_join!(
        backend.user_count(token),
        backend.list_products(token),
        inventory::join_inventory_levels(backend, token),
        backend.list_all_orders(token),
    );

    let (metrics, orders, load_failed) = match batch {
        Ok((users, products, levels, orders)) => {
            let metrics = DashboardMetrics {
                users,
                products: products.len(),
                stock_items: inventory::total_stock_items(&levels),
                inventory_value: inventory::total_inventory_value(&levels),
                orders: analytics::total_order_count(&orders),
                sales: analytics::total_sales(&orders),
            };
            (metrics, orders, false)
        }
        Err(e) => {
            tracing::error!("Dashboard batch fetch failed: {}", e);
            (DashboardMetrics::default(), Vec::new(), true)
        }
    };

    DashboardTemplate {
        display_name: admin.display_name,
        metrics,
        category_series: to_json(&analytics::category_sales(&orders)),
        monthly_series: to_json(&analytics::monthly_sales(&orders)),
        country_series: to_json(&analytics::country_sales(&orders)),
        load_failed,
    }
    .into_response()
}

fn to_json(series: &[analytics::SeriesPoint]) -> String {
    serde_json::to_string(series).unwrap_or_else(|_| "[]".to_owned())
}
