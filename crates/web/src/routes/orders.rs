//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use clotho_core::OrderId;

use crate::backend::types::Order;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::services::invoice;
use crate::state::AppState;

/// Query parameters for the post-checkout banner.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub placed: Option<bool>,
}

/// One order row, pre-formatted for the table.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: OrderId,
    pub number: String,
    pub date: String,
    pub status: String,
    pub total: Decimal,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            number: order.order_number.clone(),
            date: order.order_date.format("%d %b %Y").to_string(),
            status: order.status.to_string(),
            total: order.total().round_dp(2),
        }
    }
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub display_name: String,
    pub orders: Vec<OrderView>,
    pub placed: bool,
}

/// Display the shopper's order history, newest first.
#[instrument(skip(identity, state))]
pub async fn index(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Response {
    let mut orders = match state.backend().list_my_orders(&identity.token).await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!("Failed to fetch orders: {}", e);
            Vec::new()
        }
    };
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));

    OrdersTemplate {
        display_name: identity.display_name,
        orders: orders.iter().map(OrderView::from).collect(),
        placed: query.placed.unwrap_or(false),
    }
    .into_response()
}

/// Download the invoice PDF for one of the shopper's own orders.
///
/// Looks the order up in the shopper's own list, so one shopper can never
/// pull another's invoice by guessing ids.
#[instrument(skip(identity, state))]
pub async fn invoice(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Response> {
    let orders = state.backend().list_my_orders(&identity.token).await?;
    let order = orders
        .iter()
        .find(|order| order.id == id)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let bytes = invoice::render_invoice(order, &identity)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let filename = invoice::invoice_filename(order);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
