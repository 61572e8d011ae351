//! Admin inventory route handlers.
//!
//! The table is synthesized by `services::inventory` since the backend
//! has no list-all endpoint.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use clotho_core::InventoryId;

use crate::backend::types::InventoryInput;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::services::inventory::{
    self, InventoryLevel, total_inventory_value, total_stock_items,
};
use crate::state::AppState;

/// Query parameters for transient notices.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Stock record form data (create and update share the shape).
#[derive(Debug, Deserialize)]
pub struct StockForm {
    pub sku_code: String,
    pub quantity: i64,
}

/// Inventory table template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/inventory.html")]
pub struct InventoryTemplate {
    pub display_name: String,
    pub levels: Vec<InventoryLevel>,
    pub stock_items: i64,
    pub inventory_value: Decimal,
    pub notice: Option<String>,
}

/// Synthesized stock table with totals.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let levels = match inventory::join_inventory_levels(state.backend(), &admin.token).await {
        Ok(levels) => levels,
        Err(e) => {
            tracing::error!("Failed to synthesize inventory view: {}", e);
            Vec::new()
        }
    };

    InventoryTemplate {
        display_name: admin.display_name,
        stock_items: total_stock_items(&levels),
        inventory_value: total_inventory_value(&levels),
        levels,
        notice: query.notice,
    }
    .into_response()
}

/// Create a stock record.
#[instrument(skip(admin, state))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<StockForm>,
) -> Result<Redirect> {
    let input = InventoryInput {
        sku_code: form.sku_code,
        quantity: form.quantity.max(0),
    };
    state.backend().create_inventory(&admin.token, &input).await?;

    Ok(Redirect::to("/admin/inventory?notice=created"))
}

/// Update a stock record.
#[instrument(skip(admin, state))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<InventoryId>,
    Form(form): Form<StockForm>,
) -> Result<Redirect> {
    let input = InventoryInput {
        sku_code: form.sku_code,
        quantity: form.quantity.max(0),
    };
    state
        .backend()
        .update_inventory(&admin.token, id, &input)
        .await?;

    Ok(Redirect::to("/admin/inventory?notice=updated"))
}

/// Delete a stock record.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<InventoryId>,
) -> Result<Redirect> {
    state.backend().delete_inventory(&admin.token, id).await?;

    Ok(Redirect::to("/admin/inventory?notice=deleted"))
}
