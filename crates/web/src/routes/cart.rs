//! Cart route handlers.
//!
//! Every action re-fetches the cart from the backend on the next page
//! load; nothing cart-shaped is kept in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use clotho_core::CartItemId;

use crate::backend::types::{AddCartItem, CartItem};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Add-to-cart form data, posted from the product grid.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub sku_code: String,
    pub category: String,
    pub quantity: Option<u32>,
    pub price: Decimal,
}

/// Quantity-change form data.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub id: CartItemId,
    pub quantity: i64,
}

/// Remove-line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub id: CartItemId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub display_name: String,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(identity, state))]
pub async fn show(RequireAuth(identity): RequireAuth, State(state): State<AppState>) -> Response {
    let items = match state.backend().list_cart_items(&identity.token).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch cart: {}", e);
            Vec::new()
        }
    };

    let subtotal = items
        .iter()
        .map(CartItem::line_total)
        .sum::<Decimal>()
        .round_dp(2);

    CartTemplate {
        display_name: identity.display_name,
        items,
        subtotal,
    }
    .into_response()
}

/// Add a product line to the cart.
#[instrument(skip(identity, state, form))]
pub async fn add(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Response {
    let item = AddCartItem {
        sku_code: form.sku_code,
        category: form.category,
        quantity: form.quantity.unwrap_or(1).max(1),
        price: form.price,
    };

    if let Err(e) = state.backend().add_to_cart(&identity.token, &item).await {
        tracing::warn!("Add to cart failed: {}", e);
        return Redirect::to("/user-homepage?notice=add_failed").into_response();
    }

    Redirect::to("/user-homepage?notice=added").into_response()
}

/// Change the quantity of a cart line.
///
/// Decrementing below 1 is a no-op: the line stays at quantity 1 and the
/// page just re-renders. Removal is its own explicit action.
#[instrument(skip(identity, state))]
pub async fn update(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<UpdateForm>,
) -> Response {
    if form.quantity < 1 {
        return Redirect::to("/cart").into_response();
    }

    let quantity = u32::try_from(form.quantity).unwrap_or(1);
    if let Err(e) = state
        .backend()
        .update_cart_item(&identity.token, form.id, quantity)
        .await
    {
        tracing::warn!("Cart update failed: {}", e);
    }

    Redirect::to("/cart").into_response()
}

/// Remove one line from the cart.
#[instrument(skip(identity, state))]
pub async fn remove(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<RemoveForm>,
) -> Response {
    if let Err(e) = state
        .backend()
        .remove_cart_item(&identity.token, form.id)
        .await
    {
        tracing::warn!("Cart remove failed: {}", e);
    }

    Redirect::to("/cart").into_response()
}
