//! Checkout route handlers.
//!
//! The checkout page asks the backend for a payment intent and hands its
//! client secret to the hosted card widget; the card details never pass
//! through this server. Completion clears the cart and sends the shopper
//! to their order history - the backend is authoritative for whether the
//! order persisted.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::backend::types::CartItem;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub display_name: String,
    pub items: Vec<CartItem>,
    pub amount: Decimal,
    pub client_secret: String,
    pub publishable_key: String,
}

/// Display the checkout page with the payment widget.
#[instrument(skip(identity, state))]
pub async fn show(RequireAuth(identity): RequireAuth, State(state): State<AppState>) -> Response {
    let items = match state.backend().list_cart_items(&identity.token).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch cart for checkout: {}", e);
            return Redirect::to("/cart").into_response();
        }
    };

    if items.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let amount = items
        .iter()
        .map(CartItem::line_total)
        .sum::<Decimal>()
        .round_dp(2);

    let client_secret = match state.backend().create_payment_intent(&identity.token).await {
        Ok(response) => response.client_secret,
        Err(e) => {
            tracing::error!("Payment intent creation failed: {}", e);
            return Redirect::to("/cart").into_response();
        }
    };

    CheckoutTemplate {
        display_name: identity.display_name,
        items,
        amount,
        client_secret,
        publishable_key: state.config().stripe_publishable_key.clone(),
    }
    .into_response()
}

/// Finish checkout after the widget confirmed the payment client-side.
///
/// Clears the cart; the backend has already recorded the order.
#[instrument(skip(identity, state))]
pub async fn complete(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
) -> Response {
    if let Err(e) = state.backend().clear_cart(&identity.token).await {
        tracing::warn!("Cart clear after checkout failed: {}", e);
    }

    Redirect::to("/orders?placed=true").into_response()
}
