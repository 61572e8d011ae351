//! Cart service operations.
//!
//! The cart is owned by the backend and scoped implicitly to the bearer
//! token's identity; the client only holds a transient copy per view.

use tracing::instrument;

use clotho_core::CartItemId;

use super::{AddCartItem, BackendClient, BackendError, CartItem};

impl BackendClient {
    /// All cart items for the current identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected or the request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn list_cart_items(&self, token: &str) -> Result<Vec<CartItem>, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url("/api/cart"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Add a product line to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected or the request
    /// fails.
    #[instrument(skip(self, token, item))]
    pub async fn add_to_cart(
        &self,
        token: &str,
        item: &AddCartItem,
    ) -> Result<CartItem, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .post(self.url("/api/cart"))
            .bearer_auth(token)
            .json(item)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Change the quantity of a cart line.
    ///
    /// The quantity invariant (>= 1) is enforced by the route handler
    /// before this call; the backend enforces it again.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown line.
    #[instrument(skip(self, token))]
    pub async fn update_cart_item(
        &self,
        token: &str,
        id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .put(self.url(&format!("/api/cart/{id}")))
            .bearer_auth(token)
            .json(&serde_json::json!({ "quantity": quantity }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Remove one line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown line.
    #[instrument(skip(self, token))]
    pub async fn remove_cart_item(&self, token: &str, id: CartItemId) -> Result<(), BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .delete(self.url(&format!("/api/cart/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Empty the cart (used after a completed checkout).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected or the request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn clear_cart(&self, token: &str) -> Result<(), BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .delete(self.url("/api/cart"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
