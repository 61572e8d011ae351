//! Checkout operations.
//!
//! The backend creates the payment intent against the payment collaborator;
//! the card details never touch this codebase - the hosted widget collects
//! them in the browser and confirms the intent client-side. The backend
//! stays authoritative for whether the order actually persists.

use tracing::instrument;

use super::{BackendClient, BackendError, PaymentIntentResponse};

impl BackendClient {
    /// Request a payment intent for the current cart.
    ///
    /// The backend computes the amount from the cart it owns; the amount
    /// shown to the shopper is derived independently from the cart view.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected, the cart is
    /// empty, or the request fails.
    #[instrument(skip(self, token))]
    pub async fn create_payment_intent(
        &self,
        token: &str,
    ) -> Result<PaymentIntentResponse, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .post(self.url("/api/checkout"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }
}
