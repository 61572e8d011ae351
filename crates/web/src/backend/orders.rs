//! Order service operations.
//!
//! Orders are created and mutated only by the backend; the client reads and
//! aggregates them (see `analytics`).

use tracing::instrument;

use super::{BackendClient, BackendError, Order};

impl BackendClient {
    /// Every order in the system (admin only).
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the bearer lacks the admin role.
    #[instrument(skip(self, token))]
    pub async fn list_all_orders(&self, token: &str) -> Result<Vec<Order>, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url("/api/orders/all"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Orders placed by the current identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected or the request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn list_my_orders(&self, token: &str) -> Result<Vec<Order>, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url("/api/orders/me"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }
}
