//! Inventory service operations.
//!
//! The backend exposes no list-all endpoint; the full inventory view is
//! synthesized by `services::inventory::join_inventory_levels`, which joins
//! the product list with these per-SKU lookups.

use tracing::instrument;

use clotho_core::InventoryId;

use super::{BackendClient, BackendError, InventoryInput, InventoryRecord};

impl BackendClient {
    /// Fetch the stock record for one SKU.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the SKU has no stock record.
    #[instrument(skip(self, token))]
    pub async fn get_inventory_by_sku(
        &self,
        token: &str,
        sku_code: &str,
    ) -> Result<InventoryRecord, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url(&format!("/inventory/sku/{sku_code}")))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Create a stock record.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the backend refuses the record.
    #[instrument(skip(self, token, input))]
    pub async fn create_inventory(
        &self,
        token: &str,
        input: &InventoryInput,
    ) -> Result<InventoryRecord, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .post(self.url("/inventory"))
            .bearer_auth(token)
            .json(input)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Update a stock record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    #[instrument(skip(self, token, input))]
    pub async fn update_inventory(
        &self,
        token: &str,
        id: InventoryId,
        input: &InventoryInput,
    ) -> Result<InventoryRecord, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .put(self.url(&format!("/inventory/{id}")))
            .bearer_auth(token)
            .json(input)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Delete a stock record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    #[instrument(skip(self, token))]
    pub async fn delete_inventory(&self, token: &str, id: InventoryId) -> Result<(), BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .delete(self.url(&format!("/inventory/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
