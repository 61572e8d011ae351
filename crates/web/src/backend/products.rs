//! Product service operations.
//!
//! Create and update send a multipart payload: a JSON `product` part plus an
//! optional `file` part when an image accompanies the record. The listed
//! catalog (the only unauthenticated read) is cached for 5 minutes.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use clotho_core::ProductId;

use super::{BackendClient, BackendError, CATALOG_CACHE_KEY, Product, ProductInput};

/// An uploaded product image destined for the backend.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl BackendClient {
    /// All products, including unlisted ones (admin view).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected or the request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn list_products(&self, token: &str) -> Result<Vec<Product>, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url("/products"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Listed products only - the public storefront catalog.
    ///
    /// Served from the 5-minute cache when warm.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails on a cold cache.
    #[instrument(skip(self))]
    pub async fn list_listed_products(&self) -> Result<Arc<Vec<Product>>, BackendError> {
        if let Some(cached) = self.catalog_cache().get(CATALOG_CACHE_KEY).await {
            return Ok(cached);
        }

        let response = self
            .http()
            .get(self.url("/products/listed"))
            .send()
            .await?;
        let products: Vec<Product> = Self::decode(response).await?;

        let products = Arc::new(products);
        self.catalog_cache()
            .insert(CATALOG_CACHE_KEY, Arc::clone(&products))
            .await;
        Ok(products)
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the id does not exist.
    #[instrument(skip(self, token))]
    pub async fn get_product(
        &self,
        token: &str,
        id: ProductId,
    ) -> Result<Product, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch one product by SKU code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the SKU does not exist.
    #[instrument(skip(self, token))]
    pub async fn get_product_by_sku(
        &self,
        token: &str,
        sku_code: &str,
    ) -> Result<Product, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url(&format!("/products/sku/{sku_code}")))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Create a product, optionally with an image.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` for handled backend errors such as a duplicate
    /// SKU.
    #[instrument(skip(self, token, input, image))]
    pub async fn create_product(
        &self,
        token: &str,
        input: &ProductInput,
        image: Option<ImageUpload>,
    ) -> Result<Product, BackendError> {
        let token = Self::bearer(token)?;
        let form = product_form(input, image)?;

        let response = self
            .http()
            .post(self.url("/products"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        self.catalog_cache().invalidate(&CATALOG_CACHE_KEY).await;
        Self::decode(response).await
    }

    /// Update a product, optionally replacing its image.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `Rejected` for handled backend
    /// errors.
    #[instrument(skip(self, token, input, image))]
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        input: &ProductInput,
        image: Option<ImageUpload>,
    ) -> Result<Product, BackendError> {
        let token = Self::bearer(token)?;
        let form = product_form(input, image)?;

        let response = self
            .http()
            .put(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        self.catalog_cache().invalidate(&CATALOG_CACHE_KEY).await;
        Self::decode(response).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .delete(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check(response).await?;
        self.catalog_cache().invalidate(&CATALOG_CACHE_KEY).await;
        Ok(())
    }

    /// Hide a product from the public catalog.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    #[instrument(skip(self, token))]
    pub async fn unlist_product(&self, token: &str, id: ProductId) -> Result<(), BackendError> {
        self.toggle_listing(token, id, "unlist").await
    }

    /// Return a product to the public catalog.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    #[instrument(skip(self, token))]
    pub async fn enlist_product(&self, token: &str, id: ProductId) -> Result<(), BackendError> {
        self.toggle_listing(token, id, "enlist").await
    }

    async fn toggle_listing(
        &self,
        token: &str,
        id: ProductId,
        action: &str,
    ) -> Result<(), BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .put(self.url(&format!("/products/{action}/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check(response).await?;
        self.catalog_cache().invalidate(&CATALOG_CACHE_KEY).await;
        Ok(())
    }
}

/// Assemble the multipart form: JSON `product` part + optional `file` part.
fn product_form(
    input: &ProductInput,
    image: Option<ImageUpload>,
) -> Result<Form, BackendError> {
    let product_json = serde_json::to_string(input)?;
    let mut form = Form::new().part(
        "product",
        Part::text(product_json).mime_str("application/json")?,
    );

    if let Some(image) = image {
        form = form.part(
            "file",
            Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?,
        );
    }

    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            name: "Widget".to_owned(),
            description: None,
            sku_code: "ELEC-1".to_owned(),
            category: "ELEC".to_owned(),
            price: "19.99".parse().unwrap(),
        }
    }

    #[test]
    fn test_form_assembles_without_image() {
        assert!(product_form(&input(), None).is_ok());
    }

    #[test]
    fn test_form_assembles_with_image() {
        // Routes reach this type through the module path, so it stays
        // constructible from outside the backend module tree.
        let image = crate::backend::products::ImageUpload {
            file_name: "widget.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        };
        assert!(product_form(&input(), Some(image)).is_ok());
    }
}
