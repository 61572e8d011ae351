//! Admin product management route handlers.
//!
//! Create and update arrive as multipart forms so the admin can attach a
//! product image; the fields and the optional file are repackaged into the
//! backend's `product` + `file` multipart shape.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use clotho_core::ProductId;

use crate::backend::products::ImageUpload;
use crate::backend::types::{Product, ProductInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Query parameters for transient notices.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Product table template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct ProductsTemplate {
    pub display_name: String,
    pub products: Vec<Product>,
    pub notice: Option<String>,
}

/// Create/edit form template.
///
/// `product` is absent for the create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormTemplate {
    pub display_name: String,
    pub product: Option<Product>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Product table, including unlisted products.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let products = match state.backend().list_products(&admin.token).await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!("Failed to fetch products: {}", e);
            Vec::new()
        }
    };

    ProductsTemplate {
        display_name: admin.display_name,
        products,
        notice: query.notice,
    }
    .into_response()
}

/// Empty create form.
pub async fn new_form(RequireAdmin(admin): RequireAdmin) -> Response {
    ProductFormTemplate {
        display_name: admin.display_name,
        product: None,
        error: None,
    }
    .into_response()
}

/// Create a product from the multipart form.
#[instrument(skip(admin, state, multipart))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let (input, image) = parse_product_form(multipart).await?;

    match state
        .backend()
        .create_product(&admin.token, &input, image)
        .await
    {
        Ok(_) => Ok(Redirect::to("/admin/products?notice=created").into_response()),
        Err(e) => {
            tracing::warn!("Product create rejected: {}", e);
            Ok(ProductFormTemplate {
                display_name: admin.display_name,
                product: None,
                error: Some(e.to_string()),
            }
            .into_response())
        }
    }
}

/// Edit form pre-filled from the backend.
#[instrument(skip(admin, state))]
pub async fn edit_form(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response> {
    let product = state.backend().get_product(&admin.token, id).await?;

    Ok(ProductFormTemplate {
        display_name: admin.display_name,
        product: Some(product),
        error: None,
    }
    .into_response())
}

/// Update a product from the multipart form.
#[instrument(skip(admin, state, multipart))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    multipart: Multipart,
) -> Result<Response> {
    let (input, image) = parse_product_form(multipart).await?;

    if let Err(e) = state
        .backend()
        .update_product(&admin.token, id, &input, image)
        .await
    {
        tracing::warn!("Product update rejected: {}", e);
        return Ok(Redirect::to("/admin/products?notice=update_failed").into_response());
    }

    Ok(Redirect::to("/admin/products?notice=updated").into_response())
}

/// Delete a product.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    state.backend().delete_product(&admin.token, id).await?;
    Ok(Redirect::to("/admin/products?notice=deleted"))
}

/// Flip a product's listed flag.
///
/// The form posts the current state; the handler calls the opposite
/// action.
#[derive(Debug, Deserialize)]
pub struct ListingForm {
    pub listed: bool,
}

#[instrument(skip(admin, state))]
pub async fn toggle_listing(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    axum::Form(form): axum::Form<ListingForm>,
) -> Result<Redirect> {
    if form.listed {
        state.backend().unlist_product(&admin.token, id).await?;
    } else {
        state.backend().enlist_product(&admin.token, id).await?;
    }

    Ok(Redirect::to("/admin/products?notice=listing_changed"))
}

// =============================================================================
// Multipart parsing
// =============================================================================

/// Pull the product fields and the optional image out of the admin form.
async fn parse_product_form(
    mut multipart: Multipart,
) -> Result<(ProductInput, Option<ImageUpload>)> {
    let mut name = None;
    let mut description = None;
    let mut sku_code = None;
    let mut category = None;
    let mut price = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_owned();
        match field_name.as_str() {
            "name" => name = Some(read_text(field).await?),
            "description" => {
                let text = read_text(field).await?;
                description = (!text.trim().is_empty()).then_some(text);
            }
            "sku_code" => sku_code = Some(read_text(field).await?),
            "category" => category = Some(read_text(field).await?),
            "price" => {
                let text = read_text(field).await?;
                let parsed = text
                    .trim()
                    .parse::<Decimal>()
                    .map_err(|_| AppError::BadRequest("price must be a number".to_owned()))?;
                price = Some(parsed);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // An empty file input still submits a zero-byte part
                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let input = ProductInput {
        name: require_field(name, "name")?,
        description,
        sku_code: require_field(sku_code, "sku_code")?,
        category: require_field(category, "category")?,
        price: price.ok_or_else(|| AppError::BadRequest("missing field: price".to_owned()))?,
    };

    if input.name.trim().is_empty() || input.sku_code.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and sku_code are required".to_owned(),
        ));
    }

    Ok((input, image))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn require_field(value: Option<String>, name: &str) -> Result<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("missing field: {name}")))
}
