//! Landing and storefront home routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::types::Product;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::services::guard::role_home;
use crate::state::AppState;

/// Query parameters for transient notices.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Storefront home template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub display_name: String,
    pub products: Vec<Product>,
    pub notice: Option<String>,
}

/// Landing redirect: signed-in visitors go to their role home, everyone
/// else to login.
pub async fn root(OptionalAuth(identity): OptionalAuth) -> Redirect {
    match identity {
        Some(identity) => Redirect::to(role_home(identity.role)),
        None => Redirect::to("/login"),
    }
}

/// Product grid for shoppers.
///
/// Shows listed products only, served from the short-lived catalog cache.
#[instrument(skip(identity, state))]
pub async fn user_homepage(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let products = match state.backend().list_listed_products().await {
        Ok(products) => products.as_ref().clone(),
        Err(e) => {
            tracing::error!("Failed to fetch catalog: {}", e);
            Vec::new()
        }
    };

    HomeTemplate {
        display_name: identity.display_name,
        products,
        notice: query.notice,
    }
    .into_response()
}
