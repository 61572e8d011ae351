//! Public contact form route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use clotho_core::Email;

use crate::backend::types::NewMessage;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub signed_in: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the contact form.
pub async fn form(
    OptionalAuth(identity): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    ContactTemplate {
        signed_in: identity.is_some(),
        error: query.error,
        success: query.success,
    }
    .into_response()
}

/// Submit a message to the communication service.
#[instrument(skip(state, form))]
pub async fn submit(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Redirect::to("/contact?error=missing_fields").into_response();
    }
    if form.email.parse::<Email>().is_err() {
        return Redirect::to("/contact?error=invalid_email").into_response();
    }

    let message = NewMessage {
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        message: form.message.trim().to_owned(),
    };

    if let Err(e) = state.backend().send_message(&message).await {
        tracing::warn!("Contact submission failed: {}", e);
        return Redirect::to("/contact?error=failed").into_response();
    }

    Redirect::to("/contact?success=sent").into_response()
}
