//! Admin message inbox route handlers.
//!
//! Each message can be replied to at most once; the template hides the
//! reply form once `replied` is set and the backend enforces the rule.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use clotho_core::MessageId;

use crate::backend::types::Message;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Query parameters for transient notices.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Reply form data.
#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    pub reply: String,
}

/// Inbox template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/communication.html")]
pub struct CommunicationTemplate {
    pub display_name: String,
    pub messages: Vec<Message>,
    pub notice: Option<String>,
}

/// Customer message inbox.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let messages = match state.backend().list_messages(&admin.token).await {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!("Failed to fetch inbox: {}", e);
            Vec::new()
        }
    };

    CommunicationTemplate {
        display_name: admin.display_name,
        messages,
        notice: query.notice,
    }
    .into_response()
}

/// Reply to one message.
#[instrument(skip(admin, state, form))]
pub async fn reply(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MessageId>,
    Form(form): Form<ReplyForm>,
) -> Result<Redirect> {
    if form.reply.trim().is_empty() {
        return Ok(Redirect::to("/admin/communication?notice=empty_reply"));
    }

    state
        .backend()
        .reply_to_message(&admin.token, id, form.reply.trim())
        .await?;

    Ok(Redirect::to("/admin/communication?notice=replied"))
}
