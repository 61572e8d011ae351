//! Authentication route handlers.
//!
//! Login is a two-step exchange against the backend: `POST /auth/login`
//! yields the bearer token, then `GET /auth/me` with that token yields the
//! profile carrying the raw `ROLE_*` tag. The tag is normalized exactly
//! once, here; an unrecognized tag means no session is established.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use clotho_core::{Email, Role, UserId};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentIdentity;
use crate::services::guard::{self, role_home};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already signed-in visitors are bounced to their role home instead of
/// seeing the form again.
pub async fn login_page(
    OptionalAuth(identity): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if let Some(identity) = identity {
        return Redirect::to(role_home(identity.role)).into_response();
    }

    LoginTemplate {
        error: query.error,
        success: query.success,
    }
    .into_response()
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Redirect::to("/login?error=missing_fields").into_response();
    }

    let token = match state.backend().login(&form.email, &form.password).await {
        Ok(response) => response.id_token,
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            return Redirect::to("/login?error=credentials").into_response();
        }
    };

    match build_identity(&state, &token).await {
        Ok(identity) => {
            if let Err(e) = guard::establish_identity(&session, &identity).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/login?error=session").into_response();
            }
            set_sentry_user(&identity.id, Some(identity.email.as_str()));

            Redirect::to(role_home(identity.role)).into_response()
        }
        Err(redirect) => redirect,
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(identity): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if let Some(identity) = identity {
        return Redirect::to(role_home(identity.role)).into_response();
    }

    RegisterTemplate { error: query.error }.into_response()
}

/// Handle registration form submission.
///
/// On success the new account is signed in immediately using the token the
/// signup call returned.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Redirect::to("/register?error=missing_fields").into_response();
    }
    if form.email.parse::<Email>().is_err() {
        return Redirect::to("/register?error=invalid_email").into_response();
    }
    // Validate passwords match
    if form.password != form.password_confirm {
        return Redirect::to("/register?error=password_mismatch").into_response();
    }

    let token = match state.backend().signup(&form.email, &form.password).await {
        Ok(response) => response.id_token,
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            let error_msg = e.to_string();
            if error_msg.contains("exists") || error_msg.contains("already") {
                return Redirect::to("/register?error=email_taken").into_response();
            }
            return Redirect::to("/register?error=failed").into_response();
        }
    };

    match build_identity(&state, &token).await {
        Ok(identity) => {
            if let Err(e) = guard::establish_identity(&session, &identity).await {
                tracing::error!("Failed to set session after signup: {}", e);
                return Redirect::to("/login?success=registered").into_response();
            }
            set_sentry_user(&identity.id, Some(identity.email.as_str()));

            Redirect::to(role_home(identity.role)).into_response()
        }
        Err(_) => {
            // Account exists but the profile exchange failed; let them
            // sign in normally.
            Redirect::to("/login?success=registered").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the whole session; the bearer token simply expires on the
/// backend side.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = guard::clear_identity(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();

    Redirect::to("/login").into_response()
}

// =============================================================================
// Helpers
// =============================================================================

/// Exchange a fresh bearer token for a session identity.
///
/// Normalizes the raw role tag; any tag outside the closed set aborts the
/// login rather than defaulting to a role.
async fn build_identity(state: &AppState, token: &str) -> Result<CurrentIdentity, Response> {
    let profile = match state.backend().profile(token).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Profile fetch failed after login: {}", e);
            return Err(Redirect::to("/login?error=profile_fetch").into_response());
        }
    };

    let role = match Role::parse_raw(&profile.role) {
        Ok(role) => role,
        Err(e) => {
            tracing::warn!("Unrecognized role tag: {}", e);
            return Err(Redirect::to("/login?error=unauthorized").into_response());
        }
    };

    let email = match profile.email.parse::<Email>() {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!("Backend profile carried a bad email: {}", e);
            return Err(Redirect::to("/login?error=profile_fetch").into_response());
        }
    };

    let display_name = profile
        .display_name
        .unwrap_or_else(|| profile.email.clone());

    Ok(CurrentIdentity {
        id: UserId::from(profile.id),
        email,
        display_name,
        role,
        token: token.to_owned(),
    })
}
