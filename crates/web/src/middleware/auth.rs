//! Authentication middleware and extractors.
//!
//! Provides extractors that turn the guard's route decisions into axum
//! rejections. Handlers declare what they need (`RequireAuth`,
//! `RequireAdmin`, `OptionalAuth`) and never look at the session directly.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::CurrentIdentity;
use crate::services::guard::{self, Capability, RouteDecision};

/// Extractor that requires any authenticated identity.
///
/// If nobody is signed in, redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.display_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentIdentity);

/// Extractor that requires the admin role.
///
/// A signed-out visitor is sent to login; a signed-in shopper is bounced
/// back to their own homepage, still signed in.
pub struct RequireAdmin(pub CurrentIdentity);

/// Error returned when a guard decision is not `Allow`.
pub enum GuardRejection {
    /// Redirect somewhere (login page or role home).
    Redirect(&'static str),
    /// Session layer missing entirely; a wiring bug, not a user state.
    NoSession,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(target) => Redirect::to(target).into_response(),
            Self::NoSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Map a non-allow decision to its rejection.
fn reject(decision: &RouteDecision) -> GuardRejection {
    match decision.redirect_target() {
        Some(target) => GuardRejection::Redirect(target),
        // Allow never reaches here; fall back to login to stay total.
        None => GuardRejection::Redirect("/login"),
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(GuardRejection::NoSession)?;

        let identity = guard::current_identity(session).await;
        let decision = guard::resolve_route(
            Capability::AnyAuthenticated,
            identity.as_ref().map(|i| i.role),
        );

        match (decision, identity) {
            (RouteDecision::Allow, Some(identity)) => Ok(Self(identity)),
            (decision, _) => Err(reject(&decision)),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(GuardRejection::NoSession)?;

        let identity = guard::current_identity(session).await;
        let decision =
            guard::resolve_route(Capability::AdminOnly, identity.as_ref().map(|i| i.role));

        match (decision, identity) {
            (RouteDecision::Allow, Some(identity)) => Ok(Self(identity)),
            (decision, _) => Err(reject(&decision)),
        }
    }
}

/// Extractor that optionally gets the current identity.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// signed in.
pub struct OptionalAuth(pub Option<CurrentIdentity>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<Session>() {
            Some(session) => guard::current_identity(session).await,
            None => None,
        };

        Ok(Self(identity))
    }
}
