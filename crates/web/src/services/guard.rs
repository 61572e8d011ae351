//! Session and access guard.
//!
//! Every route declares a [`Capability`] and the guard turns it, together
//! with the session's identity (if any), into a [`RouteDecision`]. The
//! decision logic is a pure function so the full rule table is unit
//! tested without HTTP machinery; the extractors in `middleware::auth`
//! translate decisions into responses.
//!
//! The guard controls navigation only. The backend re-checks the bearer
//! token on every call, so a forged session gets an empty page, never data.

use tower_sessions::Session;

use clotho_core::Role;

use crate::models::{CurrentIdentity, session_keys};

/// What a route requires of its visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Auth pages (login, register): for signed-out visitors only.
    Public,
    /// Any authenticated identity, regardless of role.
    AnyAuthenticated,
    /// Admin role required.
    AdminOnly,
}

/// Where a request may proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the route.
    Allow,
    /// No identity on a route that needs one.
    RedirectToLogin,
    /// Identity present but the route is not for this role (or the route
    /// is an auth page and the visitor is already signed in).
    RedirectToRoleHome(Role),
}

/// Landing page for a role after login or after a bounced navigation.
#[must_use]
pub const fn role_home(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard",
        Role::User => "/user-homepage",
    }
}

/// Decide whether a visitor may see a route.
///
/// The complete rule table:
///
/// | capability        | no identity       | user                     | admin                    |
/// |-------------------|-------------------|--------------------------|--------------------------|
/// | `Public`          | allow             | redirect to role home    | redirect to role home    |
/// | `AnyAuthenticated`| redirect to login | allow                    | allow                    |
/// | `AdminOnly`       | redirect to login | redirect to role home    | allow                    |
#[must_use]
pub fn resolve_route(capability: Capability, identity: Option<Role>) -> RouteDecision {
    match (capability, identity) {
        (Capability::Public, None) => RouteDecision::Allow,
        (Capability::Public, Some(role)) => RouteDecision::RedirectToRoleHome(role),
        (Capability::AnyAuthenticated | Capability::AdminOnly, None) => {
            RouteDecision::RedirectToLogin
        }
        (Capability::AnyAuthenticated, Some(_)) => RouteDecision::Allow,
        (Capability::AdminOnly, Some(Role::Admin)) => RouteDecision::Allow,
        (Capability::AdminOnly, Some(role)) => RouteDecision::RedirectToRoleHome(role),
    }
}

impl RouteDecision {
    /// The redirect target, if this decision is a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some("/login"),
            Self::RedirectToRoleHome(role) => Some(role_home(*role)),
        }
    }
}

// ====== Session lifecycle ======

/// Store the identity in the session after a successful login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn establish_identity(
    session: &Session,
    identity: &CurrentIdentity,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_IDENTITY, identity)
        .await
}

/// Read the identity from the session, if any.
///
/// A session that fails to deserialize counts as signed out.
pub async fn current_identity(session: &Session) -> Option<CurrentIdentity> {
    session
        .get(session_keys::CURRENT_IDENTITY)
        .await
        .ok()
        .flatten()
}

/// Drop the identity and the whole session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_identity(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_route_allows_signed_out_visitor() {
        assert_eq!(
            resolve_route(Capability::Public, None),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_public_route_bounces_signed_in_visitor_to_role_home() {
        assert_eq!(
            resolve_route(Capability::Public, Some(Role::User)),
            RouteDecision::RedirectToRoleHome(Role::User)
        );
        assert_eq!(
            resolve_route(Capability::Public, Some(Role::Admin)),
            RouteDecision::RedirectToRoleHome(Role::Admin)
        );
    }

    #[test]
    fn test_protected_route_requires_identity() {
        assert_eq!(
            resolve_route(Capability::AnyAuthenticated, None),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            resolve_route(Capability::AdminOnly, None),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_protected_route_allows_any_role() {
        assert_eq!(
            resolve_route(Capability::AnyAuthenticated, Some(Role::User)),
            RouteDecision::Allow
        );
        assert_eq!(
            resolve_route(Capability::AnyAuthenticated, Some(Role::Admin)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_admin_route_rejects_user_without_logging_them_out() {
        // A shopper probing /dashboard lands back on their own homepage,
        // still signed in.
        assert_eq!(
            resolve_route(Capability::AdminOnly, Some(Role::User)),
            RouteDecision::RedirectToRoleHome(Role::User)
        );
    }

    #[test]
    fn test_admin_route_allows_admin() {
        assert_eq!(
            resolve_route(Capability::AdminOnly, Some(Role::Admin)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_role_home_targets() {
        assert_eq!(role_home(Role::Admin), "/dashboard");
        assert_eq!(role_home(Role::User), "/user-homepage");
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(RouteDecision::Allow.redirect_target(), None);
        assert_eq!(
            RouteDecision::RedirectToLogin.redirect_target(),
            Some("/login")
        );
        assert_eq!(
            RouteDecision::RedirectToRoleHome(Role::Admin).redirect_target(),
            Some("/dashboard")
        );
        assert_eq!(
            RouteDecision::RedirectToRoleHome(Role::User).redirect_target(),
            Some("/user-homepage")
        );
    }
}
