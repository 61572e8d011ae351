//! End-to-end guard scenarios: raw role tags in, route decisions out.
//!
//! These exercise the same path a real navigation takes - normalize the
//! backend's role tag, then ask the guard - without any HTTP machinery.

use clotho_core::Role;
use clotho_web::services::guard::{Capability, RouteDecision, resolve_route, role_home};

/// Signed out, navigating to the admin dashboard: bounced to login.
/// After signing in with a `ROLE_ADMIN` tag, the same navigation passes.
#[test]
fn test_admin_route_before_and_after_login() {
    assert_eq!(
        resolve_route(Capability::AdminOnly, None),
        RouteDecision::RedirectToLogin
    );

    let role = Role::parse_raw("ROLE_ADMIN").expect("admin tag must normalize");
    assert_eq!(role, Role::Admin);
    assert_eq!(
        resolve_route(Capability::AdminOnly, Some(role)),
        RouteDecision::Allow
    );
}

/// A shopper's tag never opens the admin console; they are sent back to
/// their own homepage and stay signed in.
#[test]
fn test_shopper_probing_admin_routes() {
    let role = Role::parse_raw("ROLE_USER").expect("user tag must normalize");

    let decision = resolve_route(Capability::AdminOnly, Some(role));
    assert_eq!(decision, RouteDecision::RedirectToRoleHome(Role::User));
    assert_eq!(decision.redirect_target(), Some("/user-homepage"));
}

/// Signed-in visitors never see the auth pages again.
#[test]
fn test_auth_pages_bounce_to_role_home() {
    for (tag, home) in [("ROLE_ADMIN", "/dashboard"), ("ROLE_USER", "/user-homepage")] {
        let role = Role::parse_raw(tag).expect("known tag must normalize");
        let decision = resolve_route(Capability::Public, Some(role));
        assert_eq!(decision.redirect_target(), Some(home));
        assert_eq!(role_home(role), home);
    }
}

/// Tags outside the closed set never yield a role, so no session gets
/// established and every protected navigation keeps redirecting to login.
#[test]
fn test_unknown_tags_stay_unauthorized() {
    for tag in ["ROLE_MANAGER", "admin", "ROLE_", "", "SUPERUSER"] {
        assert!(Role::parse_raw(tag).is_err(), "tag {tag:?} must not parse");
    }

    assert_eq!(
        resolve_route(Capability::AnyAuthenticated, None),
        RouteDecision::RedirectToLogin
    );
}
