//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use clotho_core::{Email, Role, UserId};

/// Session-stored identity.
///
/// Captured once at login from the backend's token + profile exchange and
/// never refreshed; a role change on the backend takes effect at the next
/// login. The bearer token rides along so every backend call can present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentIdentity {
    /// Backend user ID.
    pub id: UserId,
    /// Email address.
    pub email: Email,
    /// Display name shown in the header.
    pub display_name: String,
    /// Normalized role (the raw `ROLE_*` marker never leaves the login flow).
    pub role: Role,
    /// Bearer token for backend calls.
    pub token: String,
}

impl CurrentIdentity {
    /// Whether this identity may use the admin console.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in identity.
    pub const CURRENT_IDENTITY: &str = "current_identity";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity(role: Role) -> CurrentIdentity {
        CurrentIdentity {
            id: UserId::from("u-1"),
            email: "shopper@example.com".parse().unwrap(),
            display_name: "Shopper".to_owned(),
            role,
            token: "tok".to_owned(),
        }
    }

    #[test]
    fn test_is_admin_follows_role() {
        assert!(identity(Role::Admin).is_admin());
        assert!(!identity(Role::User).is_admin());
    }

    #[test]
    fn test_round_trips_through_session_serialization() {
        let original = identity(Role::Admin);
        let json = serde_json::to_string(&original).unwrap();
        let restored: CurrentIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, original.id);
        assert_eq!(restored.role, Role::Admin);
        assert_eq!(restored.token, "tok");
    }
}
