//! Closed role type and the single boundary parser for raw role tags.
//!
//! The auth service reports roles as namespaced tags (`ROLE_ADMIN`,
//! `ROLE_USER`). Those raw strings are parsed exactly once, right after the
//! auth exchange; everything downstream works with the closed [`Role`] enum
//! and never re-parses strings.

use serde::{Deserialize, Serialize};

/// Namespace prefix carried by raw role tags.
const ROLE_PREFIX: &str = "ROLE_";

/// Error returned when a raw role tag is outside the closed role set.
///
/// Callers must treat this as "unauthorized for role-gated views", not fall
/// back to a default role.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized role tag: {raw}")]
pub struct RoleParseError {
    /// The raw tag that failed to parse.
    pub raw: String,
}

/// The normalized role of a signed-in identity.
///
/// This is a closed set: any tag that does not normalize to one of these
/// variants fails [`Role::parse_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including the admin console.
    Admin,
    /// Regular storefront customer.
    User,
}

impl Role {
    /// Parse a raw role tag from the auth service.
    ///
    /// Strips the `ROLE_` namespace prefix, lowercases the remainder, and
    /// maps it into the closed set. A tag without the prefix or outside the
    /// set is an error.
    ///
    /// ```
    /// use clotho_core::Role;
    ///
    /// assert_eq!(Role::parse_raw("ROLE_ADMIN"), Ok(Role::Admin));
    /// assert_eq!(Role::parse_raw("ROLE_USER"), Ok(Role::User));
    /// assert!(Role::parse_raw("ROLE_MANAGER").is_err());
    /// assert!(Role::parse_raw("admin").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RoleParseError`] for any tag outside the closed set.
    pub fn parse_raw(raw: &str) -> Result<Self, RoleParseError> {
        let err = || RoleParseError {
            raw: raw.to_owned(),
        };

        let normalized = raw.strip_prefix(ROLE_PREFIX).ok_or_else(err)?;
        match normalized.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(err()),
        }
    }

    /// The normalized, lowercase form used in templates and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Whether this role may access the admin console.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_admin() {
        assert_eq!(Role::parse_raw("ROLE_ADMIN").unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_raw_user() {
        assert_eq!(Role::parse_raw("ROLE_USER").unwrap(), Role::User);
    }

    #[test]
    fn test_parse_raw_is_case_insensitive_after_prefix() {
        assert_eq!(Role::parse_raw("ROLE_Admin").unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_raw_rejects_unknown_tags() {
        // A future ROLE_MANAGER has no defined outcome; default-deny.
        let err = Role::parse_raw("ROLE_MANAGER").unwrap_err();
        assert_eq!(err.raw, "ROLE_MANAGER");
    }

    #[test]
    fn test_parse_raw_requires_prefix() {
        assert!(Role::parse_raw("admin").is_err());
        assert!(Role::parse_raw("").is_err());
        assert!(Role::parse_raw("role_admin").is_err());
    }

    #[test]
    fn test_normalized_form() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
