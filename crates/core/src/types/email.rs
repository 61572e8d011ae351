//! Validated email address for login, registration, and contact forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an input string was rejected by [`Email::parse`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Blank after trimming.
    #[error("email address is required")]
    Blank,
    /// Longer than the RFC 5321 address limit.
    #[error("email address is too long")]
    TooLong,
    /// No `local@domain` shape.
    #[error("enter an address like name@example.com")]
    Malformed,
}

/// An email address as entered in a form.
///
/// Inputs come from HTML forms, so [`Email::parse`] trims surrounding
/// whitespace before validating. Validation is structural only (non-empty
/// local part and domain around a single leading-`@`-free split); the
/// backend auth service decides whether the address is actually usable.
///
/// ```
/// use clotho_core::Email;
///
/// let email = Email::parse("  shopper@example.com ")?;
/// assert_eq!(email.as_str(), "shopper@example.com");
///
/// assert!(Email::parse("   ").is_err());
/// assert!(Email::parse("shopper.example.com").is_err());
/// # Ok::<(), clotho_core::EmailError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

/// RFC 5321 limit on the total address length.
const MAX_ADDRESS_LEN: usize = 254;

impl Email {
    /// Trim and validate a form input.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the trimmed input is blank, over the RFC
    /// 5321 length limit, or not shaped like `local@domain`.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Blank);
        }
        if trimmed.len() > MAX_ADDRESS_LEN {
            return Err(EmailError::TooLong);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(EmailError::Malformed);
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::Malformed);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The validated address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned address string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_addresses() {
        for ok in ["shopper@example.com", "a.b+tag@example.co.uk", "x@y.z"] {
            assert!(Email::parse(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_trims_form_whitespace() {
        let email = Email::parse("  shopper@example.com\n").unwrap();
        assert_eq!(email.as_str(), "shopper@example.com");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(Email::parse("").unwrap_err(), EmailError::Blank);
        assert_eq!(Email::parse("   \t").unwrap_err(), EmailError::Blank);
    }

    #[test]
    fn test_length_limit() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(Email::parse(&long).unwrap_err(), EmailError::TooLong);
    }

    #[test]
    fn test_shape_violations() {
        for bad in ["plain", "@example.com", "shopper@", "a@b@c"] {
            assert_eq!(Email::parse(bad).unwrap_err(), EmailError::Malformed, "{bad}");
        }
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("shopper@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"shopper@example.com\"");
        let back: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }
}
