//! Validated email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Syntactically valid email address.
///
/// Construction through [`EmailAddress::parse`] is the single validation
/// point; everything downstream can rely on the address being well-formed.
/// Addresses are normalized to lowercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an address.
    ///
    /// Accepts `local@domain` where both parts are non-empty, the domain
    /// contains a dot, and the whole string has no whitespace. This is a
    /// syntactic check only; deliverability is a separate concern.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` on the `email` field for any malformed
    /// input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "email",
                "must not contain whitespace",
            ));
        }

        let (local, domain) = trimmed
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing @"))?;

        if local.is_empty() {
            return Err(ValidationError::invalid_format("email", "empty local part"));
        }
        if domain.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "invalid domain"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format(
                "email",
                "domain must contain a dot",
            ));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_address() {
        let email = EmailAddress::parse("student@example.com").unwrap();
        assert_eq!(email.as_str(), "student@example.com");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = EmailAddress::parse("  Student@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "student@example.com");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            EmailAddress::parse("   "),
            Err(ValidationError::empty_field("email"))
        );
    }

    #[test]
    fn rejects_missing_at() {
        assert!(EmailAddress::parse("not-an-email").is_err());
    }

    #[test]
    fn rejects_empty_local_part() {
        assert!(EmailAddress::parse("@example.com").is_err());
    }

    #[test]
    fn rejects_dotless_domain() {
        assert!(EmailAddress::parse("a@localhost").is_err());
    }

    #[test]
    fn rejects_double_at() {
        assert!(EmailAddress::parse("a@b@example.com").is_err());
    }

    #[test]
    fn rejects_inner_whitespace() {
        assert!(EmailAddress::parse("a b@example.com").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: Result<EmailAddress, _> = serde_json::from_str("\"a@x.com\"");
        assert!(ok.is_ok());

        let bad: Result<EmailAddress, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
