//! Email address type.
//!
//! Emails are the login key of the portal. They keep the case the user
//! typed but compare case-insensitively.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Reasons an address is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// Nothing before the `@`.
    #[error("email is missing the part before @")]
    EmptyLocalPart,
    /// Nothing after the `@`.
    #[error("email is missing a domain")]
    EmptyDomain,
}

/// A login email address, e.g. `pharmacy@example.com`.
///
/// Validation is deliberately loose: a non-empty mailbox, an `@`, and a
/// non-empty domain. Stored session records go through the same check when
/// deserialized.
///
/// ```
/// use pharmconnect_core::Email;
///
/// let email = Email::parse("Pharmacy@Example.com").unwrap();
/// assert!(email.matches("pharmacy@example.com"));
/// assert_eq!(email.to_string(), "Pharmacy@Example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Longest accepted address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Validate `input` as an email address.
    ///
    /// # Errors
    ///
    /// Returns an `EmailError` naming the first rule the input breaks.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        match input.split_once('@') {
            _ if input.is_empty() => Err(EmailError::Empty),
            _ if input.len() > Self::MAX_LENGTH => Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            }),
            None => Err(EmailError::MissingAtSymbol),
            Some(("", _)) => Err(EmailError::EmptyLocalPart),
            Some((_, "")) => Err(EmailError::EmptyDomain),
            Some(_) => Ok(Self(input.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased lookup key.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Whether `candidate` is this address in any casing.
    ///
    /// `candidate` is raw input and is not validated.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.normalized() == candidate.to_lowercase()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pharmacy@example.com")]
    #[case("ops+night-shift@xyzcentralfill.com")]
    #[case("a@b")]
    fn test_accepts(#[case] input: &str) {
        assert_eq!(Email::parse(input).unwrap().as_str(), input);
    }

    #[rstest]
    #[case("", EmailError::Empty)]
    #[case("pharmacy.example.com", EmailError::MissingAtSymbol)]
    #[case("@example.com", EmailError::EmptyLocalPart)]
    #[case("pharmacy@", EmailError::EmptyDomain)]
    fn test_rejects(#[case] input: &str, #[case] expected: EmailError) {
        assert_eq!(Email::parse(input).unwrap_err(), expected);
    }

    #[test]
    fn test_rejects_overlong() {
        let long = format!("{}@example.com", "x".repeat(Email::MAX_LENGTH));
        assert_eq!(
            Email::parse(&long).unwrap_err(),
            EmailError::TooLong { max: 254 }
        );
    }

    #[rstest]
    #[case("PHARMACY@example.COM", true)]
    #[case("pharmacy@example.com", true)]
    #[case("pharmacy@example.org", false)]
    #[case("", false)]
    fn test_matches_ignores_case(#[case] candidate: &str, #[case] expected: bool) {
        let email = Email::parse("Pharmacy@Example.com").unwrap();
        assert_eq!(email.matches(candidate), expected);
    }

    #[test]
    fn test_normalized_keeps_display() {
        let email = Email::parse("Jane@CentralFill.com").unwrap();
        assert_eq!(email.normalized(), "jane@centralfill.com");
        assert_eq!(email.to_string(), "Jane@CentralFill.com");
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: Email = serde_json::from_str("\"jane@centralfill.com\"").unwrap();
        assert_eq!(parsed.as_str(), "jane@centralfill.com");
        assert!(serde_json::from_str::<Email>("\"jane\"").is_err());
    }
}
