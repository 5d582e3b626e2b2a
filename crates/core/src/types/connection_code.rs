//! Central-fill connection codes.
//!
//! A central-fill operator shares its code with pharmacies; a pharmacy
//! presents it at registration to link itself to that operator.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ConnectionCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCodeError {
    /// The input string is empty.
    #[error("connection code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("connection code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains something other than ASCII letters and digits.
    #[error("connection code must be alphanumeric, found {0:?}")]
    InvalidCharacter(char),
}

/// A short alphanumeric connection code, e.g. `XYZ12345`.
///
/// Generated codes are three uppercase letters taken from the organization
/// name followed by a five-digit number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConnectionCode(String);

impl ConnectionCode {
    /// Maximum accepted code length.
    pub const MAX_LENGTH: usize = 16;

    /// Number of letters in a generated prefix.
    pub const PREFIX_LENGTH: usize = 3;

    /// Letter used when the organization name has fewer than three letters.
    const PREFIX_FILLER: char = 'X';

    /// Parse a `ConnectionCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, or contains
    /// anything but ASCII letters and digits.
    pub fn parse(s: &str) -> Result<Self, ConnectionCodeError> {
        if s.is_empty() {
            return Err(ConnectionCodeError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(ConnectionCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(ConnectionCodeError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Generate a code for an organization.
    ///
    /// The prefix is the first three ASCII letters of `organization_name`,
    /// uppercased and padded with `X`; the suffix is drawn uniformly from
    /// `10000..=99999`.
    ///
    /// ```
    /// use pharmconnect_core::ConnectionCode;
    ///
    /// let code = ConnectionCode::generate("Metro Fill", &mut rand::rng());
    /// assert!(code.as_str().starts_with("MET"));
    /// assert_eq!(code.as_str().len(), 8);
    /// ```
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(organization_name: &str, rng: &mut R) -> Self {
        let mut prefix: String = organization_name
            .chars()
            .filter(char::is_ascii_alphabetic)
            .take(Self::PREFIX_LENGTH)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        while prefix.len() < Self::PREFIX_LENGTH {
            prefix.push(Self::PREFIX_FILLER);
        }

        let suffix: u32 = rng.random_range(10_000..100_000);
        Self(format!("{prefix}{suffix}"))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against raw user input.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Display for ConnectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ConnectionCode {
    type Err = ConnectionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConnectionCode {
    type Error = ConnectionCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConnectionCode> for String {
    fn from(code: ConnectionCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ConnectionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    use super::*;

    fn is_generated_shape(code: &ConnectionCode) -> bool {
        let s = code.as_str();
        s.len() == 8
            && s.chars().take(3).all(|c| c.is_ascii_uppercase())
            && s.chars().skip(3).all(|c| c.is_ascii_digit())
    }

    #[rstest]
    #[case("XYZ Central Fill", "XYZ")]
    #[case("pharmafill solutions", "PHA")]
    #[case("A1 B2 Central", "ABC")]
    #[case("Qx", "QXX")]
    #[case("123", "XXX")]
    fn test_generate_prefix(#[case] organization: &str, #[case] prefix: &str) {
        let mut rng = StdRng::seed_from_u64(7);
        let code = ConnectionCode::generate(organization, &mut rng);
        assert!(code.as_str().starts_with(prefix), "{code} for {organization}");
        assert!(is_generated_shape(&code), "{code}");
    }

    #[test]
    fn test_generate_suffix_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let code = ConnectionCode::generate("Metro", &mut rng);
            let suffix: u32 = code.as_str()[3..].parse().unwrap();
            assert!((10_000..100_000).contains(&suffix));
        }
    }

    #[test]
    fn test_generated_codes_parse() {
        let code = ConnectionCode::generate("XYZ", &mut rand::rng());
        assert_eq!(ConnectionCode::parse(code.as_str()).unwrap(), code);
    }

    #[rstest]
    #[case("", ConnectionCodeError::Empty)]
    #[case("XYZ-12345", ConnectionCodeError::InvalidCharacter('-'))]
    #[case("XYZ 12345", ConnectionCodeError::InvalidCharacter(' '))]
    #[case("ABCDEFGHIJKLMNOPQ", ConnectionCodeError::TooLong { max: 16 })]
    fn test_parse_invalid(#[case] input: &str, #[case] expected: ConnectionCodeError) {
        assert_eq!(ConnectionCode::parse(input).unwrap_err(), expected);
    }

    #[test]
    fn test_matches_is_exact() {
        let code = ConnectionCode::parse("XYZ12345").unwrap();
        assert!(code.matches("XYZ12345"));
        assert!(!code.matches("xyz12345"));
        assert!(!code.matches("BADCODE"));
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let code: ConnectionCode = serde_json::from_str("\"PFS98765\"").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"PFS98765\"");
        assert!(serde_json::from_str::<ConnectionCode>("\"bad code\"").is_err());
    }
}
