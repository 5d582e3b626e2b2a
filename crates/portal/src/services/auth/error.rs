//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user with that email (passwords are not checked).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No central fill holds the presented connection code.
    #[error("invalid central fill connection code")]
    InvalidConnectionCode,

    /// The stored session record did not parse.
    #[error("stored session is corrupted: {0}")]
    SessionCorruption(#[source] serde_json::Error),

    /// The user directory failed.
    #[error("directory error: {0}")]
    Directory(#[source] RepositoryError),

    /// Local session storage failed.
    #[error("storage error: {0}")]
    Storage(#[source] RepositoryError),

    /// The session record could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Every generated connection code was already taken.
    #[error("could not generate an unused connection code")]
    CodeSpaceExhausted,
}

impl AuthError {
    /// Whether this is a user-facing rejection rather than an internal fault.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidConnectionCode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_not_internal_faults() {
        assert!(AuthError::InvalidCredentials.is_rejection());
        assert!(AuthError::InvalidConnectionCode.is_rejection());
        assert!(!AuthError::CodeSpaceExhausted.is_rejection());
        assert!(
            !AuthError::Storage(RepositoryError::Conflict("x".to_owned())).is_rejection()
        );
    }
}
