//! User directory port and its static in-memory adapter.
//!
//! The session manager only ever talks to [`UserDirectory`], so a network or
//! database backend can replace [`StaticDirectory`] without touching the
//! manager's control flow.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;

use super::RepositoryError;
use crate::models::user::User;

/// Built-in directory seed.
const SEED_DIRECTORY: &str = include_str!("../../data/directory.json");

/// Lookups the session manager needs from a user store.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user whose email equals `email`, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Find the central-fill user holding connection code `code`.
    async fn find_by_connection_code(&self, code: &str) -> Result<Option<User>, RepositoryError>;
}

/// A fixed list of users loaded once at start.
///
/// Registration never writes back here: newly registered users live only in
/// the session that created them.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    users: Vec<User>,
}

impl StaticDirectory {
    /// Create a directory from a list of users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if two users share an email
    /// (case-insensitively) or two central fills share a connection code.
    pub fn new(users: Vec<User>) -> Result<Self, RepositoryError> {
        check_unique(&users)?;
        Ok(Self { users })
    }

    /// The built-in demo directory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the embedded seed does
    /// not parse, or `Conflict` if it breaks uniqueness.
    pub fn seeded() -> Result<Self, RepositoryError> {
        Self::from_json(SEED_DIRECTORY)
    }

    /// Parse a directory from a JSON array of user records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the JSON is invalid, or
    /// `Conflict` if it breaks uniqueness.
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        let users: Vec<User> = serde_json::from_str(json)?;
        Self::new(users)
    }

    /// Load a directory from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read, otherwise
    /// the errors of [`StaticDirectory::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, RepositoryError> {
        let json = std::fs::read_to_string(path)?;
        let directory = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            users = directory.users.len(),
            "Loaded user directory"
        );
        Ok(directory)
    }

    /// All users in the directory.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }
}

/// Emails are unique ignoring case; connection codes are unique exactly.
fn check_unique(users: &[User]) -> Result<(), RepositoryError> {
    let mut emails = HashSet::new();
    let mut codes = HashSet::new();

    for user in users {
        if !emails.insert(user.email.normalized()) {
            return Err(RepositoryError::Conflict(format!(
                "duplicate email in directory: {}",
                user.email
            )));
        }
        if let Some(code) = user.central_fill_code()
            && !codes.insert(code.as_str())
        {
            return Err(RepositoryError::Conflict(format!(
                "duplicate connection code in directory: {code}"
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .iter()
            .find(|user| user.email.matches(email))
            .cloned())
    }

    async fn find_by_connection_code(&self, code: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .iter()
            .find(|user| user.central_fill_code().is_some_and(|c| c.matches(code)))
            .cloned())
    }
}
