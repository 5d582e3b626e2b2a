//! Data access for the portal.
//!
//! There is no database: the user directory and the dashboard samples are
//! JSON documents embedded in the binary (see `crates/portal/data/`), and
//! the session is a single JSON record in local storage.
//!
//! - `directory` - User lookups behind the [`UserDirectory`] port
//! - `session_store` - Durable storage of the current session record
//! - `samples` - Sample products, orders and partner organizations

pub mod directory;
pub mod samples;
pub mod session_store;

use thiserror::Error;

pub use directory::{StaticDirectory, UserDirectory};
pub use samples::SampleData;
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Errors that can occur in data access.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing local storage failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored or embedded data is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., a connection code used twice).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::DataCorruption(e.to_string())
    }
}
