//! Command implementations.
//!
//! Every command writes its result to `out` and reports failures as
//! [`CliError`]; notifications go through the portal's notifier.

pub mod dashboard;
pub mod session;

use pharmconnect_core::{EmailError, UserRole};
use pharmconnect_portal::services::AuthError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The email argument is not a valid address.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Login or registration failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// A dashboard command ran without a signed-in user.
    #[error("Not signed in. Please log in with `pharmconnect login`")]
    NotSignedIn,

    /// The session has not finished loading.
    #[error("Session is still loading")]
    Loading,

    /// The page is not in the user's navigation.
    #[error("The {page} page is not available to {role} accounts")]
    PageUnavailable { page: &'static str, role: UserRole },

    /// Only pharmacy accounts can order.
    #[error("Carts are only available to pharmacy accounts")]
    CartUnavailable,

    /// No sample product has this ID.
    #[error("Unknown product ID: {0}")]
    UnknownProduct(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::sync::Arc;

    use pharmconnect_portal::Portal;
    use pharmconnect_portal::db::{MemorySessionStore, SampleData, StaticDirectory};
    use pharmconnect_portal::services::{MemoryNotifier, SessionManager};

    /// A restored, signed-out portal on in-memory storage.
    pub(crate) fn portal() -> Portal {
        let notifier = Arc::new(MemoryNotifier::new());
        let session = SessionManager::new(
            Arc::new(StaticDirectory::seeded().unwrap()),
            Arc::new(MemorySessionStore::new()),
            notifier.clone(),
        );
        session.restore_session();
        Portal::from_parts(session, SampleData::load().unwrap(), notifier)
    }

    pub(crate) fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}
