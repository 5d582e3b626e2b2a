//! Session manager.
//!
//! Mock login and registration against an injected [`UserDirectory`], with
//! the signed-in user persisted to a [`SessionStore`]. Passwords are accepted
//! but never verified or stored.
//!
//! Every outcome is returned as a `Result` and also reported through the
//! [`Notifier`]. Successful operations write storage first and only then
//! update the in-memory state, so a storage failure leaves both untouched.

mod error;
mod registration;

pub use error::AuthError;
pub use registration::{CentralFillRegistration, PharmacyRegistration};

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::instrument;

use pharmconnect_core::{ConnectionCode, OrganizationId, UserId};

use crate::db::{RepositoryError, SessionStore, UserDirectory};
use crate::models::session::SessionState;
use crate::models::user::{Membership, User};
use crate::services::latency::Latency;
use crate::services::notify::{Notification, Notifier};

/// Attempts at drawing a connection code nobody holds yet.
const MAX_CODE_ATTEMPTS: usize = 16;

/// ID prefix for pharmacy users and organizations.
const PHARMACY_ID_PREFIX: &str = "p";

/// ID prefix for central-fill users and organizations.
const CENTRAL_FILL_ID_PREFIX: &str = "cf";

/// Holds the current user and runs login, registration and logout.
///
/// Construct one per process and share it behind an `Arc`. Concurrent
/// operations are not serialized: the last one to finish wins.
pub struct SessionManager {
    directory: Arc<dyn UserDirectory>,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    latency: Latency,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create a manager with no simulated latency.
    ///
    /// The manager reports loading until [`SessionManager::restore_session`]
    /// has run.
    #[must_use]
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            directory,
            store,
            notifier,
            latency: Latency::None,
            state: watch::Sender::new(SessionState::default()),
        }
    }

    /// Delay every login and registration by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch for state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Load the persisted session, once, at start.
    ///
    /// A record that does not parse is removed from storage and the session
    /// starts signed out. Calling this again returns the current user without
    /// touching storage.
    #[instrument(skip(self))]
    pub fn restore_session(&self) -> Option<User> {
        if self.state.borrow().is_restored() {
            return self.user();
        }

        let user = self.read_stored_user();
        self.state.send_modify(|state| {
            state.set_user(user.clone());
            state.mark_restored();
        });

        if let Some(user) = &user {
            tracing::info!(user_id = %user.id, role = %user.role(), "Restored session");
        }
        user
    }

    /// Sign in as the directory user with `email`, ignoring case.
    ///
    /// The password is accepted unchecked.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no user has that email.
    /// Returns `AuthError::Directory`, `Storage` or `Serialization` on
    /// internal failures. The session is unchanged on every error.
    #[instrument(skip(self, _password))]
    pub async fn login(&self, email: &str, _password: &SecretString) -> Result<User, AuthError> {
        let _pending = PendingGuard::begin(&self.state);
        self.latency.wait().await;

        let outcome = self.try_login(email).await;
        self.report(&outcome, "Login Failed", |user| {
            Notification::new("Login Successful", format!("Welcome back, {}", user.name))
        });
        outcome
    }

    /// Create a pharmacy account linked to the central fill holding the
    /// presented connection code.
    ///
    /// The new user is signed in but not added to the directory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConnectionCode` if no central fill holds
    /// the code. Returns `AuthError::Directory`, `Storage` or
    /// `Serialization` on internal failures.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register_pharmacy(
        &self,
        registration: PharmacyRegistration,
    ) -> Result<User, AuthError> {
        let _pending = PendingGuard::begin(&self.state);
        self.latency.wait().await;

        let outcome = self.try_register_pharmacy(registration).await;
        self.report(&outcome, "Registration Failed", |_| {
            Notification::new(
                "Registration Successful",
                "Your pharmacy account has been created",
            )
        });
        outcome
    }

    /// Create a central-fill account with a freshly generated connection
    /// code.
    ///
    /// # Errors
    ///
    /// Only internal failures: `AuthError::Directory`, `Storage`,
    /// `Serialization`, or `CodeSpaceExhausted` if every drawn code was
    /// already taken.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register_central_fill(
        &self,
        registration: CentralFillRegistration,
    ) -> Result<User, AuthError> {
        let _pending = PendingGuard::begin(&self.state);
        self.latency.wait().await;

        let outcome = self.try_register_central_fill(registration).await;
        self.report(&outcome, "Registration Failed", |user| {
            let code = user
                .central_fill_code()
                .map(ConnectionCode::as_str)
                .unwrap_or_default();
            Notification::new(
                "Registration Successful",
                format!("Your Central Fill account has been created. Your connection code is: {code}"),
            )
        });
        outcome
    }

    /// Sign out. Safe to call when already signed out.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        // Memory is cleared even if storage cannot be.
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        self.state.send_modify(|state| state.set_user(None));

        tracing::info!("Logged out");
        self.notifier.notify(Notification::new(
            "Logged Out",
            "You have been successfully logged out",
        ));
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn try_login(&self, email: &str) -> Result<User, AuthError> {
        let user = self
            .directory
            .find_by_email(email)
            .await
            .map_err(AuthError::Directory)?
            .ok_or(AuthError::InvalidCredentials)?;

        self.establish(&user)?;
        Ok(user)
    }

    async fn try_register_pharmacy(
        &self,
        registration: PharmacyRegistration,
    ) -> Result<User, AuthError> {
        let central_fill = self
            .directory
            .find_by_connection_code(&registration.connection_code)
            .await
            .map_err(AuthError::Directory)?
            .filter(|holder| !holder.is_pharmacy())
            .ok_or(AuthError::InvalidConnectionCode)?;

        let user = User {
            id: UserId::generate(PHARMACY_ID_PREFIX),
            email: registration.email,
            name: registration.name,
            organization_name: registration.organization_name,
            organization_id: OrganizationId::generate(PHARMACY_ID_PREFIX),
            membership: Membership::Pharmacy {
                central_fill_connections: vec![central_fill.organization_id],
            },
        };

        self.establish(&user)?;
        Ok(user)
    }

    async fn try_register_central_fill(
        &self,
        registration: CentralFillRegistration,
    ) -> Result<User, AuthError> {
        let central_fill_code = self.unused_code(&registration.organization_name).await?;

        let user = User {
            id: UserId::generate(CENTRAL_FILL_ID_PREFIX),
            email: registration.email,
            name: registration.name,
            organization_name: registration.organization_name,
            organization_id: OrganizationId::generate(CENTRAL_FILL_ID_PREFIX),
            membership: Membership::CentralFill {
                pharmacy_connections: Vec::new(),
                central_fill_code,
            },
        };

        self.establish(&user)?;
        Ok(user)
    }

    /// Draw codes until one is not held by any directory user.
    async fn unused_code(&self, organization_name: &str) -> Result<ConnectionCode, AuthError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = draw_code(organization_name);
            let holder = self
                .directory
                .find_by_connection_code(code.as_str())
                .await
                .map_err(AuthError::Directory)?;

            if holder.is_none() {
                return Ok(code);
            }
            tracing::debug!(%code, "Generated connection code already taken");
        }

        Err(AuthError::CodeSpaceExhausted)
    }

    /// Persist `user`, then make it the current user.
    fn establish(&self, user: &User) -> Result<(), AuthError> {
        let record = serde_json::to_string(user).map_err(AuthError::Serialization)?;
        self.store.save(&record).map_err(AuthError::Storage)?;
        self.state.send_modify(|state| state.set_user(Some(user.clone())));

        tracing::info!(user_id = %user.id, role = %user.role(), "Session established");
        Ok(())
    }

    fn read_stored_user(&self) -> Option<User> {
        let record = match self.store.load() {
            Ok(record) => record?,
            Err(e @ RepositoryError::DataCorruption(_)) => {
                tracing::warn!(error = %e, "Discarding stored session");
                self.discard_stored();
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %AuthError::Storage(e), "Could not read stored session");
                return None;
            }
        };

        match serde_json::from_str(&record) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %AuthError::SessionCorruption(e), "Discarding stored session");
                self.discard_stored();
                None
            }
        }
    }

    fn discard_stored(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear corrupted session");
        }
    }

    fn report(
        &self,
        outcome: &Result<User, AuthError>,
        failure_title: &str,
        success: impl FnOnce(&User) -> Notification,
    ) {
        let notification = match outcome {
            Ok(user) => success(user),
            Err(AuthError::InvalidCredentials) => {
                tracing::warn!("Unknown email");
                Notification::destructive("Authentication Failed", "Invalid email or password")
            }
            Err(AuthError::InvalidConnectionCode) => {
                tracing::warn!("Unknown connection code");
                Notification::destructive(
                    "Registration Failed",
                    "Invalid Central Fill connection code",
                )
            }
            Err(e) => {
                tracing::error!(error = %e, "{failure_title}");
                Notification::destructive(failure_title, "An unexpected error occurred")
            }
        };
        self.notifier.notify(notification);
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("latency", &self.latency)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

fn draw_code(organization_name: &str) -> ConnectionCode {
    ConnectionCode::generate(organization_name, &mut rand::rng())
}

/// Counts an operation as in flight until dropped, so loading clears even
/// when the operation's future is abandoned.
struct PendingGuard<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl<'a> PendingGuard<'a> {
    fn begin(state: &'a watch::Sender<SessionState>) -> Self {
        state.send_modify(SessionState::begin_operation);
        Self { state }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(SessionState::end_operation);
    }
}
