//! Integration tests for PharmConnect.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pharmconnect-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flows` - Login, registration, logout and restore through the
//!   public session API
//! - `dashboard_views` - Pages as seen by each role after signing in
//! - `persistence` - Sessions surviving a restart on the file store
//!
//! Tests run against the built-in directory with in-memory storage, a
//! recording notifier and no simulated latency.

use std::sync::Arc;

use pharmconnect_portal::Portal;
use pharmconnect_portal::db::{MemorySessionStore, SampleData, StaticDirectory};
use pharmconnect_portal::services::{MemoryNotifier, Notification, SessionManager};
use secrecy::SecretString;

/// Email of the built-in pharmacy user.
pub const PHARMACY_EMAIL: &str = "pharmacy@example.com";

/// Email of the built-in central-fill user.
pub const CENTRAL_FILL_EMAIL: &str = "centralfill@example.com";

/// Connection code of the built-in central fill.
pub const CENTRAL_FILL_CODE: &str = "XYZ12345";

/// A portal wired to inspectable fakes.
pub struct TestContext {
    pub portal: Portal,
    pub store: Arc<MemorySessionStore>,
    pub notifier: Arc<MemoryNotifier>,
}

impl TestContext {
    /// A restored portal with empty storage.
    ///
    /// # Panics
    ///
    /// Panics if the built-in data does not load.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemorySessionStore::new())
    }

    /// A restored portal whose storage starts with `store`'s contents.
    ///
    /// # Panics
    ///
    /// Panics if the built-in data does not load.
    #[must_use]
    pub fn with_store(store: MemorySessionStore) -> Self {
        let store = Arc::new(store);
        let notifier = Arc::new(MemoryNotifier::new());
        let directory = StaticDirectory::seeded().expect("built-in directory loads");
        let session = SessionManager::new(Arc::new(directory), store.clone(), notifier.clone());
        session.restore_session();

        let samples = SampleData::load().expect("built-in samples load");
        Self {
            portal: Portal::from_parts(session, samples, notifier.clone()),
            store,
            notifier,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        self.portal.session()
    }

    /// Most recent notification.
    ///
    /// # Panics
    ///
    /// Panics if nothing was sent.
    #[must_use]
    pub fn last_notification(&self) -> Notification {
        self.notifier.last().expect("a notification was sent")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Any password; it is never checked.
#[must_use]
pub fn password() -> SecretString {
    SecretString::from("correct horse battery staple")
}
