//! Portal state shared across front-end commands.

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::db::{FileSessionStore, RepositoryError, SampleData, StaticDirectory};
use crate::services::auth::SessionManager;
use crate::services::notify::Notifier;

/// Everything a front-end needs: the session, the sample data and the
/// notification sink.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    session: SessionManager,
    samples: SampleData,
    notifier: Arc<dyn Notifier>,
}

impl Portal {
    /// Build the portal described by `config` and restore the stored session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the user directory or the sample data
    /// cannot be loaded.
    pub fn new(config: &PortalConfig, notifier: Arc<dyn Notifier>) -> Result<Self, RepositoryError> {
        let directory = match &config.directory_file {
            Some(path) => StaticDirectory::from_file(path)?,
            None => StaticDirectory::seeded()?,
        };
        let store = FileSessionStore::new(&config.data_dir);
        tracing::debug!(path = %store.path().display(), "Using session file");

        let session = SessionManager::new(Arc::new(directory), Arc::new(store), notifier.clone())
            .with_latency(config.latency);
        session.restore_session();

        Ok(Self::from_parts(session, SampleData::load()?, notifier))
    }

    /// Assemble a portal from prebuilt parts. The session is used as given;
    /// restoring it is the caller's job.
    #[must_use]
    pub fn from_parts(
        session: SessionManager,
        samples: SampleData,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(PortalInner {
                session,
                samples,
                notifier,
            }),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    #[must_use]
    pub fn samples(&self) -> &SampleData {
        &self.inner.samples
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }
}

impl std::fmt::Debug for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}
