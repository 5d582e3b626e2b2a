//! Session-related types.
//!
//! The observable state of the session manager and the storage key of the
//! persisted session record.

use super::user::User;

/// Snapshot of the session as consumed by views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    pending: usize,
    restored: bool,
}

impl SessionState {
    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True until the persisted session has been restored, and while any
    /// operation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        !self.restored || self.pending > 0
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) const fn is_restored(&self) -> bool {
        self.restored
    }

    pub(crate) fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub(crate) const fn mark_restored(&mut self) {
        self.restored = true;
    }

    pub(crate) const fn begin_operation(&mut self) {
        self.pending += 1;
    }

    pub(crate) const fn end_operation(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }
}

/// Storage keys for persisted session data.
pub mod keys {
    /// Key under which the current user record is stored.
    pub const CURRENT_USER: &str = "pharma_user";
}
