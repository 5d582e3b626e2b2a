//! Business logic services.
//!
//! - `auth` - Session manager: login, registration, logout, restore
//! - `latency` - Simulated backend latency
//! - `notify` - User-facing notifications

pub mod auth;
pub mod latency;
pub mod notify;

pub use auth::{AuthError, CentralFillRegistration, PharmacyRegistration, SessionManager};
pub use latency::Latency;
pub use notify::{MemoryNotifier, Notification, Notifier, Severity, TracingNotifier};
