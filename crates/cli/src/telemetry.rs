//! Logging and error tracking setup.
//!
//! Log lines go to stderr so command output on stdout stays clean. When
//! `SENTRY_DSN` is set, errors are reported to Sentry with the signed-in
//! user attached.

use secrecy::ExposeSecret;
use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pharmconnect_portal::config::PortalConfig;
use pharmconnect_portal::models::User;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "pharmconnect_portal=info,pharmconnect_cli=info";

/// Start the Sentry client. The returned guard flushes pending events on drop.
pub fn init_sentry(config: &PortalConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    Some(sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config.sentry_environment.clone().map(Into::into),
            attach_stacktrace: true,
            ..Default::default()
        },
    )))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .try_init();
}

/// Only errors become Sentry events.
///
/// Rejected logins and registrations are logged at WARN; they are user
/// mistakes and travel as breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> EventFilter {
    match *metadata.level() {
        Level::ERROR => EventFilter::Event,
        Level::WARN | Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Attach `user` to events reported from now on.
pub fn set_sentry_user(user: &User) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user.id.to_string()),
            email: Some(user.email.to_string()),
            username: Some(user.name.clone()),
            ..Default::default()
        }));
    });
}

pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| scope.set_user(None));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sentry_without_dsn() {
        assert!(init_sentry(&PortalConfig::default()).is_none());
    }
}
