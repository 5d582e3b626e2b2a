//! Pharmacies served by a central fill.

use pharmconnect_core::ConnectionCode;

use super::{contains_folded, normalize_term};
use crate::models::catalog::Pharmacy;
use crate::models::user::User;
use crate::services::notify::{Notification, Notifier};

/// Pharmacies whose name, email or contact person contains `term`,
/// ignoring case.
#[must_use]
pub fn search_pharmacies<'a>(pharmacies: &'a [Pharmacy], term: &str) -> Vec<&'a Pharmacy> {
    let Some(term) = normalize_term(term) else {
        return pharmacies.iter().collect();
    };

    pharmacies
        .iter()
        .filter(|pharmacy| {
            contains_folded(&pharmacy.name, &term)
                || contains_folded(&pharmacy.email, &term)
                || contains_folded(&pharmacy.contact_person, &term)
        })
        .collect()
}

/// Hand out the central fill's connection code for pharmacies to register
/// with.
///
/// Returns `None`, without notifying, for users that hold no code.
pub fn share_code<'a>(user: &'a User, notifier: &dyn Notifier) -> Option<&'a ConnectionCode> {
    let code = user.central_fill_code()?;
    notifier.notify(Notification::new(
        "Connection Code Copied",
        "Share this code with pharmacies to connect with your central fill",
    ));
    Some(code)
}
