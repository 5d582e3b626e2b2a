//! Dashboard views.
//!
//! Stateless readers of the session and the sample data. Each page module
//! filters what a signed-in user gets to see; rendering is left to the
//! front-end.
//!
//! - `products` - Product catalog search and the shopping cart
//! - `orders` - Order search and status filter
//! - `connections` - Central fills a pharmacy is linked to
//! - `pharmacies` - Pharmacies of a central fill and code sharing

pub mod connections;
pub mod orders;
pub mod pharmacies;
pub mod products;

use pharmconnect_core::UserRole;

use crate::models::session::SessionState;
use crate::models::user::User;

/// Outcome of the access guard in front of every dashboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The session is still being restored or an operation is in flight.
    Loading,
    /// Nobody is signed in.
    RedirectToLogin,
    /// Render the page for this user.
    Granted(User),
}

/// Gate a dashboard page on the session.
#[must_use]
pub fn require_user(state: &SessionState) -> Access {
    if state.is_loading() {
        return Access::Loading;
    }
    state
        .user()
        .map_or(Access::RedirectToLogin, |user| Access::Granted(user.clone()))
}

/// A dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Orders,
    Products,
    Analytics,
    Connections,
    Pharmacies,
}

impl Page {
    /// Sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Orders => "Orders",
            Self::Products => "Products",
            Self::Analytics => "Analytics",
            Self::Connections => "Connections",
            Self::Pharmacies => "Pharmacies",
        }
    }

    /// Route of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Orders => "/dashboard/orders",
            Self::Products => "/dashboard/products",
            Self::Analytics => "/dashboard/analytics",
            Self::Connections => "/dashboard/connections",
            Self::Pharmacies => "/dashboard/pharmacies",
        }
    }
}

const PHARMACY_NAVIGATION: [Page; 4] = [
    Page::Orders,
    Page::Products,
    Page::Analytics,
    Page::Connections,
];

const CENTRAL_FILL_NAVIGATION: [Page; 4] = [
    Page::Products,
    Page::Orders,
    Page::Pharmacies,
    Page::Analytics,
];

/// Sidebar entries for `role`, in display order.
#[must_use]
pub const fn navigation(role: UserRole) -> &'static [Page] {
    match role {
        UserRole::Pharmacy => &PHARMACY_NAVIGATION,
        UserRole::CentralFill => &CENTRAL_FILL_NAVIGATION,
    }
}

/// Where `/dashboard` sends a user of `role`.
#[must_use]
pub const fn landing_page(role: UserRole) -> Page {
    match role {
        UserRole::Pharmacy => Page::Products,
        UserRole::CentralFill => Page::Pharmacies,
    }
}

/// Lowercased search term; `None` when it matches everything.
fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_lowercase())
}

/// Case-insensitive substring test against an already lowercased needle.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::StaticDirectory;

    fn signed_in(user: Option<User>) -> SessionState {
        let mut state = SessionState::default();
        state.mark_restored();
        state.set_user(user);
        state
    }

    #[test]
    fn test_require_user() {
        assert_eq!(require_user(&SessionState::default()), Access::Loading);
        assert_eq!(require_user(&signed_in(None)), Access::RedirectToLogin);

        let user = StaticDirectory::seeded().unwrap().users().first().cloned().unwrap();
        assert_eq!(
            require_user(&signed_in(Some(user.clone()))),
            Access::Granted(user)
        );
    }

    #[test]
    fn test_loading_wins_over_signed_in_user() {
        let user = StaticDirectory::seeded().unwrap().users().first().cloned();
        let mut state = signed_in(user);
        state.begin_operation();
        assert_eq!(require_user(&state), Access::Loading);
    }

    #[test]
    fn test_navigation_by_role() {
        let labels = |role| navigation(role).iter().copied().map(Page::label).collect::<Vec<_>>();
        assert_eq!(
            labels(UserRole::Pharmacy),
            ["Orders", "Products", "Analytics", "Connections"]
        );
        assert_eq!(
            labels(UserRole::CentralFill),
            ["Products", "Orders", "Pharmacies", "Analytics"]
        );
    }

    #[test]
    fn test_landing_page() {
        assert_eq!(landing_page(UserRole::Pharmacy).path(), "/dashboard/products");
        assert_eq!(landing_page(UserRole::CentralFill).path(), "/dashboard/pharmacies");
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  "), None);
        assert_eq!(normalize_term(" Pain ").as_deref(), Some("pain"));
        assert!(contains_folded("Pain Relief", "pain"));
    }
}
