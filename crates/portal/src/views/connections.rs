//! Central fills a pharmacy is connected to.

use crate::models::catalog::Vendor;
use crate::models::user::User;

/// Vendors listed in the user's central-fill connections.
///
/// Always empty for central-fill users.
#[must_use]
pub fn connected_vendors<'a>(vendors: &'a [Vendor], user: &User) -> Vec<&'a Vendor> {
    let connections = user.central_fill_connections();
    vendors
        .iter()
        .filter(|vendor| connections.contains(&vendor.id))
        .collect()
}
