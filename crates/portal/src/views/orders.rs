//! Order list.

use pharmconnect_core::OrderStatus;

use super::{contains_folded, normalize_term};
use crate::models::catalog::Order;
use crate::models::user::User;

/// Status dropdown of the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn accepts(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

/// Search box and status filter of the order list.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl OrderQuery {
    fn matches(&self, term: Option<&str>, order: &Order) -> bool {
        let matches_search = term.is_none_or(|term| {
            contains_folded(order.id.as_str(), term)
                || contains_folded(&order.pharmacy.name, term)
                || order.items.iter().any(|item| contains_folded(&item.name, term))
        });
        matches_search && self.status.accepts(order.status)
    }
}

/// Orders `user` may see that match `query`.
///
/// Pharmacies only see orders placed by their own organization; central
/// fills see every order.
#[must_use]
pub fn visible_orders<'a>(orders: &'a [Order], user: &User, query: &OrderQuery) -> Vec<&'a Order> {
    let term = normalize_term(&query.search);

    orders
        .iter()
        .filter(|order| query.matches(term.as_deref(), order))
        .filter(|order| !user.is_pharmacy() || order.pharmacy.id == user.organization_id)
        .collect()
}
