//! Product catalog and cart.

use pharmconnect_core::{Price, ProductId};

use super::{contains_folded, normalize_term};
use crate::models::catalog::Product;
use crate::models::user::User;
use crate::services::notify::{Notification, Notifier};

/// Products whose name, category or SKU contains `term`, ignoring case.
///
/// An empty term matches every product.
#[must_use]
pub fn search_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let Some(term) = normalize_term(term) else {
        return products.iter().collect();
    };

    products
        .iter()
        .filter(|product| {
            contains_folded(&product.name, &term)
                || contains_folded(&product.category, &term)
                || contains_folded(&product.sku, &term)
        })
        .collect()
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.unit_price().times(self.quantity)
    }
}

/// A pharmacy's shopping cart.
///
/// Central fills supply the catalog rather than order from it, so only
/// pharmacy accounts get a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart for `user`, or `None` for a central-fill account.
    #[must_use]
    pub const fn for_user(user: &User) -> Option<Self> {
        if user.is_pharmacy() {
            Some(Self { lines: Vec::new() })
        } else {
            None
        }
    }

    /// Add one unit of `product` and tell the user.
    pub fn add(&mut self, product: &Product, notifier: &dyn Notifier) {
        match self.line_mut(&product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }

        notifier.notify(Notification::new(
            "Added to cart",
            format!("{} has been added to your cart", product.name),
        ));
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.product.id == id)
    }
}
