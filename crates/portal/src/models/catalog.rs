//! Catalog, order and partner types shown on the dashboard.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pharmconnect_core::{
    ConnectionCode, OrderId, OrderStatus, OrganizationId, PartnerStatus, Price, ProductId,
};

/// Maximum length of the item summary shown in order tables.
const ITEMS_SUMMARY_MAX_CHARS: usize = 25;

/// A product offered by central-fill vendors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    /// Unit price in US dollars.
    pub price: Decimal,
    /// Units in stock.
    pub stock: u32,
    pub sku: String,
    pub image_url: String,
}

impl Product {
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    #[must_use]
    pub const fn availability(&self) -> Availability {
        match self.stock {
            101.. => Availability::InStock,
            11..=100 => Availability::Limited,
            _ => Availability::Low,
        }
    }
}

/// Stock level as shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// More than 100 units.
    InStock,
    /// 11 to 100 units.
    Limited,
    Low,
}

impl Availability {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::Limited => "Limited",
            Self::Low => "Low Stock",
        }
    }
}

/// The pharmacy an order was placed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPharmacy {
    pub id: OrganizationId,
    pub name: String,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price in US dollars.
    pub price: Decimal,
}

/// A pharmacy order placed with a central fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub pharmacy: OrderPharmacy,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Order total in US dollars.
    pub total: Decimal,
    pub tracking_number: Option<String>,
}

impl Order {
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::usd(self.total)
    }

    /// `"1 item"` / `"3 items"`.
    #[must_use]
    pub fn item_label(&self) -> String {
        let count = self.items.len();
        if count == 1 {
            "1 item".to_owned()
        } else {
            format!("{count} items")
        }
    }

    /// Comma-separated item names, cut to 25 characters with `...` appended
    /// when longer.
    #[must_use]
    pub fn items_summary(&self) -> String {
        let joined = self
            .items
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if joined.chars().count() > ITEMS_SUMMARY_MAX_CHARS {
            let mut summary: String = joined.chars().take(ITEMS_SUMMARY_MAX_CHARS).collect();
            summary.push_str("...");
            summary
        } else {
            joined
        }
    }
}

/// A central-fill vendor as seen by its pharmacies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: OrganizationId,
    pub name: String,
    pub code: ConnectionCode,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub status: PartnerStatus,
    /// Date the connection was established.
    pub connected: NaiveDate,
    /// Number of products the vendor lists.
    pub products: u32,
}

/// A pharmacy as seen by its central fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub id: OrganizationId,
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub status: PartnerStatus,
    pub joined_date: NaiveDate,
    pub last_order: NaiveDate,
}
