//! Sample dashboard data.

use serde::Deserialize;

use super::RepositoryError;
use crate::models::catalog::{Order, Pharmacy, Product, Vendor};

/// Built-in sample data set.
const SAMPLE_DATA: &str = include_str!("../../data/samples.json");

/// Products, orders and partner organizations shown on the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleData {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub vendors: Vec<Vendor>,
    pub pharmacies: Vec<Pharmacy>,
}

impl SampleData {
    /// Parse the embedded sample set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the embedded JSON does
    /// not match the model types.
    pub fn load() -> Result<Self, RepositoryError> {
        let data: Self = serde_json::from_str(SAMPLE_DATA)?;
        tracing::debug!(
            products = data.products.len(),
            orders = data.orders.len(),
            vendors = data.vendors.len(),
            pharmacies = data.pharmacies.len(),
            "Loaded sample data"
        );
        Ok(data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pharmconnect_core::{OrderStatus, PartnerStatus};

    use super::*;

    #[test]
    fn test_sample_data_parses() {
        let data = SampleData::load().unwrap();
        assert_eq!(data.products.len(), 6);
        assert_eq!(data.orders.len(), 4);
        assert_eq!(data.vendors.len(), 2);
        assert_eq!(data.pharmacies.len(), 3);
    }

    #[test]
    fn test_sample_orders_keep_prices_exact() {
        let data = SampleData::load().unwrap();
        let first = data.orders.first().unwrap();
        assert_eq!(first.id.as_str(), "ORD-1234");
        assert_eq!(first.status, OrderStatus::Processing);
        assert_eq!(first.total_price().display(), "$113.95");
        assert_eq!(first.tracking_number, None);
    }

    #[test]
    fn test_sample_vendor_codes() {
        let data = SampleData::load().unwrap();
        let inactive: Vec<_> = data
            .vendors
            .iter()
            .filter(|v| v.status == PartnerStatus::Inactive)
            .map(|v| v.code.as_str())
            .collect();
        assert_eq!(inactive, ["PFS98765"]);
    }
}
