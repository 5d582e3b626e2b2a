//! Role and status enums for portal entities.

use serde::{Deserialize, Serialize};

/// The kind of organization a user acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// A retail pharmacy ordering from central-fill operators.
    #[serde(rename = "pharmacy")]
    Pharmacy,
    /// A central-fill operator fulfilling bulk orders for pharmacies.
    #[serde(rename = "centralfill")]
    CentralFill,
}

impl UserRole {
    /// Human-readable name of the portal this role signs into.
    #[must_use]
    pub const fn portal_title(self) -> &'static str {
        match self {
            Self::Pharmacy => "Pharmacy Portal",
            Self::CentralFill => "Central Fill Portal",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pharmacy => write!(f, "pharmacy"),
            Self::CentralFill => write!(f, "centralfill"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pharmacy" => Ok(Self::Pharmacy),
            "centralfill" | "central-fill" => Ok(Self::CentralFill),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Capitalized label shown in order tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Whether a partner organization is currently trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    #[default]
    Active,
    Inactive,
}

impl PartnerStatus {
    /// Capitalized label shown in partner tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_serde_matches_stored_sessions() {
        assert_eq!(
            serde_json::to_string(&UserRole::CentralFill).unwrap(),
            "\"centralfill\""
        );
        let role: UserRole = serde_json::from_str("\"pharmacy\"").unwrap();
        assert_eq!(role, UserRole::Pharmacy);
    }

    #[test]
    fn test_user_role_from_str() {
        assert_eq!("central-fill".parse::<UserRole>().unwrap(), UserRole::CentralFill);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_order_status_roundtrips_through_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(OrderStatus::Shipped.label(), "Shipped");
        assert_eq!(PartnerStatus::Inactive.label(), "Inactive");
        assert_eq!(UserRole::Pharmacy.portal_title(), "Pharmacy Portal");
    }
}
