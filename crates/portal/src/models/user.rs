//! User domain types.
//!
//! A [`User`] is both the directory record and the persisted session value.
//! Its serialized form is camelCase with the role tag inline:
//!
//! ```json
//! {"id":"1","email":"pharmacy@example.com","name":"John Pharmacy",
//!  "organizationName":"ABC Pharmacy","organizationId":"p-123",
//!  "role":"pharmacy","centralFillConnections":["cf-456"]}
//! ```

use serde::{Deserialize, Serialize};

use pharmconnect_core::{ConnectionCode, Email, OrganizationId, UserId, UserRole};

/// A registered portal user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, matched case-insensitively.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Name of the organization the user acts for.
    pub organization_name: String,
    /// ID of that organization.
    pub organization_id: OrganizationId,
    /// Role and the links that only exist for that role.
    #[serde(flatten)]
    pub membership: Membership,
}

/// Role-specific data of a [`User`].
///
/// The role decides which link set exists, so a pharmacy can never carry a
/// connection code and a central fill can never carry vendor links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all_fields = "camelCase")]
pub enum Membership {
    /// A pharmacy and the central-fill organizations it orders from.
    #[serde(rename = "pharmacy")]
    Pharmacy {
        #[serde(default)]
        central_fill_connections: Vec<OrganizationId>,
    },
    /// A central-fill operator, its pharmacies and its connection code.
    #[serde(rename = "centralfill")]
    CentralFill {
        #[serde(default)]
        pharmacy_connections: Vec<OrganizationId>,
        central_fill_code: ConnectionCode,
    },
}

impl User {
    /// The user's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        match self.membership {
            Membership::Pharmacy { .. } => UserRole::Pharmacy,
            Membership::CentralFill { .. } => UserRole::CentralFill,
        }
    }

    #[must_use]
    pub const fn is_pharmacy(&self) -> bool {
        matches!(self.membership, Membership::Pharmacy { .. })
    }

    /// Central-fill organizations this pharmacy is linked to.
    ///
    /// Empty for central-fill users.
    #[must_use]
    pub fn central_fill_connections(&self) -> &[OrganizationId] {
        match &self.membership {
            Membership::Pharmacy {
                central_fill_connections,
            } => central_fill_connections,
            Membership::CentralFill { .. } => &[],
        }
    }

    /// Pharmacies linked to this central fill.
    ///
    /// Empty for pharmacy users.
    #[must_use]
    pub fn pharmacy_connections(&self) -> &[OrganizationId] {
        match &self.membership {
            Membership::CentralFill {
                pharmacy_connections,
                ..
            } => pharmacy_connections,
            Membership::Pharmacy { .. } => &[],
        }
    }

    /// The connection code, if this is a central-fill user.
    #[must_use]
    pub const fn central_fill_code(&self) -> Option<&ConnectionCode> {
        match &self.membership {
            Membership::CentralFill {
                central_fill_code, ..
            } => Some(central_fill_code),
            Membership::Pharmacy { .. } => None,
        }
    }
}
