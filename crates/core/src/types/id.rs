//! String-backed identifiers.
//!
//! Every entity gets its own ID type so a `UserId` can never be passed where
//! an `OrganizationId` is expected. Values are opaque, e.g. `"p-123"` or
//! `"ORD-1234"`.

/// Declare a transparent `String` newtype ID.
///
/// ```rust
/// # use pharmconnect_core::define_id;
/// define_id!(ShipmentId);
///
/// let id = ShipmentId::generate("shp");
/// assert!(id.as_str().starts_with("shp-"));
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh ID of the form `{prefix}-{unique suffix}`.
            #[must_use]
            pub fn generate(prefix: &str) -> Self {
                Self(format!("{prefix}-{}", $crate::types::id::fresh_suffix()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

/// Random suffix for generated IDs (a v4 UUID without hyphens).
#[doc(hidden)]
#[must_use]
pub fn fresh_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

define_id!(UserId);
define_id!(OrganizationId);
define_id!(ProductId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uses_prefix() {
        let id = OrganizationId::generate("cf");
        assert!(id.as_str().starts_with("cf-"));
        assert_eq!(id.as_str().len(), "cf-".len() + 32);
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(UserId::generate("p"), UserId::generate("p"));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = OrganizationId::new("p-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-123\"");

        let parsed: OrganizationId = serde_json::from_str("\"cf-456\"").unwrap();
        assert_eq!(parsed.as_str(), "cf-456");
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderId::from("ORD-1234".to_owned()).to_string(), "ORD-1234");
    }
}
