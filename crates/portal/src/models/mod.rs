//! Domain models for the portal.
//!
//! - `user` - Users and their role-specific links
//! - `session` - Observable session state and storage keys
//! - `catalog` - Products, orders and partner organizations

pub mod catalog;
pub mod session;
pub mod user;

pub use catalog::{Availability, Order, OrderItem, OrderPharmacy, Pharmacy, Product, Vendor};
pub use session::SessionState;
pub use user::{Membership, User};
