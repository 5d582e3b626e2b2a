//! Validated domain values.

pub mod connection_code;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use connection_code::{ConnectionCode, ConnectionCodeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use status::*;
