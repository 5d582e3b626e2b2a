//! Domain types shared by the PharmConnect portal and its CLI.
//!
//! Nothing here performs I/O. The crate holds identifiers, validated emails,
//! connection codes, prices, roles and statuses, each with the parsing rules
//! that keep invalid values out of the rest of the system.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
