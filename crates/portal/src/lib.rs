//! PharmConnect portal library.
//!
//! The session manager, its storage and directory adapters, and the
//! dashboard views that read the session. Front-ends (the `pharmconnect`
//! CLI, tests) build a [`Portal`] and drive it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

pub use state::Portal;
