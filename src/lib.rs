//! `Liturgy` - composition engine for worship service planning.
//!
//! Turns a service's persisted, strictly ordered liturgy rows into editable
//! blocks and back, classifies how recently songs were used, and seeds new
//! services from the standard order of service.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod error;
pub mod liturgy;
pub mod services;
pub mod songs;
pub mod store;
pub mod types;

pub use error::{Error, Result};
