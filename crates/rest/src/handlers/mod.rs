//! HTTP request handlers.
//!
//! - [`search`] - Device search
//! - [`health`] - Health and readiness endpoints

pub mod health;
pub mod search;

// Re-export handlers for convenience
pub use health::{health_handler, readiness_handler};
pub use search::search_devices_handler;
