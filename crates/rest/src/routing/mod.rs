//! Route configuration for the reporting API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod reporting_routes;

pub use reporting_routes::create_routes;
