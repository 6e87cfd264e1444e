//! # Skoo API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - axum handlers (client → backend bridge)
//! - Application context (dependency injection)
//! - Logging setup and the health report
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Serves one route per backend function

pub mod context;
pub mod error;
pub mod extract;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::*;
pub use error::ApiError;
pub use routes::router;
