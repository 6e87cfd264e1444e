//! # Skoo Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The Postgres store (tokio-postgres)
//! - HTTP client with retry/backoff
//! - External service integrations (LLM gateway, Supabase auth, Google
//!   Calendar)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `skoo-core`
//! - Contains all "impure" code (network and database I/O)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use http::*;
pub use integrations::*;
