//! # Skoo Domain
//!
//! Business domain types for the Skoo study-planning backend.
//!
//! This crate contains:
//! - Domain data types (revision sessions, tasks, flashcards, chat turns)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Skoo crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
