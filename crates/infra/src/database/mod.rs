//! Database implementations

pub mod access_code_repository;
pub mod access_repository;
pub mod calendar_token_repository;
pub mod manager;
pub mod reminder_repository;
mod rows;
pub mod study_repository;

pub use access_code_repository::*;
pub use access_repository::*;
pub use calendar_token_repository::*;
pub use manager::*;
pub use reminder_repository::*;
pub use study_repository::*;
