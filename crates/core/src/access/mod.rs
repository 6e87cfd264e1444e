//! Subscription tier and trial derivation

pub mod ports;
pub mod service;
pub mod tier;

pub use service::AccessService;
pub use tier::derive_access;
