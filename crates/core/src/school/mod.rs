//! School access-code validation

pub mod ports;
pub mod service;

pub use service::{AccessCodeOutcome, AccessCodeService};
