//! Short spoken coach messages
//!
//! Never fails: gateway errors degrade to canned messages.

pub mod service;

pub use service::CoachService;
