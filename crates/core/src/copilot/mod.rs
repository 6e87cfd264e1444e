//! AI copilot tool-loop
//!
//! A request-scoped loop: the conversation and the student snapshot go to
//! the model together with a fixed tool catalog; any tool the model asks
//! for runs against the store on behalf of the authenticated user, its
//! result is fed back, and the loop repeats until the model answers in
//! plain text or the round cap is reached.

pub mod executor;
pub mod ports;
pub mod prompt;
pub mod service;
pub mod tools;

pub use executor::ToolExecutor;
pub use service::CopilotService;
