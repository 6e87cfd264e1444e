//! OpenAI-compatible chat-completions gateway

pub mod client;
pub mod types;

pub use client::GatewayClient;
