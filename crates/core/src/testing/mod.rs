//! In-memory port implementations for tests
//!
//! Shared by this crate's integration tests and the api router tests, so the
//! fakes behave the same everywhere. Compiled only for tests or with the
//! `test-utils` feature.
//!
//! - [`ScriptedChatModel`]: replays queued completions, records requests
//! - [`InMemoryStore`]: study and reminder store with the Postgres user scoping
//! - [`MemoryTokens`]: Google token rows keyed by user

#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

mod model;
mod store;
mod tokens;

pub use model::ScriptedChatModel;
pub use store::InMemoryStore;
pub use tokens::MemoryTokens;
