//! Domain types
//!
//! Organized into submodules:
//! - `study`: subjects, revision sessions, tasks, flashcards and stats
//! - `chat`: copilot conversation turns and the tool-call audit trail
//! - `context`: the student snapshot rendered into the copilot prompt
//! - `llm`: provider-neutral chat-completion messages and tool schemas
//! - `notifications`: reminder notifications and sweep candidates
//! - `calendar`: Google Calendar tokens and event views
//! - `school`: access codes and expected students
//! - `access`: subscription tiers and trial derivation results
//! - `coach`: short coach-message requests

pub mod access;
pub mod calendar;
pub mod chat;
pub mod coach;
pub mod context;
pub mod llm;
pub mod notifications;
pub mod school;
pub mod study;

pub use access::*;
pub use calendar::*;
pub use chat::*;
pub use coach::*;
pub use context::*;
pub use llm::*;
pub use notifications::*;
pub use school::*;
pub use study::*;
