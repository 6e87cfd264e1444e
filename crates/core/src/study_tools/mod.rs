//! One-shot study aid generation (quiz, revision sheet, flashcards)
//!
//! The model is forced to call a single function whose arguments are the
//! structured study aid.

pub mod prompts;
pub mod service;

pub use service::{StudyToolError, StudyToolsService};
