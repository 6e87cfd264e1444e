//! # Skoo Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the store, the LLM gateway, auth
//!   and Google Calendar
//! - The copilot tool-loop and the other request services
//!
//! ## Architecture Principles
//! - Only depends on `skoo-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Time is read through [`clock::Clock`]

pub mod access;
pub mod calendar;
pub mod clock;
pub mod coach;
pub mod copilot;
pub mod reminders;
pub mod school;
pub mod study_tools;

// Cross-cutting ports
pub mod auth_ports;
pub mod health_ports;
pub mod llm_ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use access::ports::AccessRepository;
pub use access::AccessService;
pub use auth_ports::{AuthenticatedUser, Authenticator};
pub use calendar::ports::{GoogleCalendarApi, GoogleTokenRepository};
pub use calendar::{CalendarError, CalendarService};
pub use clock::{Clock, FixedClock, SystemClock};
pub use coach::CoachService;
pub use copilot::ports::StudyRepository;
pub use copilot::{CopilotService, ToolExecutor};
pub use health_ports::HealthCheck;
pub use llm_ports::ChatModel;
pub use reminders::ports::ReminderRepository;
pub use reminders::ReminderService;
pub use school::ports::AccessCodeRepository;
pub use school::{AccessCodeOutcome, AccessCodeService};
pub use study_tools::{StudyToolError, StudyToolsService};
