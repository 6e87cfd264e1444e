//! Periodic reminder sweeps (upcoming sessions, exam countdowns)

pub mod ports;
pub mod service;

pub use service::ReminderService;
