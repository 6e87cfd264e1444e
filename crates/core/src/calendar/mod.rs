//! Google Calendar connection lifecycle and event import

pub mod ports;
pub mod service;

pub use service::{CalendarError, CalendarService};
