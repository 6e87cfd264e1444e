//! Google OAuth and Calendar API integration

pub mod client;

pub use client::GoogleCalendarClient;
