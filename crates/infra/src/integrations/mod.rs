//! External service integrations

pub mod google_calendar;
pub mod llm;
pub mod supabase;

pub use google_calendar::GoogleCalendarClient;
pub use llm::GatewayClient;
pub use supabase::SupabaseAuthClient;
