//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// LLM gateway
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-3-flash-preview";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_COPILOT_MODEL: &str = "google/gemini-3-flash-preview";
pub const DEFAULT_COPILOT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_COPILOT_MAX_ROUNDS: usize = 5;

// User-facing copilot messages
pub const COPILOT_FALLBACK_REPLY: &str = "Désolé, j'ai eu un problème. Réessaie !";
pub const RATE_LIMITED_MESSAGE: &str = "Trop de requêtes, réessaie dans quelques instants.";
pub const QUOTA_EXHAUSTED_MESSAGE: &str = "Crédits IA insuffisants.";
pub const AI_SERVICE_ERROR: &str = "AI service error";

// Coach
pub const COACH_DEFAULT_MESSAGE: &str = "Continue comme ça !";
pub const COACH_MAX_TOKENS: u32 = 100;
pub const COACH_TEMPERATURE: f32 = 0.8;

// Subscription
pub const TRIAL_DURATION_DAYS: i64 = 7;

// Reminders
pub const SESSION_REMINDER_LEAD_MINUTES: i64 = 15;
pub const EXAM_REMINDER_DAYS: [i64; 3] = [7, 3, 1];

// Google Calendar
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";
pub const GOOGLE_CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";
pub const GOOGLE_EVENTS_PAGE_SIZE: u32 = 250;
pub const UNTITLED_EVENT: &str = "Sans titre";

// Access codes
pub const MAX_ACCESS_CODE_LENGTH: usize = 64;
pub const MAX_EMAIL_LENGTH: usize = 254;
