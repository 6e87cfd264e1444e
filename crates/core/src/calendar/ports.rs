//! Port interfaces for Google Calendar

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skoo_domain::{GoogleEvent, GoogleTokens, Result, TokenGrant};
use uuid::Uuid;

/// Per-user OAuth token storage (one row per user)
#[async_trait]
pub trait GoogleTokenRepository: Send + Sync {
    async fn upsert_tokens(&self, tokens: &GoogleTokens) -> Result<()>;

    async fn find_tokens(&self, user_id: Uuid) -> Result<Option<GoogleTokens>>;

    async fn update_access_token(
        &self,
        user_id: Uuid,
        access_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    async fn delete_tokens(&self, user_id: Uuid) -> Result<()>;
}

/// Google OAuth and Calendar API
#[async_trait]
pub trait GoogleCalendarApi: Send + Sync {
    /// Consent URL requesting offline read-only calendar access.
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String>;

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenGrant>;

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenGrant>;

    /// All events of the primary calendar in the window, across every page.
    async fn list_events(
        &self,
        access_token: &str,
        time_min: &str,
        time_max: &str,
    ) -> Result<Vec<GoogleEvent>>;
}
