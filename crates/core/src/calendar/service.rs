//! Calendar connection service

use std::sync::Arc;

use chrono::Duration;
use skoo_domain::constants::UNTITLED_EVENT;
use skoo_domain::{CalendarEventView, GoogleEvent, GoogleTokens, SkooError};
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::ports::{GoogleCalendarApi, GoogleTokenRepository};
use crate::clock::Clock;

/// Calendar failures; the display strings are returned to clients as-is
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Google Calendar not connected")]
    NotConnected,

    #[error("Token expired, please reconnect")]
    ReconnectRequired,

    #[error("Failed to exchange code for tokens")]
    TokenExchange(#[source] SkooError),

    #[error("Failed to store tokens")]
    TokenStorage(#[source] SkooError),

    #[error("Failed to fetch calendar events")]
    Events(#[source] SkooError),

    #[error(transparent)]
    Store(#[from] SkooError),
}

pub struct CalendarService {
    tokens: Arc<dyn GoogleTokenRepository>,
    google: Arc<dyn GoogleCalendarApi>,
    clock: Arc<dyn Clock>,
}

impl CalendarService {
    pub fn new(
        tokens: Arc<dyn GoogleTokenRepository>,
        google: Arc<dyn GoogleCalendarApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { tokens, google, clock }
    }

    /// Consent URL carrying the user id as OAuth `state`.
    pub fn authorization_url(&self, user_id: Uuid, redirect_uri: &str) -> Result<String, CalendarError> {
        Ok(self.google.authorization_url(redirect_uri, &user_id.to_string())?)
    }

    /// Exchange an authorization code and store the tokens for the user.
    #[instrument(skip(self, code, redirect_uri))]
    pub async fn connect(
        &self,
        user_id: Uuid,
        code: &str,
        redirect_uri: &str,
    ) -> Result<(), CalendarError> {
        let grant = self
            .google
            .exchange_code(code, redirect_uri)
            .await
            .map_err(CalendarError::TokenExchange)?;

        let tokens = GoogleTokens {
            user_id,
            access_token: grant.access_token,
            refresh_token: grant.refresh_token.unwrap_or_default(),
            expires_at: self.clock.now() + Duration::seconds(grant.expires_in),
        };
        self.tokens.upsert_tokens(&tokens).await.map_err(CalendarError::TokenStorage)?;

        info!("google calendar connected");
        Ok(())
    }

    pub async fn is_connected(&self, user_id: Uuid) -> Result<bool, CalendarError> {
        Ok(self.tokens.find_tokens(user_id).await?.is_some())
    }

    pub async fn disconnect(&self, user_id: Uuid) -> Result<(), CalendarError> {
        self.tokens.delete_tokens(user_id).await?;
        info!(%user_id, "google calendar disconnected");
        Ok(())
    }

    /// Events between `time_min` and `time_max` (RFC 3339), refreshing an
    /// expired access token first.
    ///
    /// A failed refresh deletes the stored tokens so the user must reconnect.
    #[instrument(skip(self))]
    pub async fn events(
        &self,
        user_id: Uuid,
        time_min: &str,
        time_max: &str,
    ) -> Result<Vec<CalendarEventView>, CalendarError> {
        let tokens = match self.tokens.find_tokens(user_id).await {
            Ok(Some(tokens)) => tokens,
            Ok(None) => return Err(CalendarError::NotConnected),
            Err(err) => {
                warn!(error = %err, "failed to load google tokens");
                return Err(CalendarError::NotConnected);
            }
        };

        let now = self.clock.now();
        let access_token = if tokens.is_expired(now) {
            self.refresh(&tokens).await?
        } else {
            tokens.access_token
        };

        let events = self
            .google
            .list_events(&access_token, time_min, time_max)
            .await
            .map_err(CalendarError::Events)?;

        Ok(events.into_iter().filter_map(to_view).collect())
    }

    async fn refresh(&self, tokens: &GoogleTokens) -> Result<String, CalendarError> {
        match self.google.refresh_access_token(&tokens.refresh_token).await {
            Ok(grant) => {
                let expires_at = self.clock.now() + Duration::seconds(grant.expires_in);
                if let Err(err) = self
                    .tokens
                    .update_access_token(tokens.user_id, &grant.access_token, expires_at)
                    .await
                {
                    warn!(error = %err, "failed to persist refreshed google token");
                }
                Ok(grant.access_token)
            }
            Err(err) => {
                warn!(error = %err, "google token refresh failed, dropping stored tokens");
                if let Err(err) = self.tokens.delete_tokens(tokens.user_id).await {
                    warn!(error = %err, "failed to delete invalid google tokens");
                }
                Err(CalendarError::ReconnectRequired)
            }
        }
    }
}

/// Events without a start are dropped.
pub(crate) fn to_view(event: GoogleEvent) -> Option<CalendarEventView> {
    let start_time = event.start?;
    let start = start_time.value()?.to_string();

    Some(CalendarEventView {
        title: event.summary.filter(|s| !s.is_empty()).unwrap_or_else(|| UNTITLED_EVENT.to_string()),
        start,
        end: event.end.as_ref().and_then(|e| e.value()).map(str::to_string),
        location: event.location,
        is_all_day: start_time.date_time.is_none(),
        google_event_id: event.id,
    })
}

#[cfg(test)]
mod tests {
    use skoo_domain::EventTime;

    use super::*;

    #[test]
    fn all_day_events_keep_their_date() {
        let view = to_view(GoogleEvent {
            id: "evt-1".into(),
            summary: None,
            location: Some("Amphi B".into()),
            start: Some(EventTime { date_time: None, date: Some("2025-03-14".into()) }),
            end: Some(EventTime { date_time: None, date: Some("2025-03-15".into()) }),
        })
        .unwrap();

        assert_eq!(view.title, "Sans titre");
        assert!(view.is_all_day);
        assert_eq!(view.start, "2025-03-14");
        assert_eq!(view.end.as_deref(), Some("2025-03-15"));
    }

    #[test]
    fn events_without_start_are_dropped() {
        assert!(to_view(GoogleEvent { id: "x".into(), ..GoogleEvent::default() }).is_none());
        assert!(to_view(GoogleEvent {
            id: "y".into(),
            start: Some(EventTime::default()),
            ..GoogleEvent::default()
        })
        .is_none());
    }
}
