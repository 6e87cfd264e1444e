//! Google Calendar token lifecycle

mod support;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use skoo_core::testing::MemoryTokens;
use skoo_core::{CalendarError, CalendarService, FixedClock, GoogleCalendarApi, GoogleTokenRepository};
use skoo_domain::{EventTime, GoogleEvent, GoogleTokens, Result, SkooError, TokenGrant};
use uuid::Uuid;

#[derive(Default, Clone)]
struct FakeGoogle {
    refresh_fails: bool,
    seen_tokens: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl GoogleCalendarApi for FakeGoogle {
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String> {
        Ok(format!("https://accounts.example/auth?redirect_uri={redirect_uri}&state={state}"))
    }

    async fn exchange_code(&self, code: &str, _redirect_uri: &str) -> Result<TokenGrant> {
        if code == "bad" {
            return Err(SkooError::Upstream("invalid_grant".into()));
        }
        Ok(TokenGrant { access_token: "access-1".into(), refresh_token: None, expires_in: 3600 })
    }

    async fn refresh_access_token(&self, _refresh_token: &str) -> Result<TokenGrant> {
        if self.refresh_fails {
            return Err(SkooError::Upstream("invalid_grant".into()));
        }
        Ok(TokenGrant { access_token: "access-2".into(), refresh_token: None, expires_in: 3600 })
    }

    async fn list_events(
        &self,
        access_token: &str,
        _time_min: &str,
        _time_max: &str,
    ) -> Result<Vec<GoogleEvent>> {
        self.seen_tokens.lock().unwrap().push(access_token.to_string());
        Ok(vec![
            GoogleEvent {
                id: "evt-1".into(),
                summary: Some("Cours de droit".into()),
                location: None,
                start: Some(EventTime { date_time: Some("2025-03-12T10:00:00+01:00".into()), date: None }),
                end: Some(EventTime { date_time: Some("2025-03-12T12:00:00+01:00".into()), date: None }),
            },
            GoogleEvent { id: "evt-2".into(), ..GoogleEvent::default() },
        ])
    }
}

fn service(tokens: &MemoryTokens, google: &FakeGoogle) -> CalendarService {
    CalendarService::new(
        Arc::new(tokens.clone()),
        Arc::new(google.clone()),
        Arc::new(FixedClock::new(support::fixed_now())),
    )
}

#[tokio::test]
async fn connect_stores_tokens_with_expiry() {
    let tokens = MemoryTokens::default();
    let google = FakeGoogle::default();
    let user = Uuid::new_v4();
    let svc = service(&tokens, &google);

    assert!(!svc.is_connected(user).await.unwrap());
    svc.connect(user, "code-123", "https://app.example/callback").await.unwrap();

    let stored = tokens.get(user).unwrap();
    assert_eq!(stored.access_token, "access-1");
    assert_eq!(stored.refresh_token, "");
    assert_eq!(stored.expires_at, support::fixed_now() + Duration::seconds(3600));
    assert!(svc.is_connected(user).await.unwrap());

    svc.disconnect(user).await.unwrap();
    assert!(!svc.is_connected(user).await.unwrap());
}

#[tokio::test]
async fn failed_code_exchange_is_reported() {
    let tokens = MemoryTokens::default();
    let svc = service(&tokens, &FakeGoogle::default());

    let err = svc.connect(Uuid::new_v4(), "bad", "https://app.example/cb").await.unwrap_err();
    assert!(matches!(err, CalendarError::TokenExchange(_)));
    assert_eq!(err.to_string(), "Failed to exchange code for tokens");
}

#[tokio::test]
async fn events_require_a_connection() {
    let svc = service(&MemoryTokens::default(), &FakeGoogle::default());
    let err = svc.events(Uuid::new_v4(), "a", "b").await.unwrap_err();
    assert!(matches!(err, CalendarError::NotConnected));
}

#[tokio::test]
async fn expired_token_is_refreshed_before_listing() {
    let tokens = MemoryTokens::default();
    let google = FakeGoogle::default();
    let user = Uuid::new_v4();
    tokens
        .upsert_tokens(&GoogleTokens {
            user_id: user,
            access_token: "stale".into(),
            refresh_token: "refresh".into(),
            expires_at: support::fixed_now() - Duration::minutes(1),
        })
        .await
        .unwrap();

    let events = service(&tokens, &google)
        .events(user, "2025-03-10T00:00:00Z", "2025-03-17T00:00:00Z")
        .await
        .unwrap();

    assert_eq!(google.seen_tokens.lock().unwrap().as_slice(), ["access-2".to_string()]);
    assert_eq!(tokens.get(user).unwrap().access_token, "access-2");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Cours de droit");
    assert!(!events[0].is_all_day);
    assert_eq!(events[0].google_event_id, "evt-1");
}

#[tokio::test]
async fn failed_refresh_drops_tokens() {
    let tokens = MemoryTokens::default();
    let google = FakeGoogle { refresh_fails: true, ..FakeGoogle::default() };
    let user = Uuid::new_v4();
    tokens
        .upsert_tokens(&GoogleTokens {
            user_id: user,
            access_token: "stale".into(),
            refresh_token: "revoked".into(),
            expires_at: support::fixed_now(),
        })
        .await
        .unwrap();

    let err = service(&tokens, &google).events(user, "a", "b").await.unwrap_err();

    assert!(matches!(err, CalendarError::ReconnectRequired));
    assert_eq!(err.to_string(), "Token expired, please reconnect");
    assert!(tokens.get(user).is_none());
    assert!(google.seen_tokens.lock().unwrap().is_empty());
}
