//! Google Calendar client (OAuth code flow plus read-only event listing)

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use skoo_core::GoogleCalendarApi;
use skoo_domain::constants::{
    GOOGLE_AUTH_URL, GOOGLE_CALENDAR_SCOPE, GOOGLE_EVENTS_PAGE_SIZE, GOOGLE_EVENTS_URL,
    GOOGLE_TOKEN_URL,
};
use skoo_domain::{GoogleConfig, GoogleEvent, Result, SkooError, TokenGrant};
use tracing::debug;
use url::Url;

use crate::http::{decode_json, HttpClient};

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<GoogleEvent>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

/// Google OAuth/Calendar endpoints used by the client
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub events_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            events_url: GOOGLE_EVENTS_URL.to_string(),
        }
    }
}

pub struct GoogleCalendarClient {
    http_client: HttpClient,
    client_id: String,
    client_secret: String,
    endpoints: GoogleEndpoints,
}

impl GoogleCalendarClient {
    pub fn new(config: &GoogleConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            endpoints: GoogleEndpoints::default(),
        }
    }

    /// Override the Google endpoints (used against a mock server)
    pub fn with_endpoints(mut self, endpoints: GoogleEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenGrant> {
        let builder = self.http_client.request(Method::POST, &self.endpoints.token_url).form(form);
        let response = self.http_client.send(builder).await?;
        decode_json(response, "google oauth").await
    }
}

#[async_trait]
impl GoogleCalendarApi for GoogleCalendarClient {
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &self.endpoints.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", GOOGLE_CALENDAR_SCOPE),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|err| SkooError::Config(format!("invalid Google auth URL: {err}")))?;

        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenGrant> {
        self.token_request(&[
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenGrant> {
        self.token_request(&[
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .await
    }

    async fn list_events(
        &self,
        access_token: &str,
        time_min: &str,
        time_max: &str,
    ) -> Result<Vec<GoogleEvent>> {
        let page_size = GOOGLE_EVENTS_PAGE_SIZE.to_string();
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeMin", time_min),
                ("timeMax", time_max),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let builder = self
                .http_client
                .request(Method::GET, &self.endpoints.events_url)
                .bearer_auth(access_token)
                .query(&query);
            let response = self.http_client.send(builder).await?;
            let page: EventsPage = decode_json(response, "google calendar").await?;

            debug!(count = page.items.len(), "fetched calendar page");
            events.extend(page.items);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(events)
    }
}
