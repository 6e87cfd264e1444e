//! Shared harness for router tests.
//!
//! Builds an [`AppContext`] over in-memory ports and drives the router with
//! `tower::ServiceExt::oneshot`, so no socket, database or gateway is needed.
//! Store, model and token fakes come from `skoo_core::testing`; the ports
//! only the router needs are in [`ports`].

#![allow(dead_code)]

pub mod ports;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use skoo_api::{router, AppContext, Ports};
use skoo_core::testing::{InMemoryStore, MemoryTokens, ScriptedChatModel};
use skoo_core::{FixedClock, GoogleCalendarApi};
use skoo_domain::{
    BillingConfig, Config, CopilotConfig, DatabaseConfig, LlmConfig, ServerConfig, SupabaseConfig,
};
use tower::ServiceExt;
use uuid::Uuid;

use ports::{FakeGoogle, StaticAuthenticator, StubAccess, StubAccessCodes, StubDatabase};

pub const VALID_TOKEN: &str = "token-alice";

/// Wednesday 2025-03-12 08:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 12, 8, 0, 0).unwrap()
}

pub fn alice() -> Uuid {
    Uuid::parse_str("5b0c8a2e-0000-4000-8000-00000000a11c").unwrap()
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig::default(),
        database: DatabaseConfig { url: "postgres://localhost/skoo_test".into(), tls: false },
        llm: LlmConfig {
            api_url: "http://127.0.0.1:9/v1/chat/completions".into(),
            api_key: "test-key".into(),
            model: "test-model".into(),
            timeout_seconds: 5,
        },
        supabase: SupabaseConfig {
            url: "http://127.0.0.1:9".into(),
            anon_key: "anon".into(),
        },
        google: None,
        copilot: CopilotConfig::default(),
        billing: BillingConfig { major_product_id: Some("prod_major".into()) },
    }
}

/// Every fake behind the router, kept so tests can script and inspect them.
#[derive(Clone)]
pub struct TestApp {
    pub model: ScriptedChatModel,
    /// Backs both the study and the reminder ports.
    pub study: InMemoryStore,
    pub tokens: MemoryTokens,
    pub google: FakeGoogle,
    pub access_codes: StubAccessCodes,
    pub access: StubAccess,
    pub database: StubDatabase,
    pub config: Config,
    pub with_google: bool,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            model: ScriptedChatModel::new(),
            study: InMemoryStore::new(),
            tokens: MemoryTokens::new(),
            google: FakeGoogle::new(),
            access_codes: StubAccessCodes::new(),
            access: StubAccess::new(),
            database: StubDatabase::new(),
            config: test_config(),
            with_google: true,
        }
    }

    pub fn without_google(mut self) -> Self {
        self.with_google = false;
        self
    }

    pub fn router(&self) -> Router {
        let google: Option<Arc<dyn GoogleCalendarApi>> =
            if self.with_google { Some(Arc::new(self.google.clone())) } else { None };

        let ports = Ports {
            study: Arc::new(self.study.clone()),
            reminders: Arc::new(self.study.clone()),
            google_tokens: Arc::new(self.tokens.clone()),
            google,
            access_codes: Arc::new(self.access_codes.clone()),
            access: Arc::new(self.access.clone()),
            authenticator: Arc::new(StaticAuthenticator::new(VALID_TOKEN, alice())),
            model: Arc::new(self.model.clone()),
            database: Arc::new(self.database.clone()),
            clock: Arc::new(FixedClock::new(fixed_now())),
        };

        router(Arc::new(AppContext::from_ports(&self.config, ports)))
    }

    /// Send one request and decode the JSON answer (`Value::Null` if empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json response")
        };
        (status, body)
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder =
        Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}
