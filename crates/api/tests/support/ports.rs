//! Router-only port fakes: auth, Google, access codes, access and health

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skoo_core::{
    AccessCodeRepository, AccessRepository, AuthenticatedUser, Authenticator, GoogleCalendarApi,
    HealthCheck,
};
use skoo_domain::{
    AccessCode, AccessProfile, ExpectedStudent, GoogleEvent, Result, SkooError,
    SubscriptionLookup, TokenGrant,
};
use uuid::Uuid;

/// Accepts exactly one token.
pub struct StaticAuthenticator {
    token: String,
    user_id: Uuid,
}

impl StaticAuthenticator {
    pub fn new(token: &str, user_id: Uuid) -> Self {
        Self { token: token.to_string(), user_id }
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        if token == self.token {
            Ok(AuthenticatedUser { id: self.user_id, email: Some("alice@example.fr".into()) })
        } else {
            Err(SkooError::Auth("invalid JWT".into()))
        }
    }
}

/// Google endpoints: code "good-code" exchanges, refresh always fails.
#[derive(Default, Clone)]
pub struct FakeGoogle {
    events: Arc<Mutex<Vec<GoogleEvent>>>,
}

impl FakeGoogle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&self, event: GoogleEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl GoogleCalendarApi for FakeGoogle {
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String> {
        Ok(format!("https://accounts.example/auth?redirect_uri={redirect_uri}&state={state}"))
    }

    async fn exchange_code(&self, code: &str, _redirect_uri: &str) -> Result<TokenGrant> {
        if code != "good-code" {
            return Err(SkooError::Upstream("google oauth returned 400: invalid_grant".into()));
        }
        Ok(TokenGrant {
            access_token: "ya29.access".into(),
            refresh_token: Some("1//refresh".into()),
            expires_in: 3600,
        })
    }

    async fn refresh_access_token(&self, _refresh_token: &str) -> Result<TokenGrant> {
        Err(SkooError::Upstream("google oauth returned 400: invalid_grant".into()))
    }

    async fn list_events(
        &self,
        _access_token: &str,
        _time_min: &str,
        _time_max: &str,
    ) -> Result<Vec<GoogleEvent>> {
        Ok(self.events.lock().unwrap().clone())
    }
}

/// One school with one code and a list of expected emails.
#[derive(Default, Clone)]
pub struct StubAccessCodes {
    codes: Arc<Mutex<HashMap<String, AccessCode>>>,
    students: Arc<Mutex<HashMap<String, ExpectedStudent>>>,
    failing: Arc<Mutex<bool>>,
}

impl StubAccessCodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_code(&self, code: &str) -> Uuid {
        let school_id = Uuid::new_v4();
        self.codes.lock().unwrap().insert(
            code.to_string(),
            AccessCode {
                id: Uuid::new_v4(),
                school_id,
                current_uses: Some(0),
                max_uses: Some(30),
                is_active: true,
                expires_at: None,
            },
        );
        school_id
    }

    pub fn expect_student(&self, email: &str, is_registered: bool) {
        self.students
            .lock()
            .unwrap()
            .insert(email.to_lowercase(), ExpectedStudent { id: Uuid::new_v4(), is_registered });
    }

    pub fn fail(&self) {
        *self.failing.lock().unwrap() = true;
    }
}

#[async_trait]
impl AccessCodeRepository for StubAccessCodes {
    async fn find_active_code(&self, code: &str, _now: DateTime<Utc>) -> Result<Option<AccessCode>> {
        if *self.failing.lock().unwrap() {
            return Err(SkooError::Database("connection closed".into()));
        }
        Ok(self.codes.lock().unwrap().get(code).cloned())
    }

    async fn find_expected_student(
        &self,
        _school_id: Uuid,
        email: &str,
    ) -> Result<Option<ExpectedStudent>> {
        Ok(self.students.lock().unwrap().get(&email.to_lowercase()).cloned())
    }
}

#[derive(Default, Clone)]
pub struct StubAccess {
    profile: Arc<Mutex<AccessProfile>>,
    subscription: Arc<Mutex<Option<SubscriptionLookup>>>,
}

impl StubAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_profile(&self, profile: AccessProfile) {
        *self.profile.lock().unwrap() = profile;
    }

    pub fn set_subscription(&self, lookup: SubscriptionLookup) {
        *self.subscription.lock().unwrap() = Some(lookup);
    }
}

#[async_trait]
impl AccessRepository for StubAccess {
    async fn access_profile(&self, _user_id: Uuid) -> Result<AccessProfile> {
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn subscription(&self, _user_id: Uuid) -> Result<SubscriptionLookup> {
        Ok(self.subscription.lock().unwrap().clone().unwrap_or(SubscriptionLookup::Inactive))
    }
}

#[derive(Default, Clone)]
pub struct StubDatabase {
    down: Arc<Mutex<bool>>,
}

impl StubDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn go_down(&self) {
        *self.down.lock().unwrap() = true;
    }
}

#[async_trait]
impl HealthCheck for StubDatabase {
    async fn ping(&self) -> Result<()> {
        if *self.down.lock().unwrap() {
            return Err(SkooError::Database("connection refused".into()));
        }
        Ok(())
    }
}
