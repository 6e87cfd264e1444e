//! School access-code validation

mod support;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skoo_core::{AccessCodeOutcome, AccessCodeRepository, AccessCodeService, FixedClock};
use skoo_domain::{AccessCode, AccessCodeRequest, ExpectedStudent, Result, SkooError};
use uuid::Uuid;

#[derive(Default, Clone)]
struct FakeCodes {
    code: Option<AccessCode>,
    student: Option<ExpectedStudent>,
    broken: bool,
    lookups: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl AccessCodeRepository for FakeCodes {
    async fn find_active_code(&self, code: &str, _now: DateTime<Utc>) -> Result<Option<AccessCode>> {
        if self.broken {
            return Err(SkooError::Database("connection closed".into()));
        }
        self.lookups.lock().unwrap().push(("code".into(), code.to_string()));
        Ok(self.code.clone())
    }

    async fn find_expected_student(
        &self,
        _school_id: Uuid,
        email: &str,
    ) -> Result<Option<ExpectedStudent>> {
        self.lookups.lock().unwrap().push(("email".into(), email.to_string()));
        Ok(self.student.clone())
    }
}

fn active_code(current_uses: Option<i32>, max_uses: Option<i32>) -> AccessCode {
    AccessCode {
        id: Uuid::new_v4(),
        school_id: Uuid::new_v4(),
        current_uses,
        max_uses,
        is_active: true,
        expires_at: None,
    }
}

fn request(code: &str, email: &str) -> AccessCodeRequest {
    AccessCodeRequest { code: Some(code.into()), email: Some(email.into()) }
}

async fn validate(repo: &FakeCodes, req: AccessCodeRequest) -> AccessCodeOutcome {
    AccessCodeService::new(Arc::new(repo.clone()), Arc::new(FixedClock::new(support::fixed_now())))
        .validate(&req)
        .await
}

#[tokio::test]
async fn normalizes_code_and_email_before_lookup() {
    let repo = FakeCodes {
        code: Some(active_code(Some(3), Some(10))),
        student: Some(ExpectedStudent { id: Uuid::new_v4(), is_registered: false }),
        ..FakeCodes::default()
    };

    let outcome = validate(&repo, request("  ecole-2025 ", " Lea@Ecole.FR ")).await;

    assert_eq!(outcome, AccessCodeOutcome::Accepted);
    assert_eq!(
        repo.lookups.lock().unwrap().as_slice(),
        [("code".to_string(), "ECOLE-2025".to_string()), ("email".to_string(), "lea@ecole.fr".to_string())]
    );
}

#[tokio::test]
async fn malformed_input_is_rejected_before_the_store() {
    let repo = FakeCodes::default();

    let empty = validate(&repo, request("   ", "lea@ecole.fr")).await;
    assert!(matches!(&empty, AccessCodeOutcome::Malformed(v) if v.error.as_deref() == Some("Code école invalide")));

    let long = validate(&repo, request(&"X".repeat(65), "lea@ecole.fr")).await;
    assert!(matches!(long, AccessCodeOutcome::Malformed(_)));

    let email = validate(&repo, request("CODE", "pas-un-email")).await;
    assert!(matches!(&email, AccessCodeOutcome::Malformed(v) if v.title.as_deref() == Some("Email invalide")));

    assert!(repo.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn business_rules_reject_with_french_messages() {
    let unknown = validate(&FakeCodes::default(), request("CODE", "lea@ecole.fr")).await;
    assert_eq!(unknown.verdict().error.as_deref(), Some("Code école invalide ou expiré"));

    let exhausted = FakeCodes { code: Some(active_code(Some(10), Some(10))), ..FakeCodes::default() };
    let outcome = validate(&exhausted, request("CODE", "lea@ecole.fr")).await;
    assert!(matches!(&outcome, AccessCodeOutcome::Rejected(v) if v.title.as_deref() == Some("Code expiré")));

    let not_listed = FakeCodes { code: Some(active_code(None, Some(1))), ..FakeCodes::default() };
    let outcome = validate(&not_listed, request("CODE", "lea@ecole.fr")).await;
    assert_eq!(outcome.verdict().title.as_deref(), Some("Email non autorisé"));

    let registered = FakeCodes {
        code: Some(active_code(None, None)),
        student: Some(ExpectedStudent { id: Uuid::new_v4(), is_registered: true }),
        ..FakeCodes::default()
    };
    let outcome = validate(&registered, request("CODE", "lea@ecole.fr")).await;
    assert_eq!(outcome.verdict().title.as_deref(), Some("Email déjà utilisé"));
    assert!(!outcome.verdict().ok);
}

#[tokio::test]
async fn store_failure_is_unavailable() {
    let repo = FakeCodes { broken: true, ..FakeCodes::default() };
    let outcome = validate(&repo, request("CODE", "lea@ecole.fr")).await;
    assert!(matches!(outcome, AccessCodeOutcome::Unavailable(_)));
}
