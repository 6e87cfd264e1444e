use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skoo_domain::{AccessCode, ExpectedStudent, Result};
use uuid::Uuid;

#[async_trait]
pub trait AccessCodeRepository: Send + Sync {
    /// Active code matching `code` exactly that has no expiry or expires after `now`.
    async fn find_active_code(&self, code: &str, now: DateTime<Utc>) -> Result<Option<AccessCode>>;

    /// Expected-student row for the school, matching `email` case-insensitively.
    async fn find_expected_student(
        &self,
        school_id: Uuid,
        email: &str,
    ) -> Result<Option<ExpectedStudent>>;
}
