//! School access codes and expected-student rosters

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skoo_core::AccessCodeRepository;
use skoo_domain::{AccessCode, ExpectedStudent, Result};
use tokio_postgres::Row;
use uuid::Uuid;

use super::manager::PgManager;
use super::rows::column;
use crate::errors::db_error;

pub struct PgAccessCodeRepository {
    db: Arc<PgManager>,
}

impl PgAccessCodeRepository {
    pub fn new(db: Arc<PgManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccessCodeRepository for PgAccessCodeRepository {
    async fn find_active_code(&self, code: &str, now: DateTime<Utc>) -> Result<Option<AccessCode>> {
        let row = self
            .db
            .client()
            .await?
            .query_opt(
                "SELECT id, school_id, current_uses, max_uses, is_active, expires_at
                 FROM access_codes
                 WHERE code = $1 AND is_active = true
                   AND (expires_at IS NULL OR expires_at > $2)
                 LIMIT 1",
                &[&code, &now],
            )
            .await
            .map_err(db_error)?;

        row.as_ref().map(map_access_code).transpose()
    }

    async fn find_expected_student(
        &self,
        school_id: Uuid,
        email: &str,
    ) -> Result<Option<ExpectedStudent>> {
        let row = self
            .db
            .client()
            .await?
            .query_opt(
                "SELECT id, is_registered
                 FROM school_expected_students
                 WHERE school_id = $1 AND lower(email) = lower($2)
                 LIMIT 1",
                &[&school_id, &email],
            )
            .await
            .map_err(db_error)?;

        row.as_ref().map(map_expected_student).transpose()
    }
}

fn map_access_code(row: &Row) -> Result<AccessCode> {
    let is_active: Option<bool> = column(row, "is_active")?;
    Ok(AccessCode {
        id: column(row, "id")?,
        school_id: column(row, "school_id")?,
        current_uses: column(row, "current_uses")?,
        max_uses: column(row, "max_uses")?,
        is_active: is_active.unwrap_or(false),
        expires_at: column(row, "expires_at")?,
    })
}

fn map_expected_student(row: &Row) -> Result<ExpectedStudent> {
    let is_registered: Option<bool> = column(row, "is_registered")?;
    Ok(ExpectedStudent {
        id: column(row, "id")?,
        is_registered: is_registered.unwrap_or(false),
    })
}
