//! Reminder sweep queries over sessions, subjects and notifications

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use skoo_core::ReminderRepository;
use skoo_domain::{NewNotification, Result, UpcomingExam, UpcomingSession};
use tokio_postgres::Row;
use tracing::debug;
use uuid::Uuid;

use super::manager::PgManager;
use super::rows::column;
use crate::errors::db_error;

pub struct PgReminderRepository {
    db: Arc<PgManager>,
}

impl PgReminderRepository {
    pub fn new(db: Arc<PgManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReminderRepository for PgReminderRepository {
    async fn planned_sessions_starting_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<UpcomingSession>> {
        let rows = self
            .db
            .client()
            .await?
            .query(
                "SELECT rs.id, rs.user_id, rs.start_time, s.name AS subject_name
                 FROM revision_sessions rs
                 LEFT JOIN subjects s ON s.id = rs.subject_id
                 WHERE rs.status = 'planned'
                   AND rs.date + rs.start_time >= $1
                   AND rs.date + rs.start_time < $2",
                &[&from, &to],
            )
            .await
            .map_err(db_error)?;

        rows.iter().map(map_upcoming_session).collect()
    }

    async fn session_reminder_exists(&self, user_id: Uuid, session_id: Uuid) -> Result<bool> {
        let row = self
            .db
            .client()
            .await?
            .query_one(
                "SELECT EXISTS (
                     SELECT 1 FROM notifications
                     WHERE user_id = $1
                       AND type = 'session_reminder'
                       AND metadata->>'session_id' = $2
                 )",
                &[&user_id, &session_id.to_string()],
            )
            .await
            .map_err(db_error)?;
        row.try_get(0).map_err(db_error)
    }

    async fn exams_on(&self, date: NaiveDate) -> Result<Vec<UpcomingExam>> {
        let rows = self
            .db
            .client()
            .await?
            .query(
                "SELECT id, user_id, name, exam_type, exam_date
                 FROM subjects
                 WHERE exam_date = $1 AND status = 'active'",
                &[&date],
            )
            .await
            .map_err(db_error)?;

        rows.iter().map(map_upcoming_exam).collect()
    }

    async fn exam_reminder_exists(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        days_before: i64,
        since: NaiveDate,
    ) -> Result<bool> {
        let row = self
            .db
            .client()
            .await?
            .query_one(
                "SELECT EXISTS (
                     SELECT 1 FROM notifications
                     WHERE user_id = $1
                       AND type = 'exam_reminder'
                       AND metadata->>'subject_id' = $2
                       AND (metadata->>'days_before')::int8 = $3
                       AND created_at::date >= $4
                 )",
                &[&user_id, &subject_id.to_string(), &days_before, &since],
            )
            .await
            .map_err(db_error)?;
        row.try_get(0).map_err(db_error)
    }

    async fn insert_notifications(&self, notifications: &[NewNotification]) -> Result<usize> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let user_ids: Vec<Uuid> = notifications.iter().map(|n| n.user_id).collect();
        let kinds: Vec<&str> = notifications.iter().map(|n| n.kind.as_str()).collect();
        let titles: Vec<&str> = notifications.iter().map(|n| n.title.as_str()).collect();
        let messages: Vec<&str> = notifications.iter().map(|n| n.message.as_str()).collect();
        let links: Vec<&str> = notifications.iter().map(|n| n.link.as_str()).collect();
        let metadata: Vec<Value> = notifications.iter().map(|n| n.metadata.clone()).collect();

        let inserted = self
            .db
            .client()
            .await?
            .execute(
                "INSERT INTO notifications (user_id, type, title, message, link, metadata)
                 SELECT * FROM UNNEST($1::uuid[], $2::text[], $3::text[], $4::text[], $5::text[], $6::jsonb[])",
                &[&user_ids, &kinds, &titles, &messages, &links, &metadata],
            )
            .await
            .map_err(db_error)?;

        debug!(inserted, "notifications written");
        Ok(usize::try_from(inserted).unwrap_or(notifications.len()))
    }
}

fn map_upcoming_session(row: &Row) -> Result<UpcomingSession> {
    Ok(UpcomingSession {
        id: column(row, "id")?,
        user_id: column(row, "user_id")?,
        start_time: column(row, "start_time")?,
        subject_name: column(row, "subject_name")?,
    })
}

fn map_upcoming_exam(row: &Row) -> Result<UpcomingExam> {
    Ok(UpcomingExam {
        subject_id: column(row, "id")?,
        user_id: column(row, "user_id")?,
        name: column(row, "name")?,
        exam_type: column(row, "exam_type")?,
        exam_date: column(row, "exam_date")?,
    })
}
