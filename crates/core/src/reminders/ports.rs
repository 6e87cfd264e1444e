//! Port interfaces for reminder sweeps
//!
//! Sweeps run across all users, so these queries are not user-scoped.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use skoo_domain::{NewNotification, Result, UpcomingExam, UpcomingSession};
use uuid::Uuid;

#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// Planned sessions whose start (`date + start_time`) is in `[from, to)`.
    async fn planned_sessions_starting_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<UpcomingSession>>;

    /// Whether a session reminder already references `session_id`.
    async fn session_reminder_exists(&self, user_id: Uuid, session_id: Uuid) -> Result<bool>;

    /// Active subjects with an exam on `date`.
    async fn exams_on(&self, date: NaiveDate) -> Result<Vec<UpcomingExam>>;

    /// Whether an exam reminder for (`subject_id`, `days_before`) was created
    /// on or after `since`.
    async fn exam_reminder_exists(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        days_before: i64,
        since: NaiveDate,
    ) -> Result<bool>;

    /// Insert notifications, returning how many rows were written.
    async fn insert_notifications(&self, notifications: &[NewNotification]) -> Result<usize>;
}
