//! In-app notifications produced by the reminder sweeps

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SessionReminder,
    ExamReminder,
}

impl_domain_status_conversions!(NotificationKind {
    SessionReminder => "session_reminder",
    ExamReminder => "exam_reminder",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: String,
    pub metadata: Value,
}

/// A planned session about to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: NaiveTime,
    pub subject_name: Option<String>,
}

/// An active subject whose exam falls on a reminder day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingExam {
    pub subject_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub exam_type: Option<String>,
    pub exam_date: NaiveDate,
}

/// Summary of `POST /send-session-reminders`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReminderReport {
    pub success: bool,
    pub reminders_sent: usize,
    pub sessions_checked: usize,
}

/// Summary of `POST /send-exam-reminders`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamReminderReport {
    pub success: bool,
    pub notifications_sent: usize,
}
