//! Study planning rows: subjects, revision sessions, tasks and flashcards

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_domain_status_conversions;

/// Lifecycle of a revision session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Planned,
    Completed,
    Skipped,
}

impl_domain_status_conversions!(SessionStatus {
    Planned => "planned",
    Completed => "completed",
    Skipped => "skipped",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl_domain_status_conversions!(TaskPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl_domain_status_conversions!(TaskStatus {
    Todo => "todo",
    InProgress => "in_progress",
    Done => "done",
});

/// A subject the student is preparing an exam for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub coefficient: Option<f64>,
    pub exam_date: Option<NaiveDate>,
    pub exam_type: Option<String>,
    pub status: String,
}

/// A revision session as stored, joined with its subject name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub subject_name: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
    pub status: SessionStatus,
}

impl RevisionSession {
    /// Planned length in minutes (negative when the end precedes the start)
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Insert payload for a revision session; status is always `planned`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRevisionSession {
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub subject_id: Option<Uuid>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
}

/// Insert payload for a task; status is always `todo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: Option<Uuid>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcardDeck {
    pub name: String,
    pub subject_id: Option<Uuid>,
    pub cards: Vec<NewFlashcard>,
}

/// Result of inserting a deck and its cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDeck {
    pub deck_id: Uuid,
    pub cards_count: usize,
}

/// Reporting window for study statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyPeriod {
    Today,
    ThisWeek,
    ThisMonth,
}

impl_domain_status_conversions!(StudyPeriod {
    Today => "today",
    ThisWeek => "this_week",
    ThisMonth => "this_month",
});

impl StudyPeriod {
    /// First day included in the period (weeks start on Monday).
    pub fn start_date(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::ThisWeek => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            Self::ThisMonth => today.with_day(1).unwrap_or(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyStats {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub total_hours: f64,
    pub period: StudyPeriod,
}

impl StudyStats {
    /// Aggregates sessions already filtered to the period.
    ///
    /// Hours count completed sessions only and are rounded to one decimal.
    pub fn from_sessions(period: StudyPeriod, sessions: &[RevisionSession]) -> Self {
        let completed: Vec<&RevisionSession> =
            sessions.iter().filter(|s| s.status == SessionStatus::Completed).collect();
        let minutes: i64 = completed.iter().map(|s| s.duration_minutes()).sum();

        #[allow(clippy::cast_precision_loss)]
        let total_hours = (minutes as f64 / 60.0 * 10.0).round() / 10.0;

        Self {
            total_sessions: sessions.len(),
            completed_sessions: completed.len(),
            total_hours,
            period,
        }
    }
}
