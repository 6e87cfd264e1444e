//! Reminder sweep service

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use skoo_domain::constants::{EXAM_REMINDER_DAYS, SESSION_REMINDER_LEAD_MINUTES};
use skoo_domain::{
    ExamReminderReport, NewNotification, NotificationKind, Result, SessionReminderReport,
    UpcomingExam, UpcomingSession,
};
use tracing::{debug, info, instrument, warn};

use super::ports::ReminderRepository;
use crate::clock::Clock;

const DEFAULT_SUBJECT_NAME: &str = "Révision";
const CONTINUOUS_ASSESSMENT: &str = "Contrôle continu";

pub struct ReminderService {
    repository: Arc<dyn ReminderRepository>,
    clock: Arc<dyn Clock>,
}

impl ReminderService {
    pub fn new(repository: Arc<dyn ReminderRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Notify users whose planned session starts in about 15 minutes.
    ///
    /// The window is one minute wide so a sweep every minute covers each
    /// session once; existing reminders for a session are not duplicated.
    #[instrument(skip(self))]
    pub async fn send_session_reminders(&self) -> Result<SessionReminderReport> {
        let now = self.clock.now().naive_utc();
        let from = now + Duration::minutes(SESSION_REMINDER_LEAD_MINUTES);
        let to = from + Duration::minutes(1);

        let sessions = self.repository.planned_sessions_starting_between(from, to).await?;
        debug!(%from, %to, found = sessions.len(), "checked upcoming sessions");

        let mut notifications = Vec::new();
        for session in &sessions {
            if self.repository.session_reminder_exists(session.user_id, session.id).await? {
                debug!(session_id = %session.id, "session reminder already sent");
                continue;
            }
            notifications.push(session_notification(session));
        }

        if !notifications.is_empty() {
            self.repository.insert_notifications(&notifications).await?;
        }

        info!(
            reminders_sent = notifications.len(),
            sessions_checked = sessions.len(),
            "session reminder sweep finished"
        );
        Ok(SessionReminderReport {
            success: true,
            reminders_sent: notifications.len(),
            sessions_checked: sessions.len(),
        })
    }

    /// Notify users 7, 3 and 1 days before each exam, once per day.
    ///
    /// Lookup or insert failures for one target are logged and skipped.
    #[instrument(skip(self))]
    pub async fn send_exam_reminders(&self) -> Result<ExamReminderReport> {
        let today = self.clock.today();
        let mut sent = 0;

        for days in EXAM_REMINDER_DAYS {
            let date = today + Duration::days(days);
            let exams = match self.repository.exams_on(date).await {
                Ok(exams) => exams,
                Err(err) => {
                    warn!(days, error = %err, "failed to load exams");
                    continue;
                }
            };
            debug!(days, %date, found = exams.len(), "checked exams");

            for exam in &exams {
                let exists = self
                    .repository
                    .exam_reminder_exists(exam.user_id, exam.subject_id, days, today)
                    .await
                    .unwrap_or(false);
                if exists {
                    debug!(subject = %exam.name, days, "exam reminder already sent today");
                    continue;
                }

                match self.repository.insert_notifications(&[exam_notification(exam, days)]).await {
                    Ok(_) => sent += 1,
                    Err(err) => warn!(subject_id = %exam.subject_id, error = %err, "failed to insert exam reminder"),
                }
            }
        }

        info!(notifications_sent = sent, "exam reminder sweep finished");
        Ok(ExamReminderReport { success: true, notifications_sent: sent })
    }
}

fn session_notification(session: &UpcomingSession) -> NewNotification {
    let subject_name = session
        .subject_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_SUBJECT_NAME);

    NewNotification {
        user_id: session.user_id,
        kind: NotificationKind::SessionReminder,
        title: "Session dans 15 minutes".to_string(),
        message: format!("Ta session de {subject_name} commence bientôt !"),
        link: "/app".to_string(),
        metadata: json!({ "session_id": session.id, "subject_name": subject_name }),
    }
}

pub(crate) fn exam_notification(exam: &UpcomingExam, days: i64) -> NewNotification {
    let label = if days == 1 { "demain".to_string() } else { format!("dans {days} jours") };
    let title =
        if days == 1 { "⚠️ Examen demain !".to_string() } else { format!("📚 Examen {label}") };
    let exam_type = match exam.exam_type.as_deref() {
        Some(CONTINUOUS_ASSESSMENT) => " (CC)".to_string(),
        Some(t) if !t.is_empty() => format!(" ({t})"),
        _ => String::new(),
    };

    NewNotification {
        user_id: exam.user_id,
        kind: NotificationKind::ExamReminder,
        title,
        message: format!("{}{exam_type} est {label}. Courage !", exam.name),
        link: "/subjects".to_string(),
        metadata: json!({
            "subject_id": exam.subject_id,
            "subject_name": exam.name,
            "days_before": days,
            "exam_date": exam.exam_date.format("%Y-%m-%d").to_string(),
        }),
    }
}
