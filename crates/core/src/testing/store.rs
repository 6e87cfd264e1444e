use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use skoo_domain::{
    CreatedDeck, NewFlashcardDeck, NewNotification, NewRevisionSession, NewTask,
    NotificationKind, Result, RevisionSession, SessionStatus, SkooError, Subject, Task,
    TaskStatus, UpcomingExam, UpcomingSession,
};
use uuid::Uuid;

use crate::{ReminderRepository, StudyRepository};

#[derive(Default)]
struct State {
    subjects: Vec<Subject>,
    sessions: Vec<RevisionSession>,
    tasks: Vec<Task>,
    decks: Vec<(Uuid, Uuid, NewFlashcardDeck)>,
    notifications: Vec<NewNotification>,
}

/// Study and reminder store holding rows in memory.
///
/// Mirrors the user scoping of the Postgres repositories: sessions and
/// subjects of another user are invisible and report `NotFound`.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    fail_writes: Arc<Mutex<bool>>,
    offline: Arc<Mutex<bool>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_subject(&self, user_id: Uuid, name: &str) -> Uuid {
        self.add_subject_with_exam(user_id, name, None, None)
    }

    pub fn add_subject_with_exam(
        &self,
        user_id: Uuid,
        name: &str,
        exam_date: Option<NaiveDate>,
        exam_type: Option<&str>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().subjects.push(Subject {
            id,
            user_id,
            name: name.to_string(),
            coefficient: Some(2.0),
            exam_date,
            exam_type: exam_type.map(str::to_string),
            status: "active".to_string(),
        });
        id
    }

    pub fn add_session(&self, session: RevisionSession) {
        self.state.lock().unwrap().sessions.push(session);
    }

    /// Make every write fail with a database error.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    /// Make every call, reads included, fail as if the database went away.
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    pub fn sessions(&self) -> Vec<RevisionSession> {
        self.state.lock().unwrap().sessions.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn deck_count(&self) -> usize {
        self.state.lock().unwrap().decks.len()
    }

    pub fn notifications(&self) -> Vec<NewNotification> {
        self.state.lock().unwrap().notifications.clone()
    }

    fn check_online(&self) -> Result<()> {
        if *self.offline.lock().unwrap() {
            return Err(SkooError::Database("connection closed".into()));
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        self.check_online()?;
        if *self.fail_writes.lock().unwrap() {
            return Err(SkooError::Database("write rejected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl StudyRepository for InMemoryStore {
    async fn create_revision_session(
        &self,
        user_id: Uuid,
        session: NewRevisionSession,
    ) -> Result<RevisionSession> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let subject = state
            .subjects
            .iter()
            .find(|s| s.id == session.subject_id && s.user_id == user_id)
            .cloned()
            .ok_or_else(|| SkooError::NotFound(format!("subject {}", session.subject_id)))?;

        let row = RevisionSession {
            id: Uuid::new_v4(),
            user_id,
            subject_id: subject.id,
            subject_name: Some(subject.name),
            date: session.date,
            start_time: session.start_time,
            end_time: session.end_time,
            notes: session.notes,
            status: SessionStatus::Planned,
        };
        state.sessions.push(row.clone());
        Ok(row)
    }

    async fn update_session_status(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        status: SessionStatus,
    ) -> Result<()> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id && s.user_id == user_id)
            .ok_or_else(|| SkooError::NotFound(format!("session {session_id}")))?;
        session.status = status;
        Ok(())
    }

    async fn create_task(&self, user_id: Uuid, task: NewTask) -> Result<Task> {
        self.check_writable()?;
        let row = Task {
            id: Uuid::new_v4(),
            user_id,
            title: task.title,
            description: task.description,
            subject_id: task.subject_id,
            priority: task.priority,
            due_date: task.due_date,
            status: TaskStatus::Todo,
        };
        self.state.lock().unwrap().tasks.push(row.clone());
        Ok(row)
    }

    async fn sessions_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<RevisionSession>> {
        self.check_online()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.date >= from)
            .cloned()
            .collect())
    }

    async fn create_flashcard_deck(
        &self,
        user_id: Uuid,
        deck: NewFlashcardDeck,
    ) -> Result<CreatedDeck> {
        self.check_writable()?;
        let deck_id = Uuid::new_v4();
        let cards_count = deck.cards.len();
        self.state.lock().unwrap().decks.push((deck_id, user_id, deck));
        Ok(CreatedDeck { deck_id, cards_count })
    }
}

#[async_trait]
impl ReminderRepository for InMemoryStore {
    async fn planned_sessions_starting_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<UpcomingSession>> {
        self.check_online()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Planned)
            .filter(|s| {
                let start = s.date.and_time(s.start_time);
                start >= from && start < to
            })
            .map(|s| UpcomingSession {
                id: s.id,
                user_id: s.user_id,
                start_time: s.start_time,
                subject_name: s.subject_name.clone(),
            })
            .collect())
    }

    async fn session_reminder_exists(&self, user_id: Uuid, session_id: Uuid) -> Result<bool> {
        self.check_online()?;
        let id = session_id.to_string();
        Ok(self.state.lock().unwrap().notifications.iter().any(|n| {
            n.user_id == user_id
                && n.kind == NotificationKind::SessionReminder
                && n.metadata["session_id"] == id.as_str()
        }))
    }

    async fn exams_on(&self, date: NaiveDate) -> Result<Vec<UpcomingExam>> {
        self.check_online()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .subjects
            .iter()
            .filter(|s| s.exam_date == Some(date) && s.status == "active")
            .map(|s| UpcomingExam {
                subject_id: s.id,
                user_id: s.user_id,
                name: s.name.clone(),
                exam_type: s.exam_type.clone(),
                exam_date: date,
            })
            .collect())
    }

    async fn exam_reminder_exists(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        days_before: i64,
        _since: NaiveDate,
    ) -> Result<bool> {
        self.check_online()?;
        let id = subject_id.to_string();
        Ok(self.state.lock().unwrap().notifications.iter().any(|n| {
            n.user_id == user_id
                && n.kind == NotificationKind::ExamReminder
                && n.metadata["subject_id"] == id.as_str()
                && n.metadata["days_before"] == days_before
        }))
    }

    async fn insert_notifications(&self, notifications: &[NewNotification]) -> Result<usize> {
        self.check_writable()?;
        self.state.lock().unwrap().notifications.extend_from_slice(notifications);
        Ok(notifications.len())
    }
}
