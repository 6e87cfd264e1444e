//! Study planning repository implementation using Postgres
//!
//! Backs the copilot tools. Every statement filters on the caller's
//! `user_id`; session creation joins the subject in the same statement so a
//! foreign subject inserts nothing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use skoo_core::StudyRepository;
use skoo_domain::{
    CreatedDeck, NewFlashcardDeck, NewRevisionSession, NewTask, Result, RevisionSession,
    SessionStatus, SkooError, Task,
};
use tokio_postgres::Row;
use tracing::debug;
use uuid::Uuid;

use super::manager::PgManager;
use super::rows::{column, enum_column};
use crate::errors::db_error;

const INSERT_SESSION_SQL: &str = "
    WITH subject AS (
        SELECT id, name FROM subjects WHERE id = $2 AND user_id = $1
    ), inserted AS (
        INSERT INTO revision_sessions (user_id, subject_id, date, start_time, end_time, notes, status)
        SELECT $1::uuid, subject.id, $3::date, $4::time, $5::time, $6::text, 'planned' FROM subject
        RETURNING id, user_id, subject_id, date, start_time, end_time, notes, status
    )
    SELECT inserted.*, subject.name AS subject_name
    FROM inserted JOIN subject ON subject.id = inserted.subject_id";

const INSERT_DECK_SQL: &str = "
    WITH deck AS (
        INSERT INTO flashcard_decks (user_id, name, subject_id)
        VALUES ($1, $2, $3)
        RETURNING id
    ), cards AS (
        INSERT INTO flashcards (deck_id, user_id, front, back)
        SELECT deck.id, $1::uuid, card.front, card.back
        FROM deck, UNNEST($4::text[], $5::text[]) AS card(front, back)
        RETURNING 1
    )
    SELECT deck.id AS deck_id, (SELECT count(*) FROM cards) AS cards_count FROM deck";

/// Postgres-backed implementation of `StudyRepository`
pub struct PgStudyRepository {
    db: Arc<PgManager>,
}

impl PgStudyRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<PgManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudyRepository for PgStudyRepository {
    async fn create_revision_session(
        &self,
        user_id: Uuid,
        session: NewRevisionSession,
    ) -> Result<RevisionSession> {
        let row = self
            .db
            .client()
            .await?
            .query_opt(
                INSERT_SESSION_SQL,
                &[
                    &user_id,
                    &session.subject_id,
                    &session.date,
                    &session.start_time,
                    &session.end_time,
                    &session.notes,
                ],
            )
            .await
            .map_err(db_error)?
            .ok_or_else(|| SkooError::NotFound(format!("subject {}", session.subject_id)))?;

        map_session_row(&row)
    }

    async fn update_session_status(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        status: SessionStatus,
    ) -> Result<()> {
        let updated = self
            .db
            .client()
            .await?
            .execute(
                "UPDATE revision_sessions SET status = $3 WHERE id = $2 AND user_id = $1",
                &[&user_id, &session_id, &status.as_str()],
            )
            .await
            .map_err(db_error)?;

        if updated == 0 {
            return Err(SkooError::NotFound(format!("session {session_id}")));
        }
        Ok(())
    }

    async fn create_task(&self, user_id: Uuid, task: NewTask) -> Result<Task> {
        let row = self
            .db
            .client()
            .await?
            .query_one(
                "INSERT INTO tasks (user_id, title, description, subject_id, priority, due_date, status)
                 VALUES ($1, $2, $3, $4, $5, $6, 'todo')
                 RETURNING id, user_id, title, description, subject_id, priority, due_date, status",
                &[
                    &user_id,
                    &task.title,
                    &task.description,
                    &task.subject_id,
                    &task.priority.as_str(),
                    &task.due_date,
                ],
            )
            .await
            .map_err(db_error)?;

        Ok(Task {
            id: column(&row, "id")?,
            user_id: column(&row, "user_id")?,
            title: column(&row, "title")?,
            description: column(&row, "description")?,
            subject_id: column(&row, "subject_id")?,
            priority: enum_column(&row, "priority")?,
            due_date: column(&row, "due_date")?,
            status: enum_column(&row, "status")?,
        })
    }

    async fn sessions_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<RevisionSession>> {
        let rows = self
            .db
            .client()
            .await?
            .query(
                "SELECT rs.id, rs.user_id, rs.subject_id, rs.date, rs.start_time, rs.end_time,
                        rs.notes, rs.status, s.name AS subject_name
                 FROM revision_sessions rs
                 LEFT JOIN subjects s ON s.id = rs.subject_id
                 WHERE rs.user_id = $1 AND rs.date >= $2
                 ORDER BY rs.date, rs.start_time",
                &[&user_id, &from],
            )
            .await
            .map_err(db_error)?;

        rows.iter().map(map_session_row).collect()
    }

    async fn create_flashcard_deck(
        &self,
        user_id: Uuid,
        deck: NewFlashcardDeck,
    ) -> Result<CreatedDeck> {
        let (fronts, backs): (Vec<String>, Vec<String>) =
            deck.cards.into_iter().map(|card| (card.front, card.back)).unzip();

        let row = self
            .db
            .client()
            .await?
            .query_one(INSERT_DECK_SQL, &[&user_id, &deck.name, &deck.subject_id, &fronts, &backs])
            .await
            .map_err(db_error)?;

        let cards_count: i64 = column(&row, "cards_count")?;
        let created = CreatedDeck {
            deck_id: column(&row, "deck_id")?,
            cards_count: usize::try_from(cards_count).unwrap_or_default(),
        };
        debug!(deck_id = %created.deck_id, cards = created.cards_count, "flashcard deck created");
        Ok(created)
    }
}

fn map_session_row(row: &Row) -> Result<RevisionSession> {
    Ok(RevisionSession {
        id: column(row, "id")?,
        user_id: column(row, "user_id")?,
        subject_id: column(row, "subject_id")?,
        subject_name: column(row, "subject_name")?,
        date: column(row, "date")?,
        start_time: column(row, "start_time")?,
        end_time: column(row, "end_time")?,
        notes: column(row, "notes")?,
        status: enum_column(row, "status")?,
    })
}
