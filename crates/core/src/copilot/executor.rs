//! Executes copilot tool calls against the study store
//!
//! Tool failures are data: every outcome is a JSON object carrying
//! `success`, and errors never escape to the loop.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use skoo_domain::{
    NewFlashcard, NewFlashcardDeck, NewRevisionSession, NewTask, Result, SessionStatus,
    SkooError, StudyPeriod, StudyStats, TaskPriority,
};
use tracing::{debug, warn};
use uuid::Uuid;

use super::ports::StudyRepository;
use super::tools;
use crate::clock::Clock;

/// Runs one tool call at a time with the caller's user id as write scope
#[derive(Clone)]
pub struct ToolExecutor {
    repository: Arc<dyn StudyRepository>,
    clock: Arc<dyn Clock>,
}

impl ToolExecutor {
    pub fn new(repository: Arc<dyn StudyRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Execute `name` with `input` and return its structured result.
    pub async fn execute(&self, user_id: Uuid, name: &str, input: &Value) -> Value {
        let outcome = match name {
            tools::CREATE_REVISION_SESSION => self.create_revision_session(user_id, input).await,
            tools::UPDATE_SESSION_STATUS => self.update_session_status(user_id, input).await,
            tools::CREATE_TASK => self.create_task(user_id, input).await,
            tools::GENERATE_QUIZ => {
                Ok(json!({ "success": true, "message": "Quiz prêt à être généré dans la réponse" }))
            }
            tools::GENERATE_REVISION_SHEET => Ok(json!({
                "success": true,
                "message": "Fiche prête à être générée dans la réponse"
            })),
            tools::GET_STUDY_STATS => self.study_stats(user_id, input).await,
            tools::SUGGEST_STUDY_PLAN => {
                Ok(json!({ "success": true, "message": "Plan de révision prêt à être proposé" }))
            }
            tools::CREATE_FLASHCARD_DECK => self.create_flashcard_deck(user_id, input).await,
            unknown => {
                warn!(tool = unknown, "model requested an unknown tool");
                return json!({ "success": false, "error": format!("Unknown tool: {unknown}") });
            }
        };

        match outcome {
            Ok(result) => {
                debug!(tool = name, "tool call succeeded");
                result
            }
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                json!({ "success": false, "error": err.to_string() })
            }
        }
    }

    async fn create_revision_session(&self, user_id: Uuid, input: &Value) -> Result<Value> {
        let args: CreateSessionArgs = parse_args(input)?;
        let session = NewRevisionSession {
            subject_id: parse_uuid("subject_id", &args.subject_id)?,
            date: parse_date("date", &args.date)?,
            start_time: parse_time("start_time", &args.start_time)?,
            end_time: parse_time("end_time", &args.end_time)?,
            notes: non_empty(args.notes),
        };

        let created = self.repository.create_revision_session(user_id, session).await?;
        Ok(json!({ "success": true, "session": created }))
    }

    async fn update_session_status(&self, user_id: Uuid, input: &Value) -> Result<Value> {
        let args: UpdateStatusArgs = parse_args(input)?;
        let session_id = parse_uuid("session_id", &args.session_id)?;
        let status: SessionStatus = args.status.parse().map_err(SkooError::InvalidInput)?;

        self.repository.update_session_status(user_id, session_id, status).await?;
        Ok(json!({ "success": true, "status": status }))
    }

    async fn create_task(&self, user_id: Uuid, input: &Value) -> Result<Value> {
        let args: CreateTaskArgs = parse_args(input)?;
        let priority = match non_empty(args.priority) {
            Some(raw) => raw.parse::<TaskPriority>().map_err(SkooError::InvalidInput)?,
            None => TaskPriority::default(),
        };
        let task = NewTask {
            title: args.title,
            description: non_empty(args.description),
            subject_id: non_empty(args.subject_id)
                .map(|id| parse_uuid("subject_id", &id))
                .transpose()?,
            priority,
            due_date: non_empty(args.due_date).map(|d| parse_date("due_date", &d)).transpose()?,
        };

        let created = self.repository.create_task(user_id, task).await?;
        Ok(json!({ "success": true, "task": created }))
    }

    async fn study_stats(&self, user_id: Uuid, input: &Value) -> Result<Value> {
        let args: StatsArgs = parse_args(input)?;
        let period: StudyPeriod = args.period.parse().map_err(SkooError::InvalidInput)?;
        let from = period.start_date(self.clock.today());

        let sessions = self.repository.sessions_since(user_id, from).await?;
        let stats = StudyStats::from_sessions(period, &sessions);
        Ok(json!({ "success": true, "stats": stats }))
    }

    async fn create_flashcard_deck(&self, user_id: Uuid, input: &Value) -> Result<Value> {
        let args: CreateDeckArgs = parse_args(input)?;
        let deck = NewFlashcardDeck {
            name: args.name,
            subject_id: non_empty(args.subject_id)
                .map(|id| parse_uuid("subject_id", &id))
                .transpose()?,
            cards: args.cards,
        };

        let created = self.repository.create_flashcard_deck(user_id, deck).await?;
        Ok(json!({
            "success": true,
            "deck_id": created.deck_id,
            "cards_count": created.cards_count
        }))
    }
}

#[derive(Deserialize)]
struct CreateSessionArgs {
    subject_id: String,
    date: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Deserialize)]
struct UpdateStatusArgs {
    session_id: String,
    status: String,
}

#[derive(Deserialize)]
struct CreateTaskArgs {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    subject_id: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
}

#[derive(Deserialize)]
struct StatsArgs {
    period: String,
}

#[derive(Deserialize)]
struct CreateDeckArgs {
    name: String,
    #[serde(default)]
    subject_id: Option<String>,
    cards: Vec<NewFlashcard>,
}

fn parse_args<T: DeserializeOwned>(input: &Value) -> Result<T> {
    T::deserialize(input).map_err(|e| SkooError::InvalidInput(format!("invalid arguments: {e}")))
}

fn parse_uuid(field: &str, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| SkooError::InvalidInput(format!("{field} is not a valid id: {raw}")))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| SkooError::InvalidInput(format!("{field} must be YYYY-MM-DD: {raw}")))
}

/// Accepts `HH:MM` and `HH:MM:SS`.
fn parse_time(field: &str, raw: &str) -> Result<NaiveTime> {
    let raw_trimmed = raw.trim();
    NaiveTime::parse_from_str(raw_trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw_trimmed, "%H:%M:%S"))
        .map_err(|_| SkooError::InvalidInput(format!("{field} must be HH:MM: {raw}")))
}

/// Empty strings count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
