//! Reminder sweeps, triggered by an external scheduler

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use skoo_domain::{ExamReminderReport, SessionReminderReport};

use crate::context::AppContext;
use crate::error::{ApiError, INTERNAL_SERVER_ERROR};
use crate::utils::logging::log_handler_execution;

/// `POST /send-session-reminders`
pub async fn session_reminders(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<SessionReminderReport>, ApiError> {
    let start = Instant::now();
    let result = ctx.reminders.send_session_reminders().await;

    log_handler_execution("reminders::sessions", start.elapsed(), result.is_ok());
    result
        .map(Json)
        .map_err(|err| ApiError::with_details(INTERNAL_SERVER_ERROR, err.to_string()))
}

/// `POST /send-exam-reminders`
pub async fn exam_reminders(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<ExamReminderReport>, ApiError> {
    let start = Instant::now();
    let result = ctx.reminders.send_exam_reminders().await;

    log_handler_execution("reminders::exams", start.elapsed(), result.is_ok());
    result
        .map(Json)
        .map_err(|err| ApiError::with_details(INTERNAL_SERVER_ERROR, err.to_string()))
}
