//! `POST /skoo-coach` - short encouragement messages
//!
//! Never fails: a malformed body is treated as an empty motivation request
//! and gateway failures degrade to a canned message.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use skoo_domain::CoachRequest;

use crate::context::AppContext;
use crate::extract::lenient_json_body;
use crate::utils::logging::log_handler_execution;

#[derive(Debug, Serialize)]
pub struct CoachResponse {
    pub message: String,
}

pub async fn message(State(ctx): State<Arc<AppContext>>, body: Bytes) -> Json<CoachResponse> {
    let start = Instant::now();
    let request: CoachRequest = lenient_json_body(&body);

    let message = ctx.coach.message(&request).await;

    log_handler_execution("coach::message", start.elapsed(), true);
    Json(CoachResponse { message })
}
