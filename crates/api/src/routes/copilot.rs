//! `POST /skoo-copilot` - conversational planning assistant with tools
//!
//! Authenticated. Returns `{response, tool_calls}`; gateway rate limits map
//! to 429, exhausted credits to 402, other gateway failures to 500
//! `{"error":"AI service error","details":...}`.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use skoo_domain::{CopilotReply, CopilotRequest};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::{json_body, AuthUser};
use crate::utils::logging::log_handler_execution;

pub async fn run(
    State(ctx): State<Arc<AppContext>>,
    AuthUser(user): AuthUser,
    body: Bytes,
) -> Result<Json<CopilotReply>, ApiError> {
    let start = Instant::now();
    let request: CopilotRequest = json_body(&body)?;

    let result = ctx.copilot.run(user.id, request).await.map_err(ApiError::from);

    log_handler_execution("copilot::run", start.elapsed(), result.is_ok());
    result.map(Json)
}
